//! Typed wrappers over the admin API surface.

use models::auth::{AuthTokens, LoginRequest, User};
use models::metrics::{MetricsResponse, TimeRange};
use models::stats::PlatformStats;
use models::tenant::{CreateTenantRequest, Tenant};
use models::TenantId;
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::paths;
use crate::request::ApiRequest;

impl ApiClient {
    /// Exchange credentials for a token pair and store it.
    ///
    /// Sent without an `Authorization` header even when a session exists.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError> {
        let input = LoginRequest::new(email, password);
        input.check()?;
        let req = ApiRequest::post(paths::LOGIN).json(&input)?.anonymous();
        let tokens: AuthTokens = self.send_expecting(req).await?;
        self.session().set(tokens.clone()).await?;
        info!("login succeeded, session stored");
        Ok(tokens)
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        self.send_expecting(ApiRequest::get(paths::ME)).await
    }

    pub async fn stats(&self) -> Result<PlatformStats, ClientError> {
        self.send_expecting(ApiRequest::get(paths::STATS)).await
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, ClientError> {
        self.send_expecting(ApiRequest::get(paths::TENANTS)).await
    }

    pub async fn get_tenant(&self, id: &str) -> Result<Tenant, ClientError> {
        let id = TenantId::parse(id)?;
        let tenant: Tenant = self.send_expecting(ApiRequest::get(paths::tenant(&id))).await?;
        if tenant.id.as_uuid() != id.as_uuid() {
            return Err(ClientError::Contract(format!("asked for tenant {id}, got {}", tenant.id)));
        }
        Ok(tenant)
    }

    #[instrument(skip(self, input), fields(name = %input.name, isolation_level = %input.isolation_level))]
    pub async fn create_tenant(&self, input: &CreateTenantRequest) -> Result<Tenant, ClientError> {
        input.check()?;
        let tenant: Tenant = self.send_expecting(ApiRequest::post(paths::TENANTS).json(input)?).await?;
        info!(tenant_id = %tenant.id, "tenant created");
        Ok(tenant)
    }

    /// Expects 204; any other 2xx body is ignored.
    #[instrument(skip(self))]
    pub async fn delete_tenant(&self, id: &str) -> Result<(), ClientError> {
        let id = TenantId::parse(id)?;
        self.send_empty(ApiRequest::delete(paths::tenant(&id))).await?;
        info!(tenant_id = %id, "tenant deleted");
        Ok(())
    }

    pub async fn metrics(&self, range: TimeRange) -> Result<MetricsResponse, ClientError> {
        self.send_expecting(ApiRequest::get(paths::METRICS).query("range", range.as_str())).await
    }

    /// URL of the tenant-scoped GraphQL endpoint. Pure; no request is made.
    pub fn graphql_endpoint(&self, tenant_id: &str) -> Result<String, ClientError> {
        let id = TenantId::parse(tenant_id)?;
        Ok(self.url(&paths::tenant_graphql(&id)))
    }
}

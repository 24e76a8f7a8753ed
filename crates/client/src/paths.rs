use models::TenantId;

pub const API_PREFIX: &str = "/api/v1";

pub const LOGIN: &str = "/api/v1/auth/login";
pub const ME: &str = "/api/v1/auth/me";
pub const STATS: &str = "/api/v1/admin/stats";
pub const TENANTS: &str = "/api/v1/admin/tenants";
pub const METRICS: &str = "/api/v1/admin/metrics";

pub fn tenant(id: &TenantId) -> String {
    format!("{TENANTS}/{id}")
}

pub fn tenant_graphql(id: &TenantId) -> String {
    format!("{API_PREFIX}/tenants/{id}/graphql")
}

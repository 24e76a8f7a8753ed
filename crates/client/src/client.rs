use std::sync::Arc;

use configs::ApiConfig;
use models::Validate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use service::{SessionState, SessionStore};
use tracing::{debug, error, instrument, warn};

use crate::errors::ClientError;
use crate::request::{build_headers, ApiRequest};

pub const LOGIN_PATH: &str = "/login";

/// Navigation target handed back to the caller after the session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginRedirect {
    pub path: &'static str,
}

impl Default for LoginRedirect {
    fn default() -> Self {
        Self { path: LOGIN_PATH }
    }
}

/// Single choke point for calls to the admin API.
///
/// Cheap to clone; clones share the HTTP connection pool and the session
/// store. Concurrent calls are not ordered or coalesced.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(cfg: &ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .user_agent(concat!("kapok-console/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = cfg.base_url.trim().trim_end_matches('/').to_string();
        Ok(Self { inner: Arc::new(Inner { http, base_url, session }) })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Local presence check; says nothing about whether the token is still
    /// accepted by the backend.
    pub async fn is_authenticated(&self) -> bool {
        self.session_state().await.is_authenticated()
    }

    pub async fn session_state(&self) -> SessionState {
        SessionState::of(self.inner.session.as_ref()).await
    }

    /// Raw access token for out-of-band calls (e.g. a tenant GraphQL
    /// endpoint queried directly).
    pub async fn auth_token(&self) -> Option<String> {
        self.inner.session.access_token().await
    }

    /// Forget the session. Never fails: a store that cannot persist the
    /// removal is logged and the redirect is returned anyway.
    pub async fn logout(&self) -> LoginRedirect {
        if let Err(e) = self.inner.session.clear().await {
            error!(error = %e, "failed to clear session on logout");
        }
        LoginRedirect::default()
    }

    /// Send `req` and decode the body as `T`. `Ok(None)` means 204.
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    pub async fn send<T>(&self, req: ApiRequest) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let resp = self.dispatch(req).await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = resp.bytes().await?;
        let value: T = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        value.validate()?;
        Ok(Some(value))
    }

    /// Like [`ApiClient::send`] but a missing body is a contract violation.
    pub async fn send_expecting<T>(&self, req: ApiRequest) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let path = req.path.clone();
        self.send(req)
            .await?
            .ok_or_else(|| ClientError::Contract(format!("{path}: expected a response body, got 204")))
    }

    /// Send `req` and discard any body.
    #[instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    pub async fn send_empty(&self, req: ApiRequest) -> Result<(), ClientError> {
        self.dispatch(req).await?;
        Ok(())
    }

    /// Steps shared by every call: attach credentials, send, and map 401 and
    /// other non-2xx answers to errors. Returns the successful response with
    /// its body unread.
    async fn dispatch(&self, req: ApiRequest) -> Result<reqwest::Response, ClientError> {
        let token = if req.anonymous { None } else { self.inner.session.access_token().await };
        let headers = build_headers(&req.headers, token.as_deref())?;

        let mut builder = self.inner.http.request(req.method, self.url(&req.path)).headers(headers);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Unauthorized { body });
        }
        if !status.is_success() {
            let body = resp.text().await?;
            warn!(status = status.as_u16(), "request rejected");
            return Err(ClientError::Api { status: status.as_u16(), body });
        }
        Ok(resp)
    }

    async fn expire_session(&self) {
        warn!("backend answered 401, clearing session");
        if let Err(e) = self.inner.session.clear().await {
            error!(error = %e, "failed to clear session after 401");
        }
    }
}

use async_trait::async_trait;
use models::auth::AuthTokens;

use crate::errors::SessionError;

/// Where the client keeps the current token pair.
///
/// Implementations are shared behind `Arc<dyn SessionStore>` by every
/// in-flight request. There is no transaction across `get` and `clear`: a
/// request that read the token before a concurrent 401 cleared it still
/// sends the stale token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Option<AuthTokens>;
    async fn set(&self, tokens: AuthTokens) -> Result<(), SessionError>;
    /// Idempotent.
    async fn clear(&self) -> Result<(), SessionError>;
    /// Coarse "is logged in" flag for routing checks; never a credential.
    async fn has_marker(&self) -> bool;

    async fn access_token(&self) -> Option<String> {
        self.get().await.map(|t| t.access_token)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub async fn of(store: &dyn SessionStore) -> Self {
        if store.access_token().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

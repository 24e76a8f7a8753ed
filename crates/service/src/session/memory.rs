use async_trait::async_trait;
use models::auth::AuthTokens;
use tokio::sync::RwLock;

use super::store::SessionStore;
use crate::errors::SessionError;

/// Process-local session; lost when the process exits.
///
/// The marker is derived from the stored tokens, so the two cannot disagree.
#[derive(Default)]
pub struct MemorySessionStore {
    tokens: RwLock<Option<AuthTokens>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already logged in.
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self { tokens: RwLock::new(Some(tokens)) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Option<AuthTokens> {
        self.tokens.read().await.clone()
    }

    async fn set(&self, tokens: AuthTokens) -> Result<(), SessionError> {
        *self.tokens.write().await = Some(tokens);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.tokens.write().await = None;
        Ok(())
    }

    async fn has_marker(&self) -> bool {
        self.tokens.read().await.is_some()
    }
}

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::auth::AuthTokens;
use tokio::fs;
use tracing::{debug, info, warn};

use super::store::SessionStore;
use crate::errors::SessionError;
use crate::storage::json_value_store::JsonValueStore;

pub const SESSION_FILE: &str = "session.json";
pub const MARKER_FILE: &str = "has_token";

/// Session persisted under a directory so it survives process restarts.
///
/// Layout:
/// - `session.json`: the token pair (owner-only permissions on unix)
/// - `has_token`: empty marker file; present exactly when a session is stored
///
/// The marker lets an external check (shell prompt, launcher) decide whether
/// a session exists without reading credentials, see [`FileSessionStore::marker_present`].
pub struct FileSessionStore {
    tokens: JsonValueStore<AuthTokens>,
    marker_path: PathBuf,
}

impl FileSessionStore {
    /// Open the session directory, creating it if needed, and reconcile the
    /// marker with whatever session file is on disk.
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self, SessionError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;
        let tokens = JsonValueStore::open(dir.join(SESSION_FILE)).await?;
        let store = Self { tokens, marker_path: dir.join(MARKER_FILE) };

        let has_tokens = store.tokens.get().await.is_some();
        let has_marker = store.has_marker().await;
        if has_tokens != has_marker {
            debug!(has_tokens, has_marker, "reconciling session marker");
            if has_tokens {
                store.raise_marker().await?;
            } else {
                store.drop_marker().await?;
            }
        }
        Ok(store)
    }

    /// Synchronous marker check for callers outside the async runtime.
    pub fn marker_present<P: AsRef<Path>>(dir: P) -> bool {
        dir.as_ref().join(MARKER_FILE).is_file()
    }

    pub fn session_path(&self) -> &Path {
        self.tokens.path()
    }

    async fn raise_marker(&self) -> Result<(), SessionError> {
        fs::write(&self.marker_path, b"").await?;
        Ok(())
    }

    async fn drop_marker(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.marker_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Option<AuthTokens> {
        self.tokens.get().await
    }

    async fn set(&self, tokens: AuthTokens) -> Result<(), SessionError> {
        self.tokens.replace(tokens).await?;
        if let Err(e) = self.raise_marker().await {
            // tokens without a marker are not a session
            if let Err(undo) = self.tokens.clear().await {
                warn!(error = %undo, "failed to roll back session after marker write error");
            }
            return Err(e);
        }
        info!(path = %self.session_path().display(), "session stored");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        // attempt both removals even if the first fails
        let tokens = self.tokens.clear().await;
        let marker = self.drop_marker().await;
        let existed = tokens?;
        marker?;
        if existed {
            info!(path = %self.session_path().display(), "session cleared");
        }
        Ok(())
    }

    async fn has_marker(&self) -> bool {
        fs::try_exists(&self.marker_path).await.unwrap_or(false)
    }
}

use std::path::{Path, PathBuf};

use tokio::{fs, sync::RwLock};
use tracing::warn;

use crate::errors::SessionError;

/// JSON file-backed optional value.
///
/// Holds at most one `V` in memory and mirrors it to a single JSON file. An
/// absent file means "no value". Writes go through a temporary file and a
/// rename so readers never observe a half-written document.
pub struct JsonValueStore<V> {
    inner: RwLock<Option<V>>,
    file_path: PathBuf,
}

impl<V> JsonValueStore<V>
where
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store at `path`, loading any existing value.
    ///
    /// A file that fails to parse is logged and treated as empty.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, SessionError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let value = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<V>(&bytes) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(path = %file_path.display(), error = %e, "ignoring unreadable state file");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self { inner: RwLock::new(value), file_path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub async fn get(&self) -> Option<V> {
        self.inner.read().await.clone()
    }

    /// Persist the value, then swap it in memory. A failed write leaves the
    /// previous value in place.
    pub async fn replace(&self, value: V) -> Result<(), SessionError> {
        let data = serde_json::to_vec_pretty(&value)?;
        let mut slot = self.inner.write().await;
        self.write_atomically(&data).await?;
        *slot = Some(value);
        Ok(())
    }

    /// Drop the value from memory first, then remove the file.
    ///
    /// Returns whether a value was present in memory.
    pub async fn clear(&self) -> Result<bool, SessionError> {
        let existed = self.inner.write().await.take().is_some();
        match fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(existed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(existed),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_atomically(&self, data: &[u8]) -> Result<(), SessionError> {
        let mut tmp = self.file_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let written: std::io::Result<()> = async {
            fs::write(&tmp, data).await?;
            restrict_permissions(&tmp).await?;
            fs::rename(&tmp, &self.file_path).await
        }
        .await;
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kapok_{tag}_{}", uuid::Uuid::new_v4())).join("state.json")
    }

    #[tokio::test]
    async fn replace_persists_and_reloads() -> Result<(), anyhow::Error> {
        let path = tmp_path("json_value");
        let store = JsonValueStore::<Vec<String>>::open(&path).await?;
        assert!(store.get().await.is_none());

        store.replace(vec!["a".into(), "b".into()]).await?;
        assert_eq!(store.get().await, Some(vec!["a".to_string(), "b".to_string()]));

        let reloaded = JsonValueStore::<Vec<String>>::open(&path).await?;
        assert_eq!(reloaded.get().await.map(|v| v.len()), Some(2));

        assert!(reloaded.clear().await?);
        assert!(!path.exists());
        assert!(!reloaded.clear().await?);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_value() -> Result<(), anyhow::Error> {
        let path = tmp_path("json_blocked");
        let store = JsonValueStore::<String>::open(&path).await?;
        store.replace("first".into()).await?;

        // a non-empty directory where the file lives makes the rename fail
        tokio::fs::remove_file(&path).await?;
        tokio::fs::create_dir_all(path.join("x")).await?;

        assert!(store.replace("second".into()).await.is_err());
        assert_eq!(store.get().await.as_deref(), Some("first"));

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        assert!(!PathBuf::from(tmp).exists());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty() -> Result<(), anyhow::Error> {
        let path = tmp_path("json_corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await?;
        tokio::fs::write(&path, b"{not json").await?;

        let store = JsonValueStore::<String>::open(&path).await?;
        assert!(store.get().await.is_none());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn written_file_is_owner_only() -> Result<(), anyhow::Error> {
        use std::os::unix::fs::PermissionsExt;
        let path = tmp_path("json_perm");
        let store = JsonValueStore::<String>::open(&path).await?;
        store.replace("secret".into()).await?;
        let mode = tokio::fs::metadata(&path).await?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}

//! TOML config file under the XDG config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "notification-facade";
const FILE_NAME: &str = "config.toml";

/// `$XDG_CONFIG_HOME/notification-facade/config.toml`, or a caller-chosen path
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self::with_path(default_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string())),
            _ => Ok(()),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_DIR)
        .join(FILE_NAME)
}

fn decode(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn encode(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
}

/// Sibling file the new content is staged in before it replaces `path`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file");
                Ok(AppConfig::empty())
            }
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    /// Replaces the file in one rename so readers never see a partial write
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = encode(config)?;
        self.ensure_parent().await?;

        let staged = staging_path(&self.path);
        fs::write(&staged, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        fs::rename(&staged, &self.path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let content = encode(&AppConfig::defaults())?;
        self.ensure_parent().await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    ConfigError::AlreadyExists(self.path.display().to_string())
                }
                _ => ConfigError::WriteError(e.to_string()),
            })?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> XdgConfigStore {
        XdgConfigStore::with_path(dir.path().join(FILE_NAME))
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with("notification-facade/config.toml"));
    }

    #[test]
    fn staging_path_is_a_sibling() {
        let staged = staging_path(Path::new("/etc/app/config.toml"));
        assert_eq!(staged, PathBuf::from("/etc/app/config.toml.tmp"));
    }

    #[test]
    fn decode_flat_format() {
        let config = decode(
            r#"
app_name = "backup-job"
timeout = "5s"
denied_policy = "skip"
"#,
        )
        .unwrap();

        assert_eq!(config.app_name.as_deref(), Some("backup-job"));
        assert_eq!(config.timeout.as_deref(), Some("5s"));
        assert_eq!(config.denied_policy.as_deref(), Some("skip"));
        assert!(config.backend.is_none());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("timeout = ["), Err(ConfigError::ParseError(_))));
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let config = store.load().await.unwrap();
        assert!(config.app_name.is_none());
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path());

        assert!(matches!(store.load().await, Err(ConfigError::ReadError(_))));
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn save_then_load_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);
        let store = XdgConfigStore::with_path(&path);

        let config = AppConfig {
            icon: Some("dialog-warning".to_string()),
            timeout: Some("500ms".to_string()),
            ..Default::default()
        };
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.icon, config.icon);
        assert_eq!(loaded.timeout, config.timeout);
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.init().await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.backend.as_deref(), Some("desktop"));

        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}

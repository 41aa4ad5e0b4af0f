//! Portal configuration
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. `CHAPTERHOUSE_*` environment variables
//! 2. `Settings.toml` in the current directory (if present)
//! 3. Built-in defaults

use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::AuthController;
use crate::directory::LocalDirectory;
use crate::session::SessionStore;
use crate::storage::FileBackend;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalSettings {
    pub storage: StorageSettings,
    pub google: GoogleSettings,
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory for the file-backed storage variant
    pub data_dir: String,
    /// Storage key for the persisted session blob
    pub session_key: String,
    /// Storage key for the local directory
    pub directory_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoogleSettings {
    /// External identity provider client id; empty disables external sign-in
    pub client_id: String,
}

impl GoogleSettings {
    /// Whether external sign-in is configured
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.client_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the network-backed variant's backend
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: ".chapterhouse".to_string(),
            session_key: "portal_session".to_string(),
            directory_key: "portal_directory".to_string(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl PortalSettings {
    /// Load settings from `Settings.toml` and environment variables
    ///
    /// # Errors
    /// Returns an error if `Settings.toml` exists but cannot be read or
    /// parsed. A missing file is not an error.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        Ok(settings)
    }

    /// Parse settings from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        basic_toml::from_str(toml).context("failed to parse settings TOML")
    }

    /// Initialize `env_logger` with the configured default level.
    /// `RUST_LOG` still takes precedence; repeated calls are a no-op.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(&self.logging.level);
        if env_logger::Builder::from_env(env).try_init().is_err() {
            log::debug!("logger already initialized");
        }
    }

    /// Build a file-backed auth controller wired per these settings
    ///
    /// # Errors
    /// Returns an error if the storage data directory cannot be created.
    pub fn build_controller(&self) -> Result<AuthController> {
        let store = SessionStore::with_key(
            Box::new(FileBackend::new(&self.storage.data_dir)?),
            &self.storage.session_key,
        );
        let directory = LocalDirectory::with_key(
            Box::new(FileBackend::new(&self.storage.data_dir)?),
            &self.storage.directory_key,
        );
        Ok(AuthController::new(store, directory))
    }

    fn load_base_settings() -> Result<Self> {
        let path = std::path::Path::new("Settings.toml");
        if path.exists() {
            let toml_content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let settings = Self::from_toml_str(&toml_content)?;
            log::debug!("loaded base settings from {}", path.display());
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    fn apply_env_overrides(settings: &mut Self) {
        if let Ok(data_dir) = std::env::var("CHAPTERHOUSE_DATA_DIR") {
            settings.storage.data_dir = data_dir;
        }
        if let Ok(session_key) = std::env::var("CHAPTERHOUSE_SESSION_KEY") {
            settings.storage.session_key = session_key;
        }
        if let Ok(directory_key) = std::env::var("CHAPTERHOUSE_DIRECTORY_KEY") {
            settings.storage.directory_key = directory_key;
        }
        if let Ok(client_id) = std::env::var("CHAPTERHOUSE_GOOGLE_CLIENT_ID") {
            settings.google.client_id = client_id;
        }
        if let Ok(base_url) = std::env::var("CHAPTERHOUSE_API_BASE_URL") {
            settings.api.base_url = base_url;
        }
        if let Ok(level) = std::env::var("CHAPTERHOUSE_LOG_LEVEL") {
            settings.logging.level = level;
        }
    }
}

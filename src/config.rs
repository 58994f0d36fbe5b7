//! Server configuration.
//!
//! Loaded from built-in defaults, then an optional YAML file, then
//! `CELLPHONE__*` environment variables (later sources win).

use std::path::PathBuf;

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "cellphone.yaml";
/// Environment variable holding the configuration file path.
pub const CONFIG_ENV_VAR: &str = "CELLPHONE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "CELLPHONE";
/// Environment variable for the tracing filter.
pub const LOG_ENV_VAR: &str = "CELLPHONE_LOG";

/// Largest cover image a client may declare, in bytes (1 MiB).
pub const MAX_COVER_IMAGE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the gRPC server binds to.
    pub listen_addr: String,
    /// Directory uploaded cover images are written to.
    pub cover_dir: PathBuf,
    /// Capacity of the outbound channel behind server-push streams.
    pub stream_buffer: usize,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Also reject an upload once the bytes actually received pass
    /// [`MAX_COVER_IMAGE_BYTES`]. Off by default: only the declared size
    /// is checked.
    pub enforce_received_size: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:9527".to_string(),
            cover_dir: PathBuf::from("image/server"),
            stream_buffer: 16,
            upload: UploadConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration. The file named by `CELLPHONE_CONFIG` must exist
    /// if that variable is set; the default file is optional.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        use ::config::{Config, Environment, File, FileFormat};

        let file = match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => File::new(&path, FileFormat::Yaml).required(true),
            Err(_) => File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

//! Platform configuration
//!
//! One file, format picked by extension: `.toml`, `.yaml`/`.yml` or `.json`.
//! Every section and field is optional; missing ones take defaults.
//!
//! ```toml
//! [editor]
//! default_variant = "always_visual"
//! check_media_urls = true
//!
//! [store]
//! audit = true
//!
//! [communities]
//! seed = "communities.json"
//! max_name_length = 100
//!
//! [log]
//! filter = "info,edukit_content=debug"
//! json = false
//! ```

use edukit_communities::CommunitiesConfig;
use edukit_content::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Config path
        path: PathBuf,
        /// Cause
        #[source]
        source: std::io::Error,
    },

    /// Extension is not toml, yaml, yml or json
    #[error("unsupported config format: {}", .0.display())]
    UnknownFormat(PathBuf),

    /// TOML parse error
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// YAML parse error
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// JSON parse error
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Parsed but out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// YAML
    Yaml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Format implied by the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Record content writes in the audit log
    pub audit: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { audit: true }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence
    pub filter: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Whole-platform configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Content editor
    pub editor: EditorConfig,
    /// Storage
    pub store: StoreConfig,
    /// Learning communities
    pub communities: CommunitiesConfig,
    /// Logging
    pub log: LogConfig,
}

impl PlatformConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With editor settings
    #[inline]
    #[must_use]
    pub fn with_editor(mut self, editor: EditorConfig) -> Self {
        self.editor = editor;
        self
    }

    /// With audit on or off
    #[inline]
    #[must_use]
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.store.audit = audit;
        self
    }

    /// With communities settings
    #[inline]
    #[must_use]
    pub fn with_communities(mut self, communities: CommunitiesConfig) -> Self {
        self.communities = communities;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log.filter = filter.into();
        self
    }

    /// Parse configuration text
    ///
    /// # Errors
    /// Parse errors of the chosen format, or `Invalid` for out-of-range values.
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(text)?,
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a config file
    ///
    /// A relative seed path is resolved against the file's directory.
    ///
    /// # Errors
    /// `Io`, `UnknownFormat`, or any parse error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat(path.into()))?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.into(),
            source,
        })?;
        let mut config = Self::parse(&text, format)?;
        if let (Some(seed), Some(dir)) = (&config.communities.seed, path.parent()) {
            if seed.is_relative() {
                config.communities.seed = Some(dir.join(seed));
            }
        }
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults without a path, the file's contents with one
    ///
    /// # Errors
    /// See [`PlatformConfig::from_file`]; an explicit path must be readable.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `Invalid` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.communities.max_name_length == 0 {
            return Err(ConfigError::Invalid(
                "communities.max_name_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

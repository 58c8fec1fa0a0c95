//! Edukit Core - platform assembly
//!
//! - [`PlatformConfig`]: one config file for every service
//! - [`Platform`]: store, audited content gateway and communities table
//! - [`telemetry`]: tracing subscriber setup for binaries
//!
//! # Example
//!
//! ```rust,ignore
//! use edukit_core::{Platform, PlatformConfig};
//!
//! # async fn example() -> Result<(), edukit_core::PlatformError> {
//! let platform = Platform::build(PlatformConfig::load(None)?).await?;
//! let mut editor = platform.new_editor();
//! editor.set_title("Fractions");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod platform;
pub mod telemetry;

pub use config::{ConfigError, ConfigFormat, LogConfig, PlatformConfig, StoreConfig};
pub use platform::{DraftFile, Platform, PlatformError};
pub use telemetry::TelemetryError;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the platform
    pub use crate::{DraftFile, Platform, PlatformConfig, PlatformError};
    pub use edukit_communities::CommandTable;
    pub use edukit_content::{ContentEditor, EditorConfig};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

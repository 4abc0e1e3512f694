//! Session configuration
//!
//! Two levels, mirroring how callers usually configure a load:
//! - Level 1: Preset - one-liner (`SessionConfig::preset(Preset::Strict)`)
//! - Level 2: YAML - versioned file with per-section overrides
//!
//! # Examples
//!
//! ```rust,ignore
//! use declquery::config::{Preset, SessionConfig};
//!
//! let config = SessionConfig::preset(Preset::Lenient)
//!     .exclude_dir("generated")
//!     .build()?;
//!
//! let config = SessionConfig::from_yaml("declquery.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod session_config;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use preset::Preset;
pub use session_config::{DiscoveryConfig, KindConfig, ParsingConfig, SessionConfig};
pub use validation::Validatable;

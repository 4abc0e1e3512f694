//! Configuration I/O (YAML schema)
//!
//! Defines the YAML schema types. Loading and export live in session_config.rs.

use serde::{Deserialize, Serialize};

use super::session_config::{DiscoveryConfig, KindConfig, ParsingConfig};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset (defaults to lenient)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing: Option<ParsingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<KindConfig>,
}

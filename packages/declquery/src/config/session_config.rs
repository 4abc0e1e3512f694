//! Session configuration types and builder

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use super::preset::Preset;
use super::validation::Validatable;

/// Largest source file the store will parse (bytes)
pub const MAX_FILE_BYTES_LIMIT: u64 = 256 * 1024 * 1024;

/// Largest explicit worker count accepted
pub const MAX_WORKERS: usize = 512;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// File discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DiscoveryConfig {
    /// File extensions (without the dot) treated as source files
    pub extensions: Vec<String>,
    /// Directory names pruned during the walk
    pub exclude_dirs: Vec<String>,
    /// Skip hidden (dot-prefixed) directories
    pub skip_hidden: bool,
    pub follow_links: bool,
    /// Files larger than this are skipped and reported
    pub max_file_bytes: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["cs".to_string()],
            exclude_dirs: vec!["bin".to_string(), "obj".to_string()],
            skip_hidden: true,
            follow_links: false,
            max_file_bytes: 8 * 1024 * 1024,
        }
    }
}

impl DiscoveryConfig {
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.') && name.len() > 1)
            || self.exclude_dirs.iter().any(|d| d == name)
    }
}

impl Validatable for DiscoveryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::invalid(
                "discovery.extensions",
                "at least one extension is required",
            ));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::invalid(
                "discovery.extensions",
                format!("'{}' must be a bare extension such as 'cs'", bad),
            ));
        }
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_FILE_BYTES_LIMIT {
            return Err(ConfigError::range_with_hint(
                "discovery.max_file_bytes",
                self.max_file_bytes,
                1,
                MAX_FILE_BYTES_LIMIT,
                "Generated files above the limit are usually not worth querying",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "discovery"
    }
}

/// Parse phase settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ParsingConfig {
    /// Parse files on the rayon pool
    pub parallel: bool,
    /// Explicit worker count (None = 75% of available cores)
    pub workers: Option<usize>,
    /// Treat a tree containing syntax errors as a failed parse
    pub reject_syntax_errors: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            workers: None,
            reject_syntax_errors: false,
        }
    }
}

impl ParsingConfig {
    /// Worker count actually used for the parse pool
    pub fn effective_workers(&self) -> usize {
        self.workers
            .unwrap_or_else(|| (num_cpus::get() * 3 / 4).max(1))
    }
}

impl Validatable for ParsingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::range_with_hint(
                    "parsing.workers",
                    workers,
                    1,
                    MAX_WORKERS,
                    "Omit the field to size the pool from the core count",
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "parsing"
    }
}

/// Extra declaration kinds recognized on top of the built-in set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct KindConfig {
    /// raw tree-sitter node kind -> custom kind name
    pub extra: BTreeMap<String, String>,
}

impl Validatable for KindConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (raw, name) in &self.extra {
            if raw.trim().is_empty() || name.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "kinds.extra",
                    "raw kinds and kind names must be non-empty",
                ));
            }
            if crate::features::parsing::domain::KindRegistry::is_builtin_raw_kind(raw) {
                return Err(ConfigError::invalid(
                    "kinds.extra",
                    format!("'{}' is already a built-in declaration kind", raw),
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "kinds"
    }
}

/// Complete configuration of a query session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub(crate) preset: Preset,
    pub discovery: DiscoveryConfig,
    pub parsing: ParsingConfig,
    pub kinds: KindConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl SessionConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        let parsing = match preset {
            Preset::Lenient => ParsingConfig::default(),
            Preset::Strict => ParsingConfig {
                parallel: false,
                workers: None,
                reject_syntax_errors: true,
            },
        };
        Self {
            preset,
            discovery: DiscoveryConfig::default(),
            parsing,
            kinds: KindConfig::default(),
        }
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        if !self.discovery.accepts_extension(&ext) {
            self.discovery.extensions.push(ext);
        }
        self
    }

    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.discovery.exclude_dirs.push(name.into());
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parsing.parallel = parallel;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.parsing.workers = Some(workers);
        self
    }

    pub fn reject_syntax_errors(mut self, reject: bool) -> Self {
        self.parsing.reject_syntax_errors = reject;
        self
    }

    /// Register an additional raw node kind as a custom declaration kind
    pub fn register_kind(mut self, raw_kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.kinds.extra.insert(raw_kind.into(), name.into());
        self
    }

    /// Validate every section and return the configuration
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        if !SUPPORTED_VERSIONS.contains(&export.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset.as_deref() {
            Some(name) => {
                Preset::from_str(name).map_err(|_| ConfigError::UnknownPreset(name.to_string()))?
            }
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(discovery) = export.discovery {
            config.discovery = discovery;
        }
        if let Some(parsing) = export.parsing {
            config.parsing = parsing;
        }
        if let Some(kinds) = export.kinds {
            config.kinds = kinds;
        }

        config.build()
    }

    /// Export the effective configuration as YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            preset: Some(self.preset.to_string()),
            discovery: Some(self.discovery.clone()),
            parsing: Some(self.parsing.clone()),
            kinds: Some(self.kinds.clone()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Validatable for SessionConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.discovery.validate()?;
        self.parsing.validate()?;
        self.kinds.validate()?;
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "session"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_preset_settings() {
        let config = SessionConfig::preset(Preset::Strict);
        assert!(!config.parsing.parallel);
        assert!(config.parsing.reject_syntax_errors);
        assert_eq!(config.get_preset(), Preset::Strict);
    }

    #[test]
    fn test_builder_overrides() {
        let config = SessionConfig::default()
            .extension("csx")
            .exclude_dir("generated")
            .workers(2)
            .build()
            .unwrap();

        assert!(config.discovery.accepts_extension("CSX"));
        assert!(config.discovery.is_excluded_dir("generated"));
        assert!(config.discovery.is_excluded_dir(".git"));
        assert!(!config.discovery.is_excluded_dir("src"));
        assert_eq!(config.parsing.effective_workers(), 2);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = SessionConfig::default().workers(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }

    #[test]
    fn test_dotted_extension_rejected() {
        let err = SessionConfig::default().extension(".cs").build().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_builtin_kind_cannot_be_reregistered() {
        let err = SessionConfig::default()
            .register_kind("class_declaration", "klass")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("class_declaration"));
    }

    #[test]
    fn test_yaml_loading() {
        let yaml = r#"
version: 1
preset: strict
discovery:
  extensions: [cs, csx]
  exclude_dirs: [bin, obj, generated]
kinds:
  extra:
    property_declaration: property
"#;
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.get_preset(), Preset::Strict);
        assert!(config.parsing.reject_syntax_errors);
        assert!(config.discovery.accepts_extension("csx"));
        assert_eq!(
            config.kinds.extra.get("property_declaration").map(String::as_str),
            Some("property")
        );
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = SessionConfig::from_yaml_str("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let err = SessionConfig::from_yaml_str("version: 1\npreset: turbo\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SessionConfig::preset(Preset::Strict).exclude_dir("generated");
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: strict"));

        let reloaded = SessionConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded, config);
    }
}

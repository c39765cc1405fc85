//! Generator configuration.
//!
//! Read from an `rpcgen.toml` file:
//!
//! ```toml
//! stubs = "separate"
//! stub_guard = "_PW_RPC_COMPILE_GENERATED_SERVICE_STUBS"
//! collisions = "warn"
//! id_manifest = true
//! timestamp = "2021-06-01T12:00:00"
//! ```
//!
//! Every key is optional.

use std::{path::Path, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{GenerateError, Result};

/// Macro that guards the implementation stubs in generated code.
pub const DEFAULT_STUB_GUARD: &str = "_PW_RPC_COMPILE_GENERATED_SERVICE_STUBS";

/// Configuration shared by every generated file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Where implementation stubs are written.
    pub stubs: StubPlacement,
    /// Macro that must be defined for the stubs to be compiled.
    pub stub_guard: String,
    /// What to do when two identifiers hash to the same value.
    pub collisions: CollisionPolicy,
    /// Write a JSON manifest of every service and method ID.
    pub id_manifest: bool,
    /// Fixed timestamp for file banners, for reproducible output.
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            stubs: StubPlacement::default(),
            stub_guard: DEFAULT_STUB_GUARD.to_string(),
            collisions: CollisionPolicy::default(),
            id_manifest: false,
            timestamp: None,
        }
    }
}

impl FromStr for GeneratorConfig {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "rpcgen.toml")
    }
}

impl GeneratorConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenerateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_config(&content, &path.display().to_string())
    }
}

fn parse_config(content: &str, filename: &str) -> Result<GeneratorConfig> {
    toml::from_str(content).map_err(|e| GenerateError::Config {
        filename: filename.to_string(),
        source: e,
    })
}

/// Where implementation stubs are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StubPlacement {
    /// Appended to the generated header behind the stub guard.
    #[default]
    Inline,
    /// Written to a separate source file, only if it does not exist yet.
    Separate,
    /// Not generated.
    #[serde(rename = "none")]
    Omit,
}

/// What to do when two identifiers in the same scope hash to the same value.
///
/// Method IDs are checked within their service, service IDs within their
/// package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort generation.
    #[default]
    Reject,
    /// Log a warning and continue.
    Warn,
    /// Continue silently.
    Ignore,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config: GeneratorConfig = "".parse().unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.stubs, StubPlacement::Inline);
        assert_eq!(config.collisions, CollisionPolicy::Reject);
        assert_eq!(config.stub_guard, DEFAULT_STUB_GUARD);
        assert!(!config.id_manifest);
    }

    #[test]
    fn test_parse_all_keys() {
        let config: GeneratorConfig = r#"
            stubs = "none"
            stub_guard = "COMPILE_STUBS"
            collisions = "warn"
            id_manifest = true
            timestamp = "2021-06-01T12:30:00"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.stubs, StubPlacement::Omit);
        assert_eq!(config.stub_guard, "COMPILE_STUBS");
        assert_eq!(config.collisions, CollisionPolicy::Warn);
        assert!(config.id_manifest);
        assert_eq!(
            config.timestamp,
            NaiveDate::from_ymd_opt(2021, 6, 1).and_then(|d| d.and_hms_opt(12, 30, 0))
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "stub = \"inline\"".parse::<GeneratorConfig>().unwrap_err();
        assert!(matches!(err, GenerateError::Config { .. }));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let err = "collisions = \"panic\""
            .parse::<GeneratorConfig>()
            .unwrap_err();
        assert!(matches!(err, GenerateError::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rpcgen.toml");
        std::fs::write(&path, "stubs = \"separate\"\n").unwrap();

        let config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.stubs, StubPlacement::Separate);

        let missing = GeneratorConfig::from_file(temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, GenerateError::Io { .. }));
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants;

/// How a `NUM_INTF` value that disagrees with the `INTF` rows is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    #[default]
    Strict,
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub config_file: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub count_policy: CountPolicy,
    /// Prefix every generated file with an informational timestamp line
    pub banner: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(constants::DEFAULT_CONFIG_FILE),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            log_file: PathBuf::from(constants::DEFAULT_LOG_FILE),
            count_policy: CountPolicy::Strict,
            banner: true,
        }
    }
}

impl GeneratorConfig {
    /// Load settings from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .context(format!("Failed to parse settings file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.config_file, PathBuf::from("UVM_TB_PARAMS.csv"));
        assert_eq!(config.output_dir, PathBuf::from("verif"));
        assert_eq!(config.count_policy, CountPolicy::Strict);
        assert!(config.banner);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "output_dir": "out", "count_policy": "warn" }"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.count_policy, CountPolicy::Warn);
        assert_eq!(config.log_file, PathBuf::from("uvm_tbgen.log"));
        assert!(config.banner);
    }
}

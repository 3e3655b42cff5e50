use crate::archive::ReadOptions;
use crate::stack::DEFAULT_THRESHOLD;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Log level used when neither flags nor `APKLENS_LOG_LEVEL` set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_MAX_CONCURRENCY: usize = 8;
const DEFAULT_INSPECT_MANIFEST: bool = true;
const DEFAULT_MAX_MANIFEST_BYTES: u64 = 1_048_576; // 1MB

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct ApklensConfig {
    pub score_threshold: u32,
    pub max_concurrency: usize,
    pub inspect_manifest: bool,
    pub max_manifest_bytes: u64,
    pub log_level: String,
}

impl Default for ApklensConfig {
    fn default() -> Self {
        let score_threshold = env::var("APKLENS_SCORE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_THRESHOLD);

        let max_concurrency = env::var("APKLENS_MAX_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONCURRENCY);

        let inspect_manifest = env::var("APKLENS_INSPECT_MANIFEST")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_INSPECT_MANIFEST);

        let max_manifest_bytes = env::var("APKLENS_MAX_MANIFEST_BYTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_MANIFEST_BYTES);

        let log_level = env::var("APKLENS_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            score_threshold,
            max_concurrency,
            inspect_manifest,
            max_manifest_bytes,
            log_level,
        }
    }
}

impl ApklensConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_threshold == 0 {
            return Err(ConfigError::ValidationFailed(
                "Score threshold must be at least 1".to_string(),
            ));
        }
        if self.score_threshold > 100 {
            return Err(ConfigError::ValidationFailed(
                "Score threshold cannot exceed 100".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max concurrency must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency > 256 {
            return Err(ConfigError::ValidationFailed(
                "Max concurrency cannot exceed 256".to_string(),
            ));
        }

        if self.max_manifest_bytes < 1024 {
            return Err(ConfigError::ValidationFailed(
                "Max manifest size must be at least 1KB".to_string(),
            ));
        }
        if self.max_manifest_bytes > 16_777_216 {
            return Err(ConfigError::ValidationFailed(
                "Max manifest size cannot exceed 16MB".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            read_manifest: self.inspect_manifest,
            max_manifest_bytes: self.max_manifest_bytes,
            ..Default::default()
        }
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            "score_threshold".to_string(),
            self.score_threshold.to_string(),
        );
        map.insert(
            "max_concurrency".to_string(),
            self.max_concurrency.to_string(),
        );
        map.insert(
            "inspect_manifest".to_string(),
            self.inspect_manifest.to_string(),
        );
        map.insert(
            "max_manifest_bytes".to_string(),
            self.max_manifest_bytes.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for ApklensConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Apklens Configuration:")?;
        writeln!(f, "  Score Threshold: {}", self.score_threshold)?;
        writeln!(f, "  Max Concurrency: {}", self.max_concurrency)?;
        writeln!(f, "  Inspect Manifest: {}", self.inspect_manifest)?;
        writeln!(f, "  Max Manifest Size: {} bytes", self.max_manifest_bytes)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn remove(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn valid_config() -> ApklensConfig {
        ApklensConfig {
            score_threshold: 2,
            max_concurrency: 8,
            inspect_manifest: true,
            max_manifest_bytes: 1_048_576,
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::remove("APKLENS_SCORE_THRESHOLD"),
            EnvGuard::remove("APKLENS_MAX_CONCURRENCY"),
            EnvGuard::remove("APKLENS_INSPECT_MANIFEST"),
            EnvGuard::remove("APKLENS_MAX_MANIFEST_BYTES"),
            EnvGuard::remove("APKLENS_LOG_LEVEL"),
        ];

        let config = ApklensConfig::default();

        assert_eq!(config.score_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.inspect_manifest, DEFAULT_INSPECT_MANIFEST);
        assert_eq!(config.max_manifest_bytes, DEFAULT_MAX_MANIFEST_BYTES);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.to_display_map()["log_level"], "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("APKLENS_SCORE_THRESHOLD", "4"),
            EnvGuard::set("APKLENS_MAX_CONCURRENCY", "2"),
            EnvGuard::set("APKLENS_INSPECT_MANIFEST", "false"),
            EnvGuard::set("APKLENS_MAX_MANIFEST_BYTES", "65536"),
            EnvGuard::set("APKLENS_LOG_LEVEL", "DEBUG"),
        ];

        let config = ApklensConfig::default();

        assert_eq!(config.score_threshold, 4);
        assert_eq!(config.max_concurrency, 2);
        assert!(!config.inspect_manifest);
        assert_eq!(config.max_manifest_bytes, 65_536);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back_to_defaults() {
        let _guards = [
            EnvGuard::set("APKLENS_SCORE_THRESHOLD", "high"),
            EnvGuard::set("APKLENS_MAX_CONCURRENCY", "-1"),
        ];

        let config = ApklensConfig::default();
        assert_eq!(config.score_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    }

    #[test]
    fn test_configuration_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_configuration_validation_invalid_threshold() {
        let config = ApklensConfig {
            score_threshold: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_validation_invalid_concurrency() {
        let config = ApklensConfig {
            max_concurrency: 1000,
            ..valid_config()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("256"));
    }

    #[test]
    fn test_configuration_validation_invalid_manifest_size() {
        let config = ApklensConfig {
            max_manifest_bytes: 10,
            ..valid_config()
        };
        assert!(config.validate().unwrap_err().to_string().contains("1KB"));
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let config = ApklensConfig {
            log_level: "invalid".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_read_options_follow_config() {
        let config = ApklensConfig {
            inspect_manifest: false,
            max_manifest_bytes: 4096,
            ..valid_config()
        };
        let options = config.read_options();
        assert!(!options.read_manifest);
        assert_eq!(options.max_manifest_bytes, 4096);
        assert!(options.read_signatures);
    }

    #[test]
    fn test_config_display() {
        let display = format!("{}", valid_config());
        assert!(display.contains("Apklens Configuration:"));
        assert!(display.contains("Score Threshold: 2"));
    }

    #[test]
    fn test_display_map() {
        let map = valid_config().to_display_map();
        assert_eq!(map.get("max_concurrency"), Some(&"8".to_string()));
        assert_eq!(map.len(), 5);
    }
}

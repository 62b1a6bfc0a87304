//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GuardConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::filter::paths::load_paths;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
///
/// A `filter.suspicious_paths_file` is read here and merged into
/// `filter.suspicious_paths`, so the filter itself never touches the disk.
pub fn load_config(path: &Path) -> Result<GuardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GuardConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    if let Some(file) = config.filter.suspicious_paths_file.take() {
        let from_file = load_paths(&file).map_err(ConfigError::Io)?;
        match &mut config.filter.suspicious_paths {
            Some(paths) => paths.extend(from_file),
            None => config.filter.suspicious_paths = Some(from_file),
        }
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_with_paths_file() {
        let config_file = "test_gatekeeper_config.toml";
        let paths_file = "test_gatekeeper_paths.txt";
        std::fs::write(paths_file, "/custom\n# ignored\n/probe\n").unwrap();
        std::fs::write(
            config_file,
            format!(
                "[filter]\nmax_request_count = 3\nsuspicious_paths = [\"/admin\"]\nsuspicious_paths_file = \"{}\"\n",
                paths_file
            ),
        )
        .unwrap();

        let config = load_config(Path::new(config_file)).unwrap();
        let paths = config.filter.suspicious_paths.unwrap();
        assert_eq!(paths, vec!["/admin", "/custom", "/probe"]);
        assert_eq!(config.filter.max_request_count, 3);

        std::fs::remove_file(config_file).unwrap_or_default();
        std::fs::remove_file(paths_file).unwrap_or_default();
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let config_file = "test_gatekeeper_invalid.toml";
        std::fs::write(config_file, "[filter]\nrequest_window_ms = 0\n").unwrap();

        let err = load_config(Path::new(config_file)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        std::fs::remove_file(config_file).unwrap_or_default();
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("definitely_not_here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

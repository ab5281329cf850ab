//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{HandlerKind, LogFormat};

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config("").unwrap();
        assert!(config.routes.is_empty());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.retry.step_secs, 10);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [observability]
            log_level = "debug"
            log_format = "json"

            [retry]
            step_secs = 5
            max_delay_secs = 120

            [[routes]]
            name = "put"
            action = "PutObject"
            pattern = "/content/:path+"

            [[routes]]
            name = "delete"
            action = "DeleteObject"
            pattern = "content/:path+"
            handler = "retry"
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.retry.max_delay_secs, 120);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].handler, HandlerKind::Log);
        assert_eq!(config.routes[1].handler, HandlerKind::Retry);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[routes]]\nname = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_config(
            r#"
            [[routes]]
            name = "put"
            action = ""
            pattern = "/content"
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: route `put` has an empty action"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/queue-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Client parameter loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientParams;
use crate::config::validation::{validate_params, ValidationError};

/// Error type for parameter loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json(serde_json::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Toml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Json(e) => write!(f, "Parse error: {}", e),
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

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate client parameters. `.json` files are read as JSON, anything else as TOML.
pub fn load_params(path: &Path) -> Result<ClientParams, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    let params: ClientParams = if is_json {
        serde_json::from_str(&content).map_err(ConfigError::Json)?
    } else {
        toml::from_str(&content).map_err(ConfigError::Toml)?
    };

    validate_params(&params).map_err(ConfigError::Validation)?;

    Ok(params)
}

//! Client parameter validation.
//!
//! # Responsibilities
//! - Required paths are present
//! - Value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ClientParams → Result<(), Vec<ValidationError>>
//! - Existence of files is checked later, when the store and socket are opened

use std::fmt;

use crate::config::schema::ClientParams;

/// A single parameter problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingPath(&'static str),
    ZeroTimeout,
    EmptyLogFilter,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingPath(field) => write!(f, "{} must not be empty", field),
            ValidationError::ZeroTimeout => write!(f, "runtime_timeout_ms must be greater than 0"),
            ValidationError::EmptyLogFilter => write!(f, "logging.filter must not be empty"),
        }
    }
}

pub fn validate_params(params: &ClientParams) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if params.config_file.as_os_str().is_empty() {
        errors.push(ValidationError::MissingPath("config_file"));
    }
    if params.program.as_os_str().is_empty() {
        errors.push(ValidationError::MissingPath("program"));
    }
    if params.runtime_socket.as_os_str().is_empty() {
        errors.push(ValidationError::MissingPath("runtime_socket"));
    }
    if params.runtime_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }
    if params.logging.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

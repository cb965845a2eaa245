//! Client configuration subsystem.
//!
//! # Data Flow
//! ```text
//! params file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientParams (validated)
//!     → Client::init (store + runtime channel)
//! ```
//!
//! # Design Decisions
//! - Params can also be built in code; the file loader is a convenience
//! - Validation separates syntactic (serde) from semantic checks
//! - Required paths have no defaults; optional settings do

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_params, ConfigError};
pub use schema::{ClientParams, LoggingConfig};
pub use validation::{validate_params, ValidationError};

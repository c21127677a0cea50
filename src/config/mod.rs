//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            MockConfig::default()
//!     → loader.rs (parse & deserialize)      │
//!     → validation.rs (semantic checks) ◀────┘
//!     → MockConfig (validated, immutable)
//!     → net::binder (port range, attempts)
//!     → http::server (timeouts, body limit)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a server has started
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{MockConfig, PortRange};
pub use validation::{validate_config, ValidationError};

//! Schema file loading and completer configuration.
//!
//! # Quick start
//!
//! ```no_run
//! use command_complete_loader::{CompleterConfig, load_schema};
//!
//! let config = CompleterConfig::load("complete.yml").unwrap();
//! if let Some(path) = &config.schema {
//!     let mut spec = load_schema(path).unwrap();
//!     config.apply(&mut spec);
//!     println!("completing for {}", spec.name);
//! }
//! ```

mod config;
mod error;
mod loader;

pub use config::CompleterConfig;
pub use error::{LoaderError, Result};
pub use loader::{SchemaFormat, load_schema, parse_schema};

//! Command schema types for shell completion.
//!
//! This crate defines the read-only command tree that the completion engine
//! compiles:
//!
//! - [`CommandSpec`]: a command with aliases, a hidden marker, flags and
//!   nested subcommands.
//! - [`FlagSpec`]: a flag with long/short forms, aliases, value
//!   classification and an optional [`Negation`].
//!
//! Validation ([`validate_command`]) catches trees that cannot be compiled,
//! such as flags without a spelling or negated value-taking flags.
//!
//! With the default `clap` feature, a `clap::Command` converts into a
//! [`CommandSpec`] through `From<&clap::Command>`.
//!
//! # Example
//!
//! ```
//! use command_complete_core::*;
//!
//! let gog = CommandSpec::new("gog")
//!     .with_flag(FlagSpec::with_value("account").with_short('a'))
//!     .with_flag(FlagSpec::switch("color").negatable())
//!     .with_child(
//!         CommandSpec::new("calendar")
//!             .with_alias("cal")
//!             .with_child(CommandSpec::new("list").with_flag(FlagSpec::switch("json"))),
//!     );
//!
//! assert_eq!(gog.find_child("cal").unwrap().name, "calendar");
//! assert!(validate_command(&gog).is_ok());
//! ```

#[cfg(feature = "clap")]
mod from_clap;
mod types;
mod validate;

pub use types::*;
pub use validate::{SchemaError, validate_command};

//! Error type for completion tree construction.

use command_complete_core::SchemaError;
use thiserror::Error;

/// Failure to produce a completion tree.
///
/// This is the only error the engine reports. Once captured by a
/// [`CompletionTree`](crate::CompletionTree) it is returned, unchanged, to
/// every later request in the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The schema is structurally invalid.
    #[error("invalid command schema: {0}")]
    Invalid(#[from] SchemaError),

    /// The schema source failed before a schema was produced.
    #[error("failed to load command schema: {0}")]
    Source(String),
}

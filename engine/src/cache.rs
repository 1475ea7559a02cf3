//! Build-once storage for the completion tree.
//!
//! A [`CompletionTree`] runs its schema source and the tree builder at most
//! once, on first use. The outcome, tree or error, is kept for the life of
//! the value and handed to every later caller, including concurrent ones.
//! It is `const`-constructible, so a process-wide instance can be a plain
//! `static`:
//!
//! ```
//! use std::convert::Infallible;
//!
//! use command_complete_core::CommandSpec;
//! use command_complete_engine::CompletionTree;
//!
//! static TREE: CompletionTree = CompletionTree::new();
//!
//! let schema = || Ok::<_, Infallible>(CommandSpec::new("gog").with_child(CommandSpec::new("drive")));
//! assert_eq!(TREE.complete(schema, 1, &["gog", "d"]).unwrap(), vec!["drive"]);
//! assert!(TREE.is_built());
//! ```

use std::fmt::Display;
use std::sync::OnceLock;

use command_complete_core::CommandSpec;
use tracing::{debug, warn};

use crate::error::BuildError;
use crate::tree::{CompiledTree, build_tree};

/// Lazily built, never invalidated completion tree.
#[derive(Debug, Default)]
pub struct CompletionTree {
    cell: OnceLock<Result<CompiledTree, BuildError>>,
}

impl CompletionTree {
    /// Creates an empty, unbuilt tree.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Returns the tree, building it from `schema` on the first call.
    ///
    /// `schema` runs only if nothing has been built yet; later calls return
    /// the cached tree, or the cached error, whatever source they pass.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Source`] if the first schema source failed, or
    /// [`BuildError::Invalid`] if its schema failed validation.
    pub fn get_or_build<F, E>(&self, schema: F) -> Result<&CompiledTree, BuildError>
    where
        F: FnOnce() -> Result<CommandSpec, E>,
        E: Display,
    {
        self.cell
            .get_or_init(|| {
                let spec = schema().map_err(|err| BuildError::Source(err.to_string()))?;
                let built = build_tree(&spec);
                match &built {
                    Ok(_) => debug!(command = %spec.name, "completion tree ready"),
                    Err(err) => warn!(%err, "completion tree build failed"),
                }
                built
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns `true` once a build has been attempted.
    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Completes the word at `cword` in `words`.
    ///
    /// An empty word list yields no suggestions without building anything.
    ///
    /// # Errors
    ///
    /// Returns the cached [`BuildError`] if the tree could not be built.
    pub fn complete<F, E, S>(&self, schema: F, cword: isize, words: &[S]) -> Result<Vec<String>, BuildError>
    where
        F: FnOnce() -> Result<CommandSpec, E>,
        E: Display,
        S: AsRef<str>,
    {
        if words.is_empty() {
            return Ok(Vec::new());
        }
        let tree = self.get_or_build(schema)?;
        Ok(crate::complete_words(tree, cword, words))
    }
}

//! Shell completion resolution over a compiled command tree.
//!
//! The engine answers one question: given a command schema, the words of a
//! partially typed command line and the index of the word being completed,
//! which command names or flag tokens may come next? It never runs a
//! command and never reads anything outside the schema it was given.
//!
//! - [`build_tree`] compiles a [`CommandSpec`](command_complete_core::CommandSpec)
//!   into a [`CompiledTree`].
//! - [`resolve`] replays the words before the cursor and either finds the
//!   node to complete in or reports why nothing may be suggested
//!   ([`NoSuggestions`]).
//! - [`candidates`] lists the sorted matches at a node.
//! - [`CompletionTree`] keeps one compiled tree (or its build error) for the
//!   life of the process.
//!
//! # Example
//!
//! ```
//! use command_complete_core::{CommandSpec, FlagSpec};
//! use command_complete_engine::{build_tree, complete_words};
//!
//! let tree = build_tree(
//!     &CommandSpec::new("gog")
//!         .with_flag(FlagSpec::with_value("account"))
//!         .with_child(
//!             CommandSpec::new("calendar")
//!                 .with_child(CommandSpec::new("list").with_flag(FlagSpec::switch("json"))),
//!         ),
//! )
//! .unwrap();
//!
//! assert_eq!(complete_words(&tree, 1, &["gog", "cale"]), vec!["calendar"]);
//! assert_eq!(complete_words(&tree, 3, &["gog", "calendar", "list", "--j"]), vec!["--json"]);
//! assert!(complete_words(&tree, 4, &["gog", "calendar", "list", "--account"]).is_empty());
//! ```

mod cache;
mod candidates;
mod error;
mod tree;
mod walk;

pub use cache::CompletionTree;
pub use candidates::candidates;
pub use error::BuildError;
pub use tree::{CompiledTree, CompletionNode, FlagToken, build_tree};
pub use walk::{
    NoSuggestions, Resolution, Walk, normalize_cursor, resolve, split_flag_token, start_index,
    walk,
};

use tracing::trace;

/// Completes the word at `cword` in `words` against a compiled tree.
///
/// A negative `cword` selects the last word; a `cword` past the end
/// completes a new, empty word. The result is sorted and may be empty.
pub fn complete_words<S: AsRef<str>>(tree: &CompiledTree, cword: isize, words: &[S]) -> Vec<String> {
    match resolve(tree, cword, words) {
        Resolution::Complete { node, cursor } => {
            let current = words.get(cursor).map_or("", |word| word.as_ref());
            candidates(node, current)
        }
        Resolution::Empty(reason) => {
            trace!(?reason, cword, "no completions");
            Vec::new()
        }
    }
}

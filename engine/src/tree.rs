//! Completion tree construction.
//!
//! [`build_tree`] compiles a [`CommandSpec`] into nodes keyed for O(1) token
//! lookup: child command tokens (names and aliases) map to child nodes, and
//! flag tokens (`--json`, `-j`, `--no-color`) map to a [`FlagToken`].
//!
//! A node recognizes its own flags and every flag declared on its
//! ancestors, ancestors first. Hidden commands and hidden flags are left out.
//! When two registrations produce the same token, the first one wins and the
//! later one is dropped.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use command_complete_core::{CommandSpec, FlagSpec, validate_command};
use tracing::debug;

use crate::error::BuildError;

/// Compiled record for one flag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagToken {
    /// Whether the flag consumes the following token as its value.
    pub takes_value: bool,
}

/// One command in the compiled tree.
#[derive(Debug, Default)]
pub struct CompletionNode {
    children: HashMap<String, Arc<CompletionNode>>,
    flags: HashMap<String, FlagToken>,
}

impl CompletionNode {
    /// Looks up a child by command name or alias.
    pub fn child(&self, token: &str) -> Option<&CompletionNode> {
        self.children.get(token).map(Arc::as_ref)
    }

    /// Looks up a flag by its full token, dashes included.
    pub fn flag(&self, token: &str) -> Option<FlagToken> {
        self.flags.get(token).copied()
    }

    /// Child command tokens, in no particular order.
    pub fn child_tokens(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Flag tokens, in no particular order.
    pub fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    fn register_child(&mut self, token: &str, child: &Arc<CompletionNode>) {
        if token.is_empty() {
            return;
        }
        match self.children.entry(token.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(child));
            }
            Entry::Occupied(_) => debug!(token, "dropping colliding command token"),
        }
    }

    fn register_flag(&mut self, token: String, takes_value: bool) {
        match self.flags.entry(token) {
            Entry::Vacant(slot) => {
                slot.insert(FlagToken { takes_value });
            }
            Entry::Occupied(slot) => debug!(token = %slot.key(), "dropping colliding flag token"),
        }
    }

    fn register_flag_spec(&mut self, flag: &FlagSpec) {
        if let Some(long) = &flag.long {
            self.register_flag(format!("--{long}"), flag.takes_value);
        }
        for alias in &flag.aliases {
            self.register_flag(format!("--{alias}"), flag.takes_value);
        }
        if let Some(short) = flag.short {
            self.register_flag(format!("-{short}"), flag.takes_value);
        }
        if let Some(negated) = flag.negated_token() {
            self.register_flag(negated, false);
        }
    }
}

/// The compiled tree plus the names the program may be invoked as.
#[derive(Debug)]
pub struct CompiledTree {
    root: CompletionNode,
    program_names: Vec<String>,
}

impl CompiledTree {
    /// The node for the root command.
    pub fn root(&self) -> &CompletionNode {
        &self.root
    }

    /// Returns `true` if `word` invokes the root command.
    ///
    /// Compares the word's path basename against the root command's name and
    /// aliases, case-insensitively, with or without an `.exe` suffix.
    pub fn is_program_name(&self, word: &str) -> bool {
        let base = Path::new(word)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(word)
            .to_lowercase();
        let base = base.strip_suffix(".exe").unwrap_or(&base);

        self.program_names.iter().any(|name| name == base)
    }
}

/// Validates and compiles a command schema.
///
/// # Errors
///
/// Returns [`BuildError::Invalid`] if the schema fails validation.
///
/// # Examples
///
/// ```
/// use command_complete_core::{CommandSpec, FlagSpec};
/// use command_complete_engine::build_tree;
///
/// let spec = CommandSpec::new("gog")
///     .with_flag(FlagSpec::switch("color").negatable())
///     .with_child(CommandSpec::new("calendar").with_alias("cal"));
/// let tree = build_tree(&spec).unwrap();
///
/// assert!(tree.root().child("cal").is_some());
/// assert_eq!(tree.root().flag("--no-color").map(|f| f.takes_value), Some(false));
/// assert!(tree.is_program_name("/usr/local/bin/GOG.exe"));
/// ```
pub fn build_tree(spec: &CommandSpec) -> Result<CompiledTree, BuildError> {
    validate_command(spec)?;

    let started = Instant::now();
    let mut inherited = Vec::new();
    let root = build_node(spec, &mut inherited);
    let program_names = spec.names().map(str::to_lowercase).collect();

    debug!(
        command = %spec.name,
        elapsed = ?started.elapsed(),
        "compiled completion tree"
    );

    Ok(CompiledTree {
        root,
        program_names,
    })
}

fn build_node<'a>(spec: &'a CommandSpec, inherited: &mut Vec<&'a FlagSpec>) -> CompletionNode {
    let mut node = CompletionNode::default();

    let scope = inherited.len();
    inherited.extend(spec.flags.iter().filter(|flag| !flag.hidden));
    for flag in inherited.iter() {
        node.register_flag_spec(flag);
    }

    for child in spec.children.iter().filter(|child| !child.hidden) {
        let built = Arc::new(build_node(child, inherited));
        for name in child.names() {
            node.register_child(name, &built);
        }
    }

    inherited.truncate(scope);
    node
}

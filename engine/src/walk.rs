//! Token replay against the compiled tree.
//!
//! The walker replays the words before the cursor to find the command the
//! cursor belongs to. It tracks three things explicitly in [`Walk`]: the
//! current node, whether a `--` terminator was met, and whether the word
//! before the cursor is a flag still waiting for its value. [`resolve`]
//! folds a walk and the post-walk checks into a [`Resolution`].

use crate::tree::{CompiledTree, CompletionNode};

const TERMINATOR: &str = "--";

/// Why a request produces no suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSuggestions {
    /// The token list is empty.
    NothingToComplete,
    /// The cursor sits on a flag's value.
    NeedsValue,
    /// The cursor is at or after a `--` terminator.
    Terminator,
}

/// Outcome of resolving a request against the tree.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'t> {
    /// Complete the word at `cursor` among the entries of `node`.
    Complete {
        node: &'t CompletionNode,
        cursor: usize,
    },
    /// Nothing may be suggested.
    Empty(NoSuggestions),
}

/// State reached by replaying the words before the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Walk<'t> {
    /// Command the replay ended in.
    pub node: &'t CompletionNode,
    /// Index of the first `--`, if the replay stopped at one.
    pub terminator: Option<usize>,
    /// Set when the word just before the cursor is a value-taking flag.
    pub needs_value: bool,
}

/// Normalizes a shell-supplied cursor index.
///
/// A negative index selects the last word; an index past the end selects a
/// new, empty word after the last one. Returns `None` when there are no
/// words at all.
///
/// # Examples
///
/// ```
/// use command_complete_engine::normalize_cursor;
///
/// assert_eq!(normalize_cursor(-1, 3), Some(2));
/// assert_eq!(normalize_cursor(1, 3), Some(1));
/// assert_eq!(normalize_cursor(7, 3), Some(3));
/// assert_eq!(normalize_cursor(-1, 0), None);
/// ```
pub fn normalize_cursor(cword: isize, word_count: usize) -> Option<usize> {
    let cword = match usize::try_from(cword) {
        Ok(cword) => cword,
        Err(_) => word_count.checked_sub(1)?,
    };
    Some(cword.min(word_count))
}

/// Index of the first word to replay: 1 when the first word is the program
/// itself, 0 otherwise.
pub fn start_index<S: AsRef<str>>(tree: &CompiledTree, words: &[S]) -> usize {
    match words.first() {
        Some(first) if tree.is_program_name(first.as_ref()) => 1,
        _ => 0,
    }
}

/// Splits `--flag=value` into `("--flag", true)`; other words come back
/// whole with `false`.
pub fn split_flag_token(word: &str) -> (&str, bool) {
    match word.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (word, false),
    }
}

/// Replays `words[start..cursor]` from `root`.
///
/// Unknown subcommands and unknown flags never stop the replay; each step
/// advances at least one word.
pub fn walk<'t, S: AsRef<str>>(
    root: &'t CompletionNode,
    words: &[S],
    start: usize,
    cursor: usize,
) -> Walk<'t> {
    let mut node = root;
    let end = cursor.min(words.len());
    let mut i = start;

    while i < end {
        let word = words[i].as_ref();

        if word == TERMINATOR {
            return Walk {
                node,
                terminator: Some(i),
                needs_value: false,
            };
        }

        if word.starts_with('-') {
            let (token, inline_value) = split_flag_token(word);
            let takes_value =
                !inline_value && node.flag(token).is_some_and(|flag| flag.takes_value);
            if takes_value && i + 1 == cursor {
                return Walk {
                    node,
                    terminator: None,
                    needs_value: true,
                };
            }
            i += if takes_value { 2 } else { 1 };
            continue;
        }

        if let Some(child) = node.child(word) {
            node = child;
        }
        i += 1;
    }

    Walk {
        node,
        terminator: None,
        needs_value: false,
    }
}

/// Resolves a request to the node whose entries complete the cursor word.
///
/// # Examples
///
/// ```
/// use command_complete_core::{CommandSpec, FlagSpec};
/// use command_complete_engine::{NoSuggestions, Resolution, build_tree, resolve};
///
/// let tree = build_tree(
///     &CommandSpec::new("gog").with_flag(FlagSpec::with_value("account")),
/// )
/// .unwrap();
///
/// let words = ["gog", "--account", ""];
/// assert!(matches!(
///     resolve(&tree, 2, &words),
///     Resolution::Empty(NoSuggestions::NeedsValue)
/// ));
/// assert!(matches!(
///     resolve(&tree, 1, &words),
///     Resolution::Complete { cursor: 1, .. }
/// ));
/// ```
pub fn resolve<'t, S: AsRef<str>>(tree: &'t CompiledTree, cword: isize, words: &[S]) -> Resolution<'t> {
    let Some(cursor) = normalize_cursor(cword, words.len()) else {
        return Resolution::Empty(NoSuggestions::NothingToComplete);
    };

    let start = start_index(tree, words);
    let state = walk(tree.root(), words, start, cursor);

    if state.needs_value {
        return Resolution::Empty(NoSuggestions::NeedsValue);
    }
    if after_terminator(state.terminator, cursor, words) {
        return Resolution::Empty(NoSuggestions::Terminator);
    }
    if expects_flag_value(state.node, cursor, words, start) {
        return Resolution::Empty(NoSuggestions::NeedsValue);
    }

    Resolution::Complete {
        node: state.node,
        cursor,
    }
}

fn after_terminator<S: AsRef<str>>(terminator: Option<usize>, cursor: usize, words: &[S]) -> bool {
    if terminator.is_some_and(|index| cursor >= index) {
        return true;
    }
    words.get(cursor).is_some_and(|word| word.as_ref() == TERMINATOR)
}

fn expects_flag_value<S: AsRef<str>>(
    node: &CompletionNode,
    cursor: usize,
    words: &[S],
    start: usize,
) -> bool {
    if cursor <= start || cursor > words.len() {
        return false;
    }
    let previous = words[cursor - 1].as_ref();
    if !previous.starts_with('-') {
        return false;
    }
    let (token, inline_value) = split_flag_token(previous);
    !inline_value && node.flag(token).is_some_and(|flag| flag.takes_value)
}

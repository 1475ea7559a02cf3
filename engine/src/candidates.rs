//! Candidate generation for a resolved node.

use crate::tree::CompletionNode;

/// Returns the sorted completions of `current` at `node`.
///
/// A word starting with `-` is completed against flag tokens only;
/// anything else against both command tokens and flag tokens. Matching is
/// a case-sensitive prefix test, and the output is in byte order.
///
/// # Examples
///
/// ```
/// use command_complete_core::{CommandSpec, FlagSpec};
/// use command_complete_engine::{build_tree, candidates};
///
/// let tree = build_tree(
///     &CommandSpec::new("gog")
///         .with_flag(FlagSpec::switch("json"))
///         .with_child(CommandSpec::new("drive"))
///         .with_child(CommandSpec::new("docs")),
/// )
/// .unwrap();
///
/// assert_eq!(candidates(tree.root(), "d"), vec!["docs", "drive"]);
/// assert_eq!(candidates(tree.root(), ""), vec!["--json", "docs", "drive"]);
/// assert_eq!(candidates(tree.root(), "--"), vec!["--json"]);
/// ```
pub fn candidates(node: &CompletionNode, current: &str) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    if !current.starts_with('-') {
        suggestions.extend(matching(node.child_tokens(), current));
    }
    suggestions.extend(matching(node.flag_tokens(), current));
    suggestions.sort();
    suggestions
}

fn matching<'a>(
    tokens: impl Iterator<Item = &'a str>,
    prefix: &'a str,
) -> impl Iterator<Item = String> {
    tokens
        .filter(move |token| token.starts_with(prefix))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use command_complete_core::{CommandSpec, FlagSpec};

    use super::*;
    use crate::build_tree;

    #[test]
    fn test_flag_prefix_excludes_commands() {
        let tree = build_tree(
            &CommandSpec::new("gog")
                .with_flag(FlagSpec::switch("verbose").with_short('v'))
                .with_child(CommandSpec::new("version")),
        )
        .unwrap();

        assert_eq!(candidates(tree.root(), "-"), vec!["--verbose", "-v"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let tree = build_tree(
            &CommandSpec::new("gog")
                .with_child(CommandSpec::new("Calendar"))
                .with_child(CommandSpec::new("calendar")),
        )
        .unwrap();

        assert_eq!(candidates(tree.root(), "c"), vec!["calendar"]);
        assert_eq!(candidates(tree.root(), "C"), vec!["Calendar"]);
    }

    #[test]
    fn test_byte_order_sorting() {
        let tree = build_tree(
            &CommandSpec::new("gog")
                .with_flag(FlagSpec::switch("zeta"))
                .with_child(CommandSpec::new("beta"))
                .with_child(CommandSpec::new("Alpha"))
                .with_child(CommandSpec::new("alpha")),
        )
        .unwrap();

        assert_eq!(
            candidates(tree.root(), ""),
            vec!["--zeta", "Alpha", "alpha", "beta"]
        );
    }

    #[test]
    fn test_no_match() {
        let tree = build_tree(&CommandSpec::new("gog").with_child(CommandSpec::new("drive"))).unwrap();
        assert!(candidates(tree.root(), "x").is_empty());
    }
}

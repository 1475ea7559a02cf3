//! Structural schema validation.
//!
//! Catches command trees that cannot be compiled into a completion tree:
//! empty or malformed names, flags without any spelling and negation on
//! flags that take a value. Duplicate names are not rejected here; the
//! completion tree resolves them with a first-registration-wins policy.
//!
//! # Examples
//!
//! ```
//! use command_complete_core::*;
//!
//! let gog = CommandSpec::new("gog").with_flag(FlagSpec::switch("json"));
//! assert!(validate_command(&gog).is_ok());
//!
//! // Invalid: a value-taking flag cannot be negated
//! let bad = CommandSpec::new("gog").with_flag(FlagSpec::with_value("account").negatable());
//! assert!(matches!(
//!     validate_command(&bad),
//!     Err(SchemaError::NegatedValueFlag { .. })
//! ));
//! ```

use thiserror::Error;

use crate::{CommandSpec, FlagSpec, Negation};

/// Schema validation errors.
///
/// Every variant carries the space-separated command path where the problem
/// was found (e.g. `gog calendar list`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command name is empty, starts with a dash or contains whitespace.
    #[error("invalid command name `{name}` under `{path}`")]
    InvalidCommandName { path: String, name: String },
    /// Command alias is empty, starts with a dash or contains whitespace.
    #[error("invalid alias `{alias}` for `{path}`")]
    InvalidAlias { path: String, alias: String },
    /// A flag has neither a long nor a short form.
    #[error("flag in `{path}` must define a long or short form")]
    MissingFlagName { path: String },
    /// Long name or long alias is empty, starts with a dash, or contains `=`
    /// or whitespace.
    #[error("invalid long flag `{name}` in `{path}`")]
    InvalidLongFlag { path: String, name: String },
    /// Short form is a dash, `=` or whitespace.
    #[error("invalid short flag `{short}` in `{path}`")]
    InvalidShortFlag { path: String, short: char },
    /// A flag that takes a value declares a negated form.
    #[error("flag `{flag}` in `{path}` takes a value and cannot be negated")]
    NegatedValueFlag { path: String, flag: String },
    /// Negated form has no valid spelling.
    #[error("invalid negation for flag `{flag}` in `{path}`")]
    InvalidNegation { path: String, flag: String },
}

/// Validates a command tree, returning the first problem found.
///
/// Hidden commands are validated too: they are skipped by completion, but a
/// malformed hidden command is still a malformed schema.
///
/// # Errors
///
/// Returns the first [`SchemaError`] in depth-first declaration order.
pub fn validate_command(spec: &CommandSpec) -> Result<(), SchemaError> {
    let mut path = Vec::new();
    validate_node(spec, &mut path)
}

fn validate_node<'a>(spec: &'a CommandSpec, path: &mut Vec<&'a str>) -> Result<(), SchemaError> {
    if !is_valid_word(&spec.name) {
        return Err(SchemaError::InvalidCommandName {
            path: path.join(" "),
            name: spec.name.clone(),
        });
    }

    path.push(&spec.name);

    for alias in &spec.aliases {
        if !is_valid_word(alias) {
            return Err(SchemaError::InvalidAlias {
                path: path.join(" "),
                alias: alias.clone(),
            });
        }
    }

    for flag in &spec.flags {
        validate_flag(flag, path)?;
    }

    for child in &spec.children {
        validate_node(child, path)?;
    }

    path.pop();
    Ok(())
}

fn validate_flag(flag: &FlagSpec, path: &[&str]) -> Result<(), SchemaError> {
    if flag.long.is_none() && flag.short.is_none() {
        return Err(SchemaError::MissingFlagName {
            path: path.join(" "),
        });
    }

    for name in flag.long.iter().chain(&flag.aliases) {
        if !is_valid_long(name) {
            return Err(SchemaError::InvalidLongFlag {
                path: path.join(" "),
                name: name.clone(),
            });
        }
    }

    if let Some(short) = flag.short {
        if short == '-' || short == '=' || short.is_whitespace() {
            return Err(SchemaError::InvalidShortFlag {
                path: path.join(" "),
                short,
            });
        }
    }

    let Some(negation) = &flag.negation else {
        return Ok(());
    };

    if flag.takes_value {
        return Err(SchemaError::NegatedValueFlag {
            path: path.join(" "),
            flag: flag.canonical_name(),
        });
    }

    let spelled = match negation {
        Negation::Prefixed => flag.long.is_some(),
        Negation::Custom(name) => is_valid_long(name),
    };
    if !spelled {
        return Err(SchemaError::InvalidNegation {
            path: path.join(" "),
            flag: flag.canonical_name(),
        });
    }

    Ok(())
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && !word.starts_with('-') && !word.chars().any(char::is_whitespace)
}

fn is_valid_long(name: &str) -> bool {
    is_valid_word(name) && !name.contains('=')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gog() -> CommandSpec {
        CommandSpec::new("gog")
            .with_flag(FlagSpec::with_value("account").with_short('a'))
            .with_flag(FlagSpec::switch("color").negatable())
            .with_child(
                CommandSpec::new("calendar")
                    .with_alias("cal")
                    .with_child(CommandSpec::new("list").with_flag(FlagSpec::switch("json"))),
            )
    }

    #[test]
    fn test_validate_accepts_valid_schema() {
        assert_eq!(validate_command(&gog()), Ok(()));
    }

    #[test]
    fn test_validate_accepts_duplicate_names() {
        let spec = CommandSpec::new("gog")
            .with_flag(FlagSpec::switch("json"))
            .with_flag(FlagSpec::switch("json"))
            .with_child(CommandSpec::new("drive"))
            .with_child(CommandSpec::new("docs").with_alias("drive"));

        assert_eq!(validate_command(&spec), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_child_name_with_path() {
        let mut spec = gog();
        spec.children[0].children.push(CommandSpec::new(""));

        assert_eq!(
            validate_command(&spec),
            Err(SchemaError::InvalidCommandName {
                path: "gog calendar".to_string(),
                name: String::new(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_dashed_alias() {
        let spec = CommandSpec::new("gog").with_child(CommandSpec::new("drive").with_alias("-d"));

        assert_eq!(
            validate_command(&spec),
            Err(SchemaError::InvalidAlias {
                path: "gog drive".to_string(),
                alias: "-d".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_unnamed_flag() {
        let spec = CommandSpec::new("gog").with_flag(FlagSpec::default());

        assert_eq!(
            validate_command(&spec),
            Err(SchemaError::MissingFlagName {
                path: "gog".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_long_names() {
        for name in ["", "--json", "out=file", "two words"] {
            let spec = CommandSpec::new("gog").with_flag(FlagSpec::switch(name));
            assert!(
                matches!(validate_command(&spec), Err(SchemaError::InvalidLongFlag { .. })),
                "expected `{name}` to be rejected"
            );
        }

        let spec = CommandSpec::new("gog").with_flag(FlagSpec::switch("json").with_alias("j=1"));
        assert!(matches!(
            validate_command(&spec),
            Err(SchemaError::InvalidLongFlag { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_short_forms() {
        for short in ['-', '=', ' '] {
            let spec = CommandSpec::new("gog").with_flag(FlagSpec::short_only(short, false));
            assert!(matches!(
                validate_command(&spec),
                Err(SchemaError::InvalidShortFlag { .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_negated_value_flag() {
        let mut spec = gog();
        spec.children[0].children[0]
            .flags
            .push(FlagSpec::with_value("from").negatable());

        assert_eq!(
            validate_command(&spec),
            Err(SchemaError::NegatedValueFlag {
                path: "gog calendar list".to_string(),
                flag: "--from".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_unspellable_negation() {
        let short_only = CommandSpec::new("gog").with_flag(FlagSpec::short_only('q', false).negatable());
        assert!(matches!(
            validate_command(&short_only),
            Err(SchemaError::InvalidNegation { .. })
        ));

        let custom = CommandSpec::new("gog").with_flag(FlagSpec::switch("verbose").negated_as(""));
        assert!(matches!(
            validate_command(&custom),
            Err(SchemaError::InvalidNegation { .. })
        ));
    }

    #[test]
    fn test_validate_checks_hidden_commands() {
        let spec = CommandSpec::new("gog")
            .with_child(CommandSpec::new("internal").hidden().with_flag(FlagSpec::default()));

        assert!(matches!(
            validate_command(&spec),
            Err(SchemaError::MissingFlagName { .. })
        ));
    }
}

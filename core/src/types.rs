//! Schema type definitions for command trees.
//!
//! A schema is a plain tree of [`CommandSpec`] records. Every node has the
//! same shape (name, aliases, hidden flag, flags, children), so consumers
//! walk it recursively without any dispatch on node kind. The types are
//! serde records and load unchanged from JSON or YAML.

use serde::{Deserialize, Serialize};

/// How a boolean flag spells its negated form.
///
/// # Examples
///
/// ```
/// use command_complete_core::{FlagSpec, Negation};
///
/// let color = FlagSpec::switch("color").negatable();
/// assert_eq!(color.negation, Some(Negation::Prefixed));
/// assert_eq!(color.negated_token().as_deref(), Some("--no-color"));
///
/// let verbose = FlagSpec::switch("verbose").negated_as("quiet");
/// assert_eq!(verbose.negated_token().as_deref(), Some("--quiet"));
/// ```
///
/// Serialized as the string `prefixed` or as a `custom: <name>` map, which
/// reads the same in JSON and YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NegationRepr", into = "NegationRepr")]
pub enum Negation {
    /// The `--no-<long>` convention.
    Prefixed,
    /// A custom long name, registered as `--<name>`.
    Custom(String),
}

const PREFIXED: &str = "prefixed";

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NegationRepr {
    Keyword(String),
    Custom { custom: String },
}

impl TryFrom<NegationRepr> for Negation {
    type Error = String;

    fn try_from(repr: NegationRepr) -> Result<Self, Self::Error> {
        match repr {
            NegationRepr::Keyword(keyword) if keyword == PREFIXED => Ok(Self::Prefixed),
            NegationRepr::Keyword(other) => Err(format!(
                "unknown negation `{other}`, expected `{PREFIXED}` or `custom: <name>`"
            )),
            NegationRepr::Custom { custom } => Ok(Self::Custom(custom)),
        }
    }
}

impl From<Negation> for NegationRepr {
    fn from(negation: Negation) -> Self {
        match negation {
            Negation::Prefixed => Self::Keyword(PREFIXED.to_string()),
            Negation::Custom(custom) => Self::Custom { custom },
        }
    }
}

/// Schema for a command flag.
///
/// Names are stored without their leading dashes: a flag with
/// `long: Some("account")` and `short: Some('a')` is typed as `--account`
/// or `-a`.
///
/// # Examples
///
/// ```
/// use command_complete_core::FlagSpec;
///
/// let json = FlagSpec::switch("json").with_short('j');
/// assert!(!json.takes_value);
/// assert_eq!(json.canonical_name(), "--json");
///
/// let account = FlagSpec::with_value("account").with_alias("acct");
/// assert!(account.takes_value);
/// assert_eq!(account.aliases, vec!["acct"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    /// Canonical long name (e.g. "account" for `--account`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Additional long names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Single-character short form (e.g. 'a' for `-a`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Whether the flag consumes the following token as its value.
    /// False only for switches and counters.
    #[serde(default)]
    pub takes_value: bool,
    /// Negated spelling, for switches only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negation: Option<Negation>,
    /// Hidden flags are never offered as completions.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FlagSpec {
    /// Creates a switch (a flag that takes no value).
    pub fn switch(long: &str) -> Self {
        Self {
            long: Some(long.to_string()),
            ..Default::default()
        }
    }

    /// Creates a flag that consumes the following token as its value.
    pub fn with_value(long: &str) -> Self {
        Self {
            long: Some(long.to_string()),
            takes_value: true,
            ..Default::default()
        }
    }

    /// Creates a flag that only has a short form.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_complete_core::FlagSpec;
    ///
    /// let flag = FlagSpec::short_only('n', true);
    /// assert_eq!(flag.canonical_name(), "-n");
    /// assert!(flag.long.is_none());
    /// ```
    pub fn short_only(short: char, takes_value: bool) -> Self {
        Self {
            short: Some(short),
            takes_value,
            ..Default::default()
        }
    }

    /// Sets the short form.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a long alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Enables the `--no-<long>` negated form.
    pub fn negatable(mut self) -> Self {
        self.negation = Some(Negation::Prefixed);
        self
    }

    /// Enables a custom negated form, typed as `--<name>`.
    pub fn negated_as(mut self, name: &str) -> Self {
        self.negation = Some(Negation::Custom(name.to_string()));
        self
    }

    /// Marks the flag as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Returns the name used in messages: `--long` when present, else `-s`.
    pub fn canonical_name(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => "<unnamed>".to_string(),
        }
    }

    /// Returns the negated token, if the flag declares one.
    ///
    /// A prefixed negation on a flag without a long name has no spelling and
    /// yields `None`.
    pub fn negated_token(&self) -> Option<String> {
        match self.negation.as_ref()? {
            Negation::Prefixed => self.long.as_ref().map(|long| format!("--no-{long}")),
            Negation::Custom(name) => Some(format!("--{name}")),
        }
    }
}

/// Schema for a command and, recursively, its subcommands.
///
/// # Examples
///
/// ```
/// use command_complete_core::{CommandSpec, FlagSpec};
///
/// let gog = CommandSpec::new("gog")
///     .with_flag(FlagSpec::with_value("account").with_short('a'))
///     .with_child(
///         CommandSpec::new("calendar")
///             .with_alias("cal")
///             .with_child(CommandSpec::new("list").with_flag(FlagSpec::switch("json"))),
///     );
///
/// assert_eq!(gog.find_child("cal").unwrap().name, "calendar");
/// assert!(gog.find_child("drive").is_none());
/// assert_eq!(gog.child_names(), vec!["calendar"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name as typed on the command line.
    pub name: String,
    /// Alternative names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Hidden commands (and everything below them) are never completed.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Flags declared on this command. Descendants inherit them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagSpec>,
    /// Subcommands, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CommandSpec>,
}

impl CommandSpec {
    /// Creates a command with the given name and nothing else.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Adds a flag.
    pub fn with_flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }

    /// Adds a subcommand.
    pub fn with_child(mut self, child: CommandSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Marks the command as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Finds a direct subcommand by name or alias.
    pub fn find_child(&self, name: &str) -> Option<&CommandSpec> {
        self.children.iter().find(|c| c.names().any(|n| n == name))
    }

    /// Gets all direct subcommand names.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_token() {
        assert_eq!(
            FlagSpec::switch("color").negatable().negated_token(),
            Some("--no-color".to_string())
        );
        assert_eq!(
            FlagSpec::switch("verbose").negated_as("quiet").negated_token(),
            Some("--quiet".to_string())
        );
        assert_eq!(FlagSpec::switch("json").negated_token(), None);
        assert_eq!(
            FlagSpec::short_only('x', false).negatable().negated_token(),
            None
        );
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(FlagSpec::switch("json").with_short('j').canonical_name(), "--json");
        assert_eq!(FlagSpec::short_only('j', false).canonical_name(), "-j");
        assert_eq!(FlagSpec::default().canonical_name(), "<unnamed>");
    }

    #[test]
    fn test_find_child_by_alias() {
        let root = CommandSpec::new("gog")
            .with_child(CommandSpec::new("calendar").with_alias("cal"))
            .with_child(CommandSpec::new("drive"));

        assert_eq!(root.find_child("calendar").unwrap().name, "calendar");
        assert_eq!(root.find_child("cal").unwrap().name, "calendar");
        assert!(root.find_child("Calendar").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "name": "gog",
            "flags": [{ "long": "account", "short": "a", "takes_value": true }],
            "children": [{ "name": "drive", "hidden": true }]
        }"#;
        let spec: CommandSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.name, "gog");
        assert!(spec.aliases.is_empty());
        assert!(!spec.hidden);
        assert_eq!(spec.flags[0], FlagSpec::with_value("account").with_short('a'));
        assert!(spec.children[0].hidden);
        assert!(spec.children[0].flags.is_empty());
    }

    #[test]
    fn test_deserialize_negation_forms() {
        let json = r#"[
            { "long": "color", "negation": "prefixed" },
            { "long": "verbose", "negation": { "custom": "quiet" } }
        ]"#;
        let flags: Vec<FlagSpec> = serde_json::from_str(json).unwrap();

        assert_eq!(flags[0].negation, Some(Negation::Prefixed));
        assert_eq!(flags[1].negation, Some(Negation::Custom("quiet".into())));
    }

    #[test]
    fn test_serialize_negation_forms() {
        let color = serde_json::to_value(FlagSpec::switch("color").negatable()).unwrap();
        let verbose = serde_json::to_value(FlagSpec::switch("verbose").negated_as("quiet")).unwrap();

        assert_eq!(color["negation"], serde_json::json!("prefixed"));
        assert_eq!(verbose["negation"], serde_json::json!({ "custom": "quiet" }));
    }

    #[test]
    fn test_deserialize_rejects_unknown_negation() {
        let result = serde_json::from_str::<FlagSpec>(r#"{ "long": "color", "negation": "always" }"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown negation `always`"), "{err}");
    }
}

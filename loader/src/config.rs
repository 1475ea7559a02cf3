//! Completer configuration.
//!
//! Loaded from a YAML file passed with `--config`. Every field is optional.
//!
//! # Example YAML
//!
//! ```yaml
//! schema: schemas/gog.yaml
//! program_names:
//!   - gogcli
//!   - gog-dev
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use command_complete_core::CommandSpec;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for a completer process.
///
/// # Examples
///
/// ```
/// use command_complete_core::CommandSpec;
/// use command_complete_loader::CompleterConfig;
///
/// let config: CompleterConfig = serde_yaml::from_str("program_names: [gogcli]").unwrap();
/// assert!(config.schema.is_none());
///
/// let mut spec = CommandSpec::new("gog");
/// config.apply(&mut spec);
/// assert_eq!(spec.aliases, vec!["gogcli"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleterConfig {
    /// Schema file to complete against.
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// Extra names the program may be invoked as, besides the schema's root
    /// command name and aliases.
    #[serde(default)]
    pub program_names: Vec<String>,
}

impl CompleterConfig {
    /// Loads configuration from a YAML file.
    ///
    /// A relative `schema` path is resolved against the directory holding the
    /// configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::LoaderError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::LoaderError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut config: Self = serde_yaml::from_reader(reader)?;

        if let (Some(schema), Some(base)) = (config.schema.as_mut(), path.parent()) {
            if schema.is_relative() {
                *schema = base.join(&*schema);
            }
        }

        Ok(config)
    }

    /// Appends the configured program names to the root command's aliases,
    /// skipping names it already answers to.
    pub fn apply(&self, spec: &mut CommandSpec) {
        for name in &self.program_names {
            if !spec.names().any(|existing| existing == name) {
                spec.aliases.push(name.clone());
            }
        }
    }
}

//! Schema file loading.
//!
//! A schema file holds one [`CommandSpec`] tree, as JSON or YAML. The format
//! is picked from the file extension; anything other than `.yaml`/`.yml` is
//! read as JSON.
//!
//! ```no_run
//! use command_complete_loader::load_schema;
//!
//! let spec = load_schema("schemas/gog.yaml").unwrap();
//! println!("{} has {} subcommands", spec.name, spec.children.len());
//! ```

use std::io::BufReader;
use std::path::Path;

use command_complete_core::CommandSpec;
use tracing::debug;

use crate::error::Result;

/// Serialization format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Picks the format from a path's extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use command_complete_loader::SchemaFormat;
    ///
    /// assert_eq!(SchemaFormat::from_path("gog.yml"), SchemaFormat::Yaml);
    /// assert_eq!(SchemaFormat::from_path("gog.YAML"), SchemaFormat::Yaml);
    /// assert_eq!(SchemaFormat::from_path("gog.json"), SchemaFormat::Json);
    /// assert_eq!(SchemaFormat::from_path("gog"), SchemaFormat::Json);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Loads a schema file.
///
/// # Errors
///
/// Returns [`IoError`](crate::LoaderError::IoError) if the file cannot be
/// read, or [`JsonError`](crate::LoaderError::JsonError) /
/// [`YamlError`](crate::LoaderError::YamlError) if parsing fails.
pub fn load_schema(path: impl AsRef<Path>) -> Result<CommandSpec> {
    let path = path.as_ref();
    let format = SchemaFormat::from_path(path);
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let spec = match format {
        SchemaFormat::Json => serde_json::from_reader(reader)?,
        SchemaFormat::Yaml => serde_yaml::from_reader(reader)?,
    };

    debug!(path = %path.display(), ?format, "loaded schema file");
    Ok(spec)
}

/// Parses schema text in the given format.
///
/// # Examples
///
/// ```
/// use command_complete_loader::{SchemaFormat, parse_schema};
///
/// let spec = parse_schema("name: gog\nchildren:\n  - name: drive\n", SchemaFormat::Yaml).unwrap();
/// assert_eq!(spec.child_names(), vec!["drive"]);
/// ```
pub fn parse_schema(raw: &str, format: SchemaFormat) -> Result<CommandSpec> {
    let spec = match format {
        SchemaFormat::Json => serde_json::from_str(raw)?,
        SchemaFormat::Yaml => serde_yaml::from_str(raw)?,
    };
    Ok(spec)
}

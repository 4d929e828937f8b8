//! Structure file loading and validation.
//!
//! The structure file declares the documentation tree. YAML is the primary
//! format; JSON and TOML files are accepted as well, chosen by extension.
//!
//! ```yaml
//! main_title: Rule Book          # Heading of the root README.md
//! add_index_numbers: true        # Accepted for compatibility, not consulted
//! image_base_url: https://...    # Optional, where {img:...} resources live
//! go_back_label: "<- ATRAS"      # Optional, label of the back link
//!
//! structure:
//!   introduction:                # -> 00_introduction/
//!     title: Welcome             # Optional, defaults to "Introduction"
//!     readme: "Read me first\n{img:cover.png}"
//!   rules:                       # -> 10_rules/
//!     go_back: true              # Link back to the parent README
//!     contents:
//!       setup:                   # -> 10_rules/00_setup/
//!         readme: Shuffle the deck
//!       turns:                   # -> 10_rules/10_turns/
//! ```
//!
//! ## Ordering
//!
//! Declaration order is significant: it decides directory numbering and the
//! order of every table of contents. All three formats are read into an
//! ordered YAML value first, so no format reorders keys.
//!
//! ## Validation
//!
//! The raw tree is checked once, at load time, and turned into typed
//! [`NodeConfig`] records. A malformed node (wrong field type, unknown key,
//! non-mapping definition, unusable name) fails the whole load with the
//! node's path in the message. Nothing is written when the structure file is
//! invalid.

use crate::naming;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Image host used when the structure file does not set `image_base_url`.
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://github.com/jachiev8a/resident-evil-rule-book/blob/master/_python/img/";

/// Back-link label used when the structure file does not set `go_back_label`.
pub const DEFAULT_GO_BACK_LABEL: &str = "<- ATRAS";

/// Structure file looked up when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "readme-tree.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid structure file: {0}")]
    InvalidStructure(String),
    #[error("Unsupported structure file (expected .yaml, .yml, .json or .toml): {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Invalid node '{path}': {message}")]
    InvalidNode { path: String, message: String },
}

/// Serialized form of a structure file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A validated structure file.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub main_title: String,
    pub add_index_numbers: bool,
    /// Top-level sections in declaration order.
    pub structure: Vec<NodeEntry>,
    pub render: RenderOptions,
}

/// Settings that shape rendered README content.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Prefix for `{img:...}` resources; the identifier is appended as-is.
    pub image_base_url: String,
    pub go_back_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            go_back_label: DEFAULT_GO_BACK_LABEL.to_string(),
        }
    }
}

/// A named node, as declared under `structure` or a `contents` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry {
    pub name: String,
    pub config: NodeConfig,
}

/// Definition of a single node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeConfig {
    pub title: Option<String>,
    /// Raw text with placeholders and escaped newlines still in place.
    pub readme: Option<String>,
    pub go_back: bool,
    /// Children in declaration order. Empty for leaves.
    pub contents: Vec<NodeEntry>,
}

impl NodeConfig {
    pub fn is_leaf(&self) -> bool {
        self.contents.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfiguration {
    main_title: String,
    #[serde(default)]
    add_index_numbers: bool,
    #[serde(default)]
    structure: Option<Mapping>,
    #[serde(default)]
    image_base_url: Option<String>,
    #[serde(default)]
    go_back_label: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawNode {
    title: Option<String>,
    readme: Option<String>,
    go_back: Option<bool>,
    contents: Option<Mapping>,
}

/// Load and validate a structure file, picking the format by extension.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_config(&content, format)
}

/// Parse and validate structure file content.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Configuration, ConfigError> {
    let value: Value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Toml => toml::from_str(content)?,
    };
    config_from_value(value)
}

/// Validate an already-parsed tree into a [`Configuration`].
pub fn config_from_value(value: Value) -> Result<Configuration, ConfigError> {
    let raw: RawConfiguration = serde_yaml::from_value(value)
        .map_err(|e| ConfigError::InvalidStructure(e.to_string()))?;
    let structure = match raw.structure {
        Some(mapping) => parse_entries(mapping, "")?,
        None => Vec::new(),
    };
    let defaults = RenderOptions::default();
    Ok(Configuration {
        main_title: raw.main_title,
        add_index_numbers: raw.add_index_numbers,
        structure,
        render: RenderOptions {
            image_base_url: raw.image_base_url.unwrap_or(defaults.image_base_url),
            go_back_label: raw.go_back_label.unwrap_or(defaults.go_back_label),
        },
    })
}

fn parse_entries(mapping: Mapping, parent_path: &str) -> Result<Vec<NodeEntry>, ConfigError> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let name = node_name(key, parent_path)?;
            let path = node_path(parent_path, &name);
            let config = parse_node(value, &path)?;
            Ok(NodeEntry { name, config })
        })
        .collect()
}

fn node_path(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else {
        format!("{parent_path}/{name}")
    }
}

fn node_name(key: Value, parent_path: &str) -> Result<String, ConfigError> {
    let name = match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => {
            return Err(ConfigError::InvalidNode {
                path: parent_path.to_string(),
                message: format!("node names must be strings, found {other:?}"),
            });
        }
    };
    if !naming::is_valid_node_name(&name) {
        return Err(ConfigError::InvalidNode {
            path: node_path(parent_path, &name),
            message: "node names must be a single, non-empty path segment".to_string(),
        });
    }
    Ok(name)
}

fn parse_node(value: Value, path: &str) -> Result<NodeConfig, ConfigError> {
    // `name:` with nothing after it declares an empty leaf.
    let raw: RawNode = match value {
        Value::Null => RawNode::default(),
        Value::Mapping(_) => {
            serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidNode {
                path: path.to_string(),
                message: e.to_string(),
            })?
        }
        other => {
            return Err(ConfigError::InvalidNode {
                path: path.to_string(),
                message: format!("expected a mapping, found {}", value_kind(&other)),
            });
        }
    };

    let contents = match raw.contents {
        Some(mapping) => parse_entries(mapping, path)?,
        None => Vec::new(),
    };

    Ok(NodeConfig {
        title: raw.title,
        readme: raw.readme,
        go_back: raw.go_back.unwrap_or(false),
        contents,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Resolve the worker count for sibling generation.
///
/// - `0` → use all available cores
/// - `n` → use `min(n, cores)`
pub fn effective_jobs(requested: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    if requested == 0 {
        cores
    } else {
        requested.min(cores)
    }
}

/// Returns a fully-commented stock structure file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_yaml() -> &'static str {
    r##"# readme-tree structure file
# ==========================
# Every node under `structure` becomes a directory with a README.md.
# Directories are numbered by declaration order: the first sibling is
# 00_<name>, the second 10_<name>, the third 20_<name>, and so on.

# Heading of the root README.md.
main_title: My Documentation

# Accepted for compatibility with older structure files; not consulted.
add_index_numbers: true

# Where {img:<file>} placeholders point. The file name is appended as-is.
# image_base_url: "https://github.com/<user>/<repo>/blob/master/img/"

# Label of the back link emitted for nodes with `go_back: true`.
# go_back_label: "<- ATRAS"

structure:
  introduction:
    # Optional. Defaults to the node name, capitalized, with underscores
    # replaced by spaces ("Introduction").
    title: Welcome
    # Optional. Literal "\n" sequences become line breaks; {img:<file>}
    # becomes image markup. Other {kind:id} markers are kept as written.
    readme: "Start here.\\n{img:cover.png}"

  getting_started:
    # Adds a link back to the parent README at the top of this one.
    go_back: true
    readme: "Everything you need before the first session."
    # Children, same shape as any node. Listed in this node's README.
    contents:
      setup:
        go_back: true
        readme: "Shuffle the deck."
      first_turn:
        go_back: true
"##
}

//! Shared test utilities for the readme-tree test suite.
//!
//! Builders for structure entries and summaries, so tests can describe a
//! tree inline instead of going through a structure file.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let config = config_with("Book", vec![
//!     leaf("intro", Some("hello")),
//!     parent("rules", None, vec![leaf("setup", None)]),
//! ]);
//! ```

use crate::config::{Configuration, NodeConfig, NodeEntry, RenderOptions};
use crate::node::NodeSummary;
use std::path::PathBuf;

// =========================================================================
// Structure builders
// =========================================================================

/// A node without children.
pub fn leaf(name: &str, readme: Option<&str>) -> NodeEntry {
    parent(name, readme, Vec::new())
}

/// A node with the given children, in order.
pub fn parent(name: &str, readme: Option<&str>, contents: Vec<NodeEntry>) -> NodeEntry {
    NodeEntry {
        name: name.to_string(),
        config: NodeConfig {
            title: None,
            readme: readme.map(str::to_string),
            go_back: false,
            contents,
        },
    }
}

/// A configuration with default render options.
pub fn config_with(main_title: &str, structure: Vec<NodeEntry>) -> Configuration {
    Configuration {
        main_title: main_title.to_string(),
        add_index_numbers: true,
        structure,
        render: RenderOptions::default(),
    }
}

// =========================================================================
// Summary builders
// =========================================================================

/// A leaf summary, for testing renderers without running generation.
pub fn summary(title: &str, relative_path: &str) -> NodeSummary {
    NodeSummary {
        name: relative_path.to_string(),
        title: title.to_string(),
        relative_path: relative_path.to_string(),
        readme_path: PathBuf::from(relative_path).join("README.md"),
        unresolved: Vec::new(),
        children: Vec::new(),
    }
}

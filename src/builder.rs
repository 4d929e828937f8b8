//! Tree builder: the top-level driver of a generation run.
//!
//! Takes a validated [`Configuration`] and a project root, generates one
//! top-level section per `structure` entry (in declaration order), then
//! writes `<project root>/README.md` linking to every section:
//!
//! ```text
//! project/
//! ├── README.md                  # Root index: main title + section links
//! ├── 00_introduction/
//! │   └── README.md
//! └── 10_rules/
//!     ├── README.md              # Written after both children
//!     ├── 00_setup/
//!     │   └── README.md
//!     └── 10_turns/
//!         └── README.md
//! ```
//!
//! An empty or absent `structure` still produces a root index with the title
//! and a horizontal rule.

use crate::config::Configuration;
use crate::node::{self, NodeSummary, RenderContext};
use crate::render::{self, README_FILE};
use crate::writer::{TreeWriter, WriteError};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub project_root: PathBuf,
    pub index_path: PathBuf,
    /// Top-level sections in declaration order, each with its subtree.
    pub sections: Vec<NodeSummary>,
}

impl GenerateReport {
    /// Number of generated nodes, root index excluded.
    pub fn node_count(&self) -> usize {
        self.sections.iter().map(NodeSummary::subtree_len).sum()
    }
}

pub struct TreeBuilder<'a> {
    project_root: PathBuf,
    config: &'a Configuration,
    parallel: bool,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(project_root: impl Into<PathBuf>, config: &'a Configuration) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            parallel: false,
        }
    }

    /// Generate sibling subtrees on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Write the whole tree, then the root index.
    ///
    /// Any write failure aborts the run; files written before the failure
    /// are left in place.
    pub fn generate(&self, writer: &dyn TreeWriter) -> Result<GenerateReport, WriteError> {
        writer.create_dir(&self.project_root)?;

        let ctx = RenderContext {
            project_root: &self.project_root,
            options: &self.config.render,
            parallel: self.parallel,
        };
        let sections = node::generate_entries(&self.config.structure, None, ctx, writer)?;
        for section in &sections {
            info!(
                section = %section.relative_path,
                nodes = section.subtree_len(),
                "generated section"
            );
        }

        let index_path = self.project_root.join(README_FILE);
        let index = render::root_index(&self.config.main_title, &sections);
        writer.write_file(&index_path, &index)?;

        Ok(GenerateReport {
            project_root: self.project_root.clone(),
            index_path,
            sections,
        })
    }
}

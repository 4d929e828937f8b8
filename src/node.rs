//! The recursive node engine.
//!
//! A [`Node`] is one directory-plus-README unit of the output tree. It is
//! built from a [`NodeEntry`] and is fully resolved at construction: title,
//! directory path, relative path and placeholder-expanded text are known
//! before anything is written.
//!
//! ## Generation Order
//!
//! [`Node::generate`] walks the subtree depth-first:
//!
//! 1. create the node's directory (pre-order),
//! 2. generate every child in declaration order,
//! 3. write the node's README (post-order), with a table of contents built
//!    from the children's [`NodeSummary`] values.
//!
//! Each node writes exactly one README, and only after its whole subtree is
//! on disk, so a parent's table of contents always reflects the final titles
//! and paths of its children. Summaries are returned by value; nothing is
//! accumulated through shared state.
//!
//! ## Parallel Siblings
//!
//! With [`RenderContext::parallel`] set, sibling subtrees run on the rayon
//! pool. Results are collected in declaration order, so the written content
//! is identical to a sequential run. The first failure aborts the run.

use crate::config::{NodeEntry, RenderOptions};
use crate::naming;
use crate::placeholder::{self, Placeholder};
use crate::render::{self, README_FILE};
use crate::writer::{TreeWriter, WriteError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every node of one generation run.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Directory that holds the root index and the top-level sections.
    pub project_root: &'a Path,
    pub options: &'a RenderOptions,
    /// Generate sibling subtrees on the rayon pool.
    pub parallel: bool,
}

/// What a generated node reports back to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub name: String,
    pub title: String,
    /// Directory name, relative to the parent directory.
    pub relative_path: String,
    pub readme_path: PathBuf,
    /// Placeholders left as written because their kind is not `img`.
    pub unresolved: Vec<Placeholder>,
    pub children: Vec<NodeSummary>,
}

impl NodeSummary {
    /// Number of nodes in this subtree, this one included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(NodeSummary::subtree_len).sum::<usize>()
    }
}

#[derive(Debug)]
pub struct Node<'a> {
    name: &'a str,
    index: usize,
    title: String,
    directory_path: PathBuf,
    relative_path: String,
    readme: String,
    unresolved: Vec<Placeholder>,
    go_back: bool,
    children: &'a [NodeEntry],
    ctx: RenderContext<'a>,
}

impl<'a> Node<'a> {
    /// Build a node at position `index` among its siblings.
    ///
    /// `parent_dir` is the parent's directory; top-level nodes pass `None`
    /// and land directly under the project root.
    pub fn new(
        entry: &'a NodeEntry,
        parent_dir: Option<&Path>,
        index: usize,
        ctx: RenderContext<'a>,
    ) -> Self {
        let config = &entry.config;
        let relative_path = naming::directory_name(&entry.name, index);
        let directory_path = parent_dir
            .unwrap_or(ctx.project_root)
            .join(&relative_path);
        // An empty title counts as unset.
        let title = config
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| naming::default_title(&entry.name));

        let raw = config.readme.as_deref().unwrap_or_default();
        let unresolved = placeholder::unresolved_placeholders(raw);
        for p in &unresolved {
            debug!(
                node = %entry.name,
                placeholder = %p.as_written(),
                "leaving placeholder as written"
            );
        }
        let readme = placeholder::resolve_readme(raw, &ctx.options.image_base_url);

        Self {
            name: &entry.name,
            index,
            title,
            directory_path,
            relative_path,
            readme,
            unresolved,
            go_back: config.go_back,
            children: &config.contents,
            ctx,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn directory_path(&self) -> &Path {
        &self.directory_path
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Readme text after placeholder expansion, without title or links.
    pub fn readme(&self) -> &str {
        &self.readme
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Write this node's subtree and return its summary.
    pub fn generate(&self, writer: &dyn TreeWriter) -> Result<NodeSummary, WriteError> {
        writer.create_dir(&self.directory_path)?;

        let children = if self.is_leaf() {
            debug!(node = self.name, "generating leaf node");
            Vec::new()
        } else {
            debug!(
                node = self.name,
                children = self.children.len(),
                "generating parent node"
            );
            generate_entries(self.children, Some(&self.directory_path), self.ctx, writer)?
        };

        let go_back_label = self
            .go_back
            .then_some(self.ctx.options.go_back_label.as_str());
        let content = render::node_readme(&self.title, &self.readme, &children, go_back_label);
        let readme_path = self.directory_path.join(README_FILE);
        writer.write_file(&readme_path, &content)?;

        Ok(NodeSummary {
            name: self.name.to_string(),
            title: self.title.clone(),
            relative_path: self.relative_path.clone(),
            readme_path,
            unresolved: self.unresolved.clone(),
            children,
        })
    }
}

/// Build and generate a list of sibling entries, returning their summaries
/// in declaration order.
pub fn generate_entries(
    entries: &[NodeEntry],
    parent_dir: Option<&Path>,
    ctx: RenderContext<'_>,
    writer: &dyn TreeWriter,
) -> Result<Vec<NodeSummary>, WriteError> {
    let generate_one = |(index, entry): (usize, &NodeEntry)| {
        Node::new(entry, parent_dir, index, ctx).generate(writer)
    };

    if ctx.parallel && entries.len() > 1 {
        entries.par_iter().enumerate().map(generate_one).collect()
    } else {
        entries.iter().enumerate().map(generate_one).collect()
    }
}

//! Markdown fragments for generated README files.
//!
//! All output is plain string assembly; the layout is fixed so that
//! regenerating an unchanged structure yields byte-identical files.
//!
//! ## Node README
//!
//! ```text
//!                                  <- back-navigation block (go_back only)
//! ---
//!
//! ### [<- ATRAS](../README.md)
//!
//! ---
//!
//!
//! ### Node Title
//!
//! Resolved readme text
//! - ### [CHILD ONE](00_child_one/README.md)      <- table of contents
//! - ### [CHILD TWO](10_child_two/README.md)
//! ```
//!
//! ## Root Index
//!
//! ```text
//! # Main Title
//!
//! ---
//!
//! - ### [FIRST SECTION](00_first_section/README.md)
//! ```

use crate::node::NodeSummary;

pub const HORIZONTAL_RULE: &str = "---\n\n";

/// File name written into every node directory and the project root.
pub const README_FILE: &str = "README.md";

/// The block linking a README back to its parent's.
pub fn go_back_block(label: &str) -> String {
    format!("\n{HORIZONTAL_RULE}### [{label}](../{README_FILE})\n\n{HORIZONTAL_RULE}\n")
}

/// One table-of-contents line pointing at a child's README.
pub fn toc_line(title: &str, relative_path: &str) -> String {
    format!(
        "- ### [{}]({relative_path}/{README_FILE})\n",
        title.to_uppercase()
    )
}

/// Table of contents for `entries`, in the order given.
pub fn table_of_contents(entries: &[NodeSummary]) -> String {
    entries
        .iter()
        .map(|e| toc_line(&e.title, &e.relative_path))
        .collect()
}

/// Full README content for a node.
///
/// `go_back_label` is `Some` when the node asked for a back link.
pub fn node_readme(
    title: &str,
    body: &str,
    children: &[NodeSummary],
    go_back_label: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(label) = go_back_label {
        out.push_str(&go_back_block(label));
    }
    out.push_str(&format!("\n### {title}\n\n"));
    out.push_str(body);
    if !children.is_empty() {
        out.push('\n');
        out.push_str(&table_of_contents(children));
    }
    out.push_str("\n\n");
    out
}

/// Root `README.md` listing the top-level sections.
pub fn root_index(main_title: &str, sections: &[NodeSummary]) -> String {
    format!(
        "# {main_title}\n\n{HORIZONTAL_RULE}{}",
        table_of_contents(sections)
    )
}

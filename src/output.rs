//! CLI output formatting.
//!
//! Output is **information-centric**: each node leads with its positional
//! index and title, and the README it produced follows as `→ path`.
//! Placeholders that were left unexpanded are shown as indented context
//! lines under their node.
//!
//! ```text
//! Index → README.md
//! 001 Introduction → 00_introduction/README.md
//! 002 Rules → 10_rules/README.md
//!     001 Setup → 10_rules/00_setup/README.md
//!         Unresolved: {note:dealer}
//!     002 Turns → 10_rules/10_turns/README.md
//!
//! Generated 4 nodes
//! ```
//!
//! Format functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write them to stdout.

use crate::builder::GenerateReport;
use crate::node::NodeSummary;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path of `path` relative to `root`, with `/` separators.
fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

fn format_node(
    node: &NodeSummary,
    position: usize,
    depth: usize,
    root: &Path,
    lines: &mut Vec<String>,
) {
    let base_indent = indent(depth);
    lines.push(format!(
        "{}{} {} \u{2192} {}",
        base_indent,
        format_index(position),
        node.title,
        display_path(&node.readme_path, root)
    ));
    for placeholder in &node.unresolved {
        lines.push(format!(
            "{}    Unresolved: {}",
            base_indent,
            placeholder.as_written()
        ));
    }
    for (i, child) in node.children.iter().enumerate() {
        format_node(child, i + 1, depth + 1, root, lines);
    }
}

/// Format the generated tree, one line per node in pre-order.
pub fn format_tree(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Index \u{2192} {}",
        display_path(&report.index_path, &report.project_root)
    )];
    for (i, section) in report.sections.iter().enumerate() {
        format_node(section, i + 1, 0, &report.project_root, &mut lines);
    }
    lines
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Format `generate` output: the tree plus a totals line.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = format_tree(report);
    let count = report.node_count();
    lines.push(String::new());
    lines.push(format!(
        "Generated {} node{} in {}",
        count,
        plural(count),
        report.project_root.display()
    ));
    lines
}

/// Format `check` output: the tree that would be written.
pub fn format_check_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = format_tree(report);
    let count = report.node_count();
    lines.push(String::new());
    lines.push(format!(
        "Structure is valid: {} node{}, nothing written",
        count,
        plural(count)
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

/// Print check output to stdout.
pub fn print_check_output(report: &GenerateReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

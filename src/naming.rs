//! Directory naming and display titles for structure nodes.
//!
//! Every node becomes a directory named `{index}0_{name}`, where `index` is
//! the node's 0-based position among its siblings:
//!
//! - `("intro", 0)` → `00_intro`
//! - `("rules", 1)` → `10_rules`
//! - `("extras", 3)` → `30_extras`
//!
//! The trailing zero leaves room to slot a directory in by hand between two
//! generated ones, and a plain directory listing shows siblings in the order
//! they were declared.
//!
//! ## Display Titles
//!
//! Nodes without an explicit `title` get one derived from their name: the
//! first letter is upper-cased and underscores become spaces.
//! - `getting_started` → "Getting started"
//! - `faq` → "Faq"

/// Directory name for the node at `index` among its siblings.
pub fn directory_name(name: &str, index: usize) -> String {
    format!("{index}0_{name}")
}

/// Title used when a node does not declare one.
pub fn default_title(name: &str) -> String {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    capitalized.replace('_', " ")
}

/// Whether `name` can be used as a single path segment.
///
/// Rejects empty names, separators, and the `.`/`..` segments, which would
/// place output outside the node's parent directory.
pub fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

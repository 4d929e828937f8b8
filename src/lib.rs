//! # readme-tree
//!
//! Renders a numbered tree of directories, each holding a `README.md`, from
//! a single declarative structure file. Every node of the structure becomes
//! a directory; parents link to their children through a generated table of
//! contents, and children can link back to their parent.
//!
//! ```text
//! structure file                      output
//! ──────────────                      ──────
//! main_title: Rule Book               README.md          (# Rule Book + links)
//! structure:
//!   intro:                            00_intro/README.md
//!     readme: "Start {img:a.png}"
//!   rules:                            10_rules/README.md (written last)
//!     contents:
//!       setup:                        10_rules/00_setup/README.md
//!       turns:                        10_rules/10_turns/README.md
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Structure file loading (YAML, JSON, TOML) and validation into typed nodes |
//! | [`naming`] | `{index}0_{name}` directory names and default titles |
//! | [`placeholder`] | `{kind:identifier}` expansion and `\n` unescaping |
//! | [`node`] | The recursive node engine |
//! | [`builder`] | Top-level driver: sections, then the root index |
//! | [`render`] | Markdown layout of node READMEs and the root index |
//! | [`writer`] | Filesystem capability trait with disk and in-memory writers |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Children Before Parents
//!
//! A parent's README embeds the titles and paths of its children, so it is
//! written only once every descendant is done. Children report back an
//! immutable [`node::NodeSummary`]; the parent renders its table of contents
//! from those values, with no shared accumulator between recursive calls.
//!
//! ## Validate Before Writing
//!
//! The structure file is turned into typed [`config::NodeConfig`] records at
//! load time. A malformed node fails the load with its path in the message,
//! before a single directory is created.
//!
//! ## Writers as Capabilities
//!
//! Generation only creates directories and writes files, through the
//! [`writer::TreeWriter`] trait. The `check` command runs the full generation
//! against [`writer::MemoryWriter`], so a dry run exercises exactly the same
//! code as a real one.
//!
//! ## Deterministic Output
//!
//! Sibling order is declaration order, directory numbers derive from it, and
//! the README layout is fixed. Regenerating an unchanged structure over an
//! existing tree rewrites every file with identical bytes, including when
//! sibling subtrees are generated in parallel.

pub mod builder;
pub mod config;
pub mod naming;
pub mod node;
pub mod output;
pub mod placeholder;
pub mod render;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;

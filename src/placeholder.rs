//! Resource placeholders inside `readme` text.
//!
//! A placeholder has the form `{kind:identifier}`, where `kind` is made of
//! word characters and `identifier` of word characters and dots:
//!
//! ```text
//! Board layout: {img:board.png}
//! ```
//!
//! Only the `img` kind is understood. It expands into image markup pointing
//! at the configured image host:
//!
//! ```text
//! Board layout: ![alt board.png](https://host/img/board.png?raw=true)
//! ```
//!
//! Every other kind is left in the text exactly as written. After
//! substitution, each literal `\n` (backslash followed by `n`) becomes a real
//! line break, so escaped newlines may sit right next to expanded markup.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w*):([\w.]*)\}").unwrap());

/// The one placeholder kind that gets expanded.
pub const IMAGE_KIND: &str = "img";

/// A placeholder found in raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: String,
    pub identifier: String,
}

impl Placeholder {
    /// The placeholder as it appears in text, braces included.
    pub fn as_written(&self) -> String {
        format!("{{{}:{}}}", self.kind, self.identifier)
    }

    pub fn is_image(&self) -> bool {
        self.kind == IMAGE_KIND
    }
}

/// All placeholders in `text`, left to right.
pub fn find_placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .map(|caps| Placeholder {
            kind: caps[1].to_string(),
            identifier: caps[2].to_string(),
        })
        .collect()
}

/// Placeholders of a kind that [`resolve_readme`] leaves untouched.
pub fn unresolved_placeholders(text: &str) -> Vec<Placeholder> {
    find_placeholders(text)
        .into_iter()
        .filter(|p| !p.is_image())
        .collect()
}

/// Image markup for a resource hosted under `base_url`.
pub fn image_markup(base_url: &str, resource: &str) -> String {
    format!("![alt {resource}]({base_url}{resource}?raw=true)")
}

/// Expand `img` placeholders, then turn escaped `\n` sequences into newlines.
pub fn resolve_readme(raw: &str, image_base_url: &str) -> String {
    let substituted = PLACEHOLDER_RE.replace_all(raw, |caps: &Captures| {
        if &caps[1] == IMAGE_KIND {
            image_markup(image_base_url, &caps[2])
        } else {
            caps[0].to_string()
        }
    });
    substituted.replace("\\n", "\n")
}

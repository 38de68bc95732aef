//! `index.rst` generation — a titled toctree over every written document.

use crate::render::{indent, normalize_whitespace, INDENT};
use std::path::{Component, Path};

/// Render an index page listing `documents` (paths relative to the index).
pub fn render_index(title: &str, documents: &[impl AsRef<Path>]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");

    let mut body = vec![":maxdepth: 1".to_string()];
    if !documents.is_empty() {
        body.push(String::new());
        body.extend(documents.iter().map(|d| toc_entry(d.as_ref())));
    }

    out.push_str(".. toctree::\n");
    out.push_str(&indent(&body.join("\n"), INDENT));
    out.push('\n');
    normalize_whitespace(&out)
}

/// Toctree entry for a document: `/`-separated and without extension.
///
/// `App/Models/User.rst` → `App/Models/User`
pub fn toc_entry(path: &Path) -> String {
    let stem = path.with_extension("");
    stem.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

//! Element renderers — one per reflected entity kind.
//!
//! Every renderer implements [`Element`]; the class document composes the
//! member fragments and runs the single whitespace cleanup pass.

pub mod class;
pub mod constant;
pub mod method;
pub mod property;

use crate::model::NS_SEPARATOR;

pub use class::ClassDocument;
pub use constant::ConstantElement;
pub use method::MethodElement;
pub use property::PropertyElement;

/// Width of one nesting level in the emitted markup.
pub const INDENT: usize = 4;

/// Extension of every generated document.
pub const FILE_EXTENSION: &str = "rst";

/// Trait for turning one reflected entity into a markup fragment.
///
/// Rendering is a pure function of the descriptor the element was built from.
pub trait Element {
    fn render(&self) -> String;
}

/// Prefix every line of `text` with `width` spaces, blank lines included.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cross-reference label: `App\Models\User` → `App-Models-User`.
pub fn label(name: &str) -> String {
    name.replace(NS_SEPARATOR, "-")
}

/// Escape namespace separators for reStructuredText: `App\User` → `App\\User`.
pub fn escape_name(name: &str) -> String {
    name.replace(NS_SEPARATOR, "\\\\")
}

/// `:ref:` role pointing at a class label.
pub fn reference(name: &str) -> String {
    format!(":ref:`{}`", label(name))
}

/// Strip trailing whitespace from every line; whitespace-only lines become empty.
///
/// Runs once over a finished document.
pub fn normalize_whitespace(text: &str) -> String {
    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A directive followed by its indented body blocks.
///
/// Blocks are separated by one blank line; empty blocks are skipped.
pub(crate) fn directive_block(directive: String, blocks: &[String]) -> String {
    let mut parts = vec![directive];
    for block in blocks.iter().filter(|b| !b.is_empty()) {
        parts.push(String::new());
        parts.push(indent(block, INDENT));
    }
    parts.join("\n")
}

/// One `:name: body` field, or a bare `:name:` flag when `body` is empty.
pub(crate) fn field(name: &str, body: &str) -> String {
    if body.is_empty() {
        format!(":{}:", name)
    } else {
        format!(":{}: {}", name, body)
    }
}

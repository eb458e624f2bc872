//! Rendering: signatures to display text, doc-string references to links, and the
//! cross-reference graph fed by both.

mod reference;
mod signature;
mod xref;

pub use reference::{resolve_references, LinkRenderer, MarkdownLinks, XmlLinks};
pub use signature::Formatter;
pub use xref::CrossReferenceGraph;

/// Wrap `text` in inline-code backticks.
#[must_use]
pub fn code(text: &str) -> String {
    format!("`{text}`")
}

/// A markdown list entry linking to `name`'s own document.
#[must_use]
pub fn link(name: &str) -> String {
    format!("- [`{name}`]({name})")
}

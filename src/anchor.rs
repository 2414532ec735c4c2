//! Markdown link and in-document anchor generation.
//!
//! Anchors follow the GitHub wiki rule the generated pages are published
//! under: the heading text lowercased.

/// Root of the wiki the generated pages link into.
pub const WIKI_BASE: &str = "https://github.com/kinnay/NintendoClients/wiki";

/// `[text](target)`
pub fn link(text: &str, target: &str) -> String {
    format!("[{}]({})", text, target)
}

/// Anchor of a class section in the Types appendix.
pub fn type_anchor(name: &str) -> String {
    format!("#{}", name.to_lowercase())
}

/// Anchor of the `# (id) name` method heading.
pub fn method_anchor(id: usize, name: &str) -> String {
    format!("#{}-{}", id, name.to_lowercase())
}

/// Link to an entry of the shared common-types glossary page.
pub fn common_type_url(term: &str) -> String {
    format!("{}/NEX-Common-Types#{}", WIKI_BASE, term.to_lowercase())
}

/// Link to the protocol index page.
pub fn protocols_link() -> String {
    link("NEX-Protocols", &format!("{}/NEX-Protocols", WIKI_BASE))
}

//! Metadata table formatting.

use std::path::{Component, Path};

/// Fixed table header row.
pub const TABLE_HEADER: &str = "| Title | Tags | Summary |";

/// Fixed table separator row.
pub const TABLE_SEPARATOR: &str = "|-------|------|---------|";

/// Tag cell value when a document has no tags.
pub const NOT_APPLICABLE: &str = "N/A";

/// Escape text for use inside a Markdown table cell.
///
/// Pipes and backticks are backslash-escaped, each line break becomes a
/// single space, and the result is trimmed.
pub fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '|' => out.push_str("\\|"),
            '`' => out.push_str("\\`"),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push(' ');
            }
            '\n' => out.push(' '),
            c => out.push(c),
        }
    }
    out.trim().to_owned()
}

/// Site-relative link target for a document under `site_root`.
///
/// `docs/guides/one.md` under `docs` becomes `/guides/one`. Returns `None`
/// for documents outside `site_root`.
pub fn site_path(doc: &Path, site_root: &Path) -> Option<String> {
    let rel = doc.strip_prefix(site_root).ok()?;
    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let last = parts.last_mut()?;
    if let Some(stem) = last.strip_suffix(".md") {
        *last = stem.to_owned();
    }

    Some(format!("/{}", parts.join("/")))
}

/// Formats raw tag strings for the Tags column.
#[derive(Clone, Debug)]
pub struct TagFormatter {
    acronyms: Vec<String>,
}

impl TagFormatter {
    /// Create a formatter that renders `acronyms` in their canonical form.
    #[must_use]
    pub fn new(acronyms: Vec<String>) -> Self {
        Self { acronyms }
    }

    /// Format a comma- or semicolon-separated tag string.
    ///
    /// Known acronyms use their canonical spelling, single lowercase words
    /// are capitalized, anything else is kept. Empty input yields `N/A`.
    #[must_use]
    pub fn format(&self, raw: &str) -> String {
        let tags: Vec<String> = raw
            .split([',', ';'])
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|t| !t.is_empty())
            .map(|t| self.format_tag(t))
            .collect();

        if tags.is_empty() {
            NOT_APPLICABLE.to_owned()
        } else {
            tags.join(", ")
        }
    }

    fn format_tag(&self, tag: String) -> String {
        if let Some(acronym) = self.acronyms.iter().find(|a| a.eq_ignore_ascii_case(&tag)) {
            return acronym.clone();
        }
        if is_lowercase_word(&tag) {
            let mut chars = tag.chars();
            if let Some(first) = chars.next() {
                return first.to_uppercase().chain(chars).collect();
            }
        }
        tag
    }
}

/// Single word with at least one cased character, none of them uppercase.
fn is_lowercase_word(tag: &str) -> bool {
    !tag.contains(char::is_whitespace)
        && tag.chars().any(char::is_lowercase)
        && !tag.chars().any(char::is_uppercase)
}

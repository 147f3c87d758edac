//! Final document assembly.

/// Marker line opening the generated block.
pub const START_MARKER: &str = "<!-- START OF AUTOMATICALLY GENERATED CONTENT -->";

/// Marker line closing the generated block.
pub const END_MARKER: &str = "<!-- END OF AUTOMATICALLY GENERATED CONTENT -->";

/// Preserved manual content plus a freshly generated body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// Lines preceding the start marker, ending in two blank lines.
    pub manual_prefix: Vec<String>,
    /// Generated Markdown lines.
    pub generated_body: Vec<String>,
}

impl GeneratedDocument {
    /// Assemble the final document text.
    #[must_use]
    pub fn stitch(&self) -> String {
        stitch(&self.manual_prefix, &self.generated_body)
    }
}

/// Join manual prefix, markers and generated body into the final text.
///
/// An empty body yields the prefix alone, without markers. Lines are joined
/// with `\n` and no trailing newline is added.
pub fn stitch(manual_prefix: &[String], generated_body: &[String]) -> String {
    if generated_body.is_empty() {
        return manual_prefix.join("\n");
    }

    let mut lines: Vec<&str> = Vec::with_capacity(manual_prefix.len() + generated_body.len() + 4);
    lines.extend(manual_prefix.iter().map(String::as_str));
    lines.push(START_MARKER);
    lines.push("");
    lines.extend(generated_body.iter().map(String::as_str));
    if generated_body.last().is_some_and(|l| !l.is_empty()) {
        lines.push("");
    }
    lines.push(END_MARKER);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_stitch_empty_body_is_prefix_only() {
        let text = stitch(&lines(&["# Index", "", ""]), &[]);
        assert_eq!(text, "# Index\n\n");
        assert!(!text.contains(START_MARKER));
    }

    #[test]
    fn test_stitch_with_body() {
        let doc = GeneratedDocument {
            manual_prefix: lines(&["# Index", "", ""]),
            generated_body: lines(&["## A", "", "| row |", ""]),
        };
        let expected = format!("# Index\n\n\n{START_MARKER}\n\n## A\n\n| row |\n\n{END_MARKER}");
        assert_eq!(doc.stitch(), expected);
    }

    #[test]
    fn test_stitch_adds_trailing_blank_when_missing() {
        let text = stitch(&lines(&["# T", "", ""]), &lines(&["## A"]));
        assert!(text.ends_with(&format!("## A\n\n{END_MARKER}")));
    }

    #[test]
    fn test_stitch_is_deterministic() {
        let prefix = lines(&["# T", "", ""]);
        let body = lines(&["## A", "", "x", ""]);
        assert_eq!(stitch(&prefix, &body), stitch(&prefix, &body));
    }
}

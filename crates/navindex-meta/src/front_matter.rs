//! Fenced front matter detection.

/// Line that opens and closes a front matter block.
pub const FENCE: &str = "---";

/// A document split at its front matter fences.
#[derive(Debug, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Raw text between the fences (may be empty).
    pub yaml: &'a str,
    /// Everything after the closing fence line.
    pub body: &'a str,
}

/// Split `text` into front matter and body.
///
/// The first non-blank line must be a fence; the block ends at the next
/// line that trims to a fence. Returns `None` when there is no opening
/// fence or the block is never closed.
pub fn split_front_matter(text: &str) -> Option<FrontMatter<'_>> {
    let mut lines = text.split_inclusive('\n');
    let mut offset = 0;

    let mut opened = false;
    for line in lines.by_ref() {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        opened = trimmed == FENCE;
        break;
    }
    if !opened {
        return None;
    }

    let yaml_start = offset;
    for line in lines {
        if line.trim() == FENCE {
            return Some(FrontMatter {
                yaml: &text[yaml_start..offset],
                body: &text[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let fm = split_front_matter("---\ntitle: A\n---\n# Body\n").unwrap();
        assert_eq!(fm.yaml, "title: A\n");
        assert_eq!(fm.body, "# Body\n");
    }

    #[test]
    fn test_split_skips_leading_blank_lines() {
        let fm = split_front_matter("\n  \n---\ntitle: A\n---\n").unwrap();
        assert_eq!(fm.yaml, "title: A\n");
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_split_crlf_and_padded_fences() {
        let fm = split_front_matter("--- \r\ntitle: A\r\n---\r\nbody").unwrap();
        assert_eq!(fm.yaml, "title: A\r\n");
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_split_closing_fence_without_newline() {
        let fm = split_front_matter("---\ntitle: A\n---").unwrap();
        assert_eq!(fm.yaml, "title: A\n");
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_split_empty_block() {
        let fm = split_front_matter("---\n---\ntext").unwrap();
        assert_eq!(fm.yaml, "");
        assert_eq!(fm.body, "text");
    }

    #[test]
    fn test_split_requires_fence_first() {
        assert!(split_front_matter("# Title\n---\ntitle: A\n---\n").is_none());
        assert!(split_front_matter("").is_none());
    }

    #[test]
    fn test_split_unclosed_block() {
        assert!(split_front_matter("---\ntitle: A\n# Body\n").is_none());
    }

    #[test]
    fn test_split_fence_must_be_bare() {
        // "----" and "--- x" are not fences
        assert!(split_front_matter("----\ntitle: A\n----\n").is_none());
        assert!(split_front_matter("---\ntitle: A\n--- x\n").is_none());
    }
}

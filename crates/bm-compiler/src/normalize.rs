//! Line normalization shared by every list dialect.

use regex::Regex;

const INLINE_COMMENT: &str = r"\s*#\s*[a-z0-9-].*$";

/// Lowercases and trims list lines and strips trailing inline comments.
#[derive(Debug, Clone)]
pub struct Normalizer {
    inline_comment: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            inline_comment: Regex::new(INLINE_COMMENT)?,
        })
    }

    /// Clean one raw line.
    ///
    /// Returns `None` for blank lines and lines that are entirely a comment.
    /// A `#` only starts an inline comment when an alphanumeric or `-`
    /// follows it, so `address=/x.com/#` survives intact.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let line = raw.trim().to_lowercase();
        if is_comment_line(&line) {
            return None;
        }

        Some(self.inline_comment.replace_all(&line, "").into_owned())
    }
}

fn is_comment_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new().unwrap()
    }

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalizer().normalize("  Ads.Example.COM \t"), Some("ads.example.com".to_string()));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let n = normalizer();
        assert_eq!(n.normalize(""), None);
        assert_eq!(n.normalize("   "), None);
        assert_eq!(n.normalize("# comment"), None);
        assert_eq!(n.normalize("   #indented comment"), None);
    }

    #[test]
    fn test_inline_comment_stripped() {
        let n = normalizer();
        assert_eq!(n.normalize("example.com # tracker"), Some("example.com".to_string()));
        assert_eq!(n.normalize("example.com #-note"), Some("example.com".to_string()));
        assert_eq!(n.normalize("example.com#x"), Some("example.com".to_string()));
    }

    #[test]
    fn test_hash_without_comment_shape_kept() {
        let n = normalizer();
        assert_eq!(n.normalize("address=/x.com/#"), Some("address=/x.com/#".to_string()));
        assert_eq!(n.normalize("example.com #!"), Some("example.com #!".to_string()));
    }
}

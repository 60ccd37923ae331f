//! URL syntax check for cited sources.

use std::sync::LazyLock;

use regex::Regex;

static RE_SOURCE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp)://[A-Za-z0-9+&@#/%?=~_|!:,.;-]*[A-Za-z0-9+&@#/%=~_|]$").unwrap()
});

/// Whether `candidate` is an http(s) or ftp URL whose last character is not
/// trailing punctuation.
pub fn is_well_formed(candidate: &str) -> bool {
    RE_SOURCE_URL.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_schemes() {
        assert!(is_well_formed("https://pubmed.ncbi.nlm.nih.gov/31234567/"));
        assert!(is_well_formed("http://example.org/study?id=42&lang=en"));
        assert!(is_well_formed("ftp://files.example.org/paper.pdf"));
        assert!(is_well_formed("https://a"));
    }

    #[test]
    fn test_rejects_other_schemes_and_bare_hosts() {
        assert!(!is_well_formed("mailto:someone@example.org"));
        assert!(!is_well_formed("www.example.org"));
        assert!(!is_well_formed("https://"));
        assert!(!is_well_formed("HTTPS://example.org"));
    }

    #[test]
    fn test_rejects_trailing_punctuation() {
        for tail in [",", ";", ".", ":", "!", "?"] {
            let url = format!("https://example.org/paper{tail}");
            assert!(!is_well_formed(&url), "{url} should be rejected");
        }
    }

    #[test]
    fn test_rejects_whitespace_and_disallowed_characters() {
        assert!(!is_well_formed("https://example.org/a b"));
        assert!(!is_well_formed("https://example.org/<script>"));
        assert!(!is_well_formed(" https://example.org"));
    }
}

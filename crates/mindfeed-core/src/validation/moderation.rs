use crate::ports::HumanDetector;

const DEFAULT_VOCABULARY: [&str; 5] = ["person", "people", "human", "portrait", "face"];

/// Flags a media reference when its text contains one of a fixed set of words.
///
/// A placeholder until media is labelled by a vision model; matching is a
/// case-insensitive substring test on the reference itself.
#[derive(Debug, Clone)]
pub struct KeywordHumanDetector {
    vocabulary: Vec<String>,
}

impl KeywordHumanDetector {
    pub fn new() -> Self {
        Self::with_vocabulary(DEFAULT_VOCABULARY)
    }

    pub fn with_vocabulary<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

impl Default for KeywordHumanDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanDetector for KeywordHumanDetector {
    fn looks_human(&self, media_reference: &str) -> bool {
        let reference = media_reference.to_lowercase();
        self.vocabulary.iter().any(|word| reference.contains(word.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_vocabulary_in_any_case() {
        let detector = KeywordHumanDetector::new();
        assert!(detector.looks_human("https://cdn.example.org/PORTRAIT_01.jpg"));
        assert!(detector.looks_human("group-of-People.png"));
        assert!(detector.looks_human("surface.jpg"));
    }

    #[test]
    fn test_ignores_landscapes() {
        let detector = KeywordHumanDetector::new();
        assert!(!detector.looks_human("https://cdn.example.org/forest-trail.jpg"));
        assert!(!detector.looks_human(""));
    }

    #[test]
    fn test_custom_vocabulary_replaces_default() {
        let detector = KeywordHumanDetector::with_vocabulary(["selfie", ""]);
        assert!(detector.looks_human("beach_SELFIE.jpg"));
        assert!(!detector.looks_human("portrait.jpg"));
    }
}

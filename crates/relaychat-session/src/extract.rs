use regex::Regex;

/// Strategy for pulling a display name out of free-form user text
pub trait NameExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Option<String>;
}

const DEFAULT_PATTERNS: &[&str] = &[
    r"(?i)\bmy name is\s+([a-z]+)",
    r"(?i)\bi am\s+([a-z]+)",
    r"(?i)\bi['’]m\s+([a-z]+)",
];

/// Tries a fixed list of patterns in order; the first capture group wins.
#[derive(Debug, Clone)]
pub struct PatternNameExtractor {
    patterns: Vec<Regex>,
}

impl PatternNameExtractor {
    /// "my name is X", "I am X", "I'm X", case-insensitive
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_patterns(DEFAULT_PATTERNS)
    }

    /// Each pattern must have one capture group holding the name
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl NameExtractor for PatternNameExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        PatternNameExtractor::new().unwrap().extract(text)
    }

    #[test]
    fn test_supported_phrasings() {
        assert_eq!(extract("I'm Casey, what serum should I use?").as_deref(), Some("Casey"));
        assert_eq!(extract("Hi, my name is Jordan.").as_deref(), Some("Jordan"));
        assert_eq!(extract("i am riley and I have dry skin").as_deref(), Some("riley"));
        assert_eq!(extract("MY NAME IS SAM").as_deref(), Some("SAM"));
        assert_eq!(extract("I’m Alex").as_deref(), Some("Alex"));
    }

    #[test]
    fn test_only_alphabetic_token_is_captured() {
        assert_eq!(extract("my name is Mary-Jane").as_deref(), Some("Mary"));
        assert_eq!(extract("my name is 42"), None);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract("What moisturizer works for oily skin?"), None);
        assert_eq!(extract("Miami is warm"), None);
    }

    #[test]
    fn test_pattern_order_wins() {
        // "my name is" is tried before "I am"
        assert_eq!(extract("I am told my name is Robin").as_deref(), Some("Robin"));
    }

    #[test]
    fn test_custom_patterns() {
        let extractor = PatternNameExtractor::with_patterns(&[r"(?i)call me\s+([a-z]+)"]).unwrap();
        assert_eq!(extractor.extract("Call me Kai").as_deref(), Some("Kai"));
        assert_eq!(extractor.extract("I'm Kai"), None);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(PatternNameExtractor::with_patterns(&["(unclosed"]).is_err());
    }
}

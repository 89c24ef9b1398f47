/* 📖 # Why validate requests separately from matching?

The matcher only ever answers "found at offset i" or "not found". A request that is
missing its text or pattern never reaches it: validation fails first with an
InvalidInput error, so callers can tell "searched and found nothing" apart from
"was given nothing to search".
*/

use nearmatch_base::{NearmatchError, NearmatchResult};
use serde::Deserialize;

use crate::matcher::AlmostEqualMatcher;

/// A search request as it arrives from a case file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchRequest {
    pub text: Option<String>,
    pub pattern: Option<String>,
}

impl SearchRequest {
    pub fn new(text: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            pattern: Some(pattern.into()),
        }
    }

    /// Check that both inputs are present.
    pub fn validate(self) -> NearmatchResult<ValidatedRequest> {
        let text = self
            .text
            .ok_or_else(|| NearmatchError::invalid_input("text", "missing"))?;
        let pattern = self
            .pattern
            .ok_or_else(|| NearmatchError::invalid_input("pattern", "missing"))?;
        Ok(ValidatedRequest { text, pattern })
    }
}

/// A request with both inputs present. Searching it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    text: String,
    pattern: String,
}

impl ValidatedRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn search(&self, matcher: &AlmostEqualMatcher) -> Option<usize> {
        matcher.find_str(&self.text, &self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearmatch_base::ErrorKind;

    #[test]
    fn test_valid_request_searches() {
        let request = SearchRequest::new("abcdefg", "bcdffg").validate().unwrap();
        assert_eq!(request.text(), "abcdefg");
        assert_eq!(request.pattern(), "bcdffg");
        assert_eq!(request.search(&AlmostEqualMatcher::new()), Some(1));
    }

    #[test]
    fn test_not_found_is_not_an_error() {
        let request = SearchRequest::new("", "a").validate().unwrap();
        assert_eq!(request.search(&AlmostEqualMatcher::new()), None);
    }

    #[test]
    fn test_empty_strings_are_valid() {
        let request = SearchRequest::new("", "").validate().unwrap();
        assert_eq!(request.search(&AlmostEqualMatcher::new()), Some(0));
    }

    #[test]
    fn test_missing_text_is_invalid_input() {
        let request = SearchRequest {
            text: None,
            pattern: Some("a".to_string()),
        };
        let error = request.validate().unwrap_err();
        match error.kind() {
            ErrorKind::InvalidInput { field, reason } => {
                assert_eq!(field, "text");
                assert_eq!(reason, "missing");
            }
            _ => panic!("Expected InvalidInput variant"),
        }
    }

    #[test]
    fn test_missing_pattern_is_invalid_input() {
        let request = SearchRequest {
            text: Some("abc".to_string()),
            pattern: None,
        };
        let error = request.validate().unwrap_err();
        assert!(error.is_invalid_input());
        assert_eq!(error.to_string(), "Invalid input for 'pattern': missing");
    }
}

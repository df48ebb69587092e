//! src/search/query.rs
//! ============================================================================
//! # Search query grammar
//!
//! A query is either free text or a set of whitespace-separated `key:value`
//! tokens that combine with AND. Parsing is case-insensitive: the whole query
//! is lowercased and trimmed once here, so matchers only compare lowercase
//! strings. Whether a token's key is recognized depends on the entity type
//! and is decided by the matcher.

use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    text: String,
    tokens: Option<SmallVec<[Token; 4]>>,
}

impl Query {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Self::default();
        }

        let mut tokens: SmallVec<[Token; 4]> = SmallVec::new();
        for part in text.split_whitespace() {
            match part.split_once(':') {
                Some((key, value)) if !key.is_empty() && !value.is_empty() => tokens.push(Token {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
                // A bare word makes the whole query free text.
                _ => {
                    return Self { text, tokens: None };
                }
            }
        }

        Self {
            text,
            tokens: Some(tokens),
        }
    }

    /// Empty after trimming; equivalent to "no filter".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The whole normalized query, used in free-text mode.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Structured tokens, or `None` when the query is free text.
    #[must_use]
    pub fn tokens(&self) -> Option<&[Token]> {
        self.tokens.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_is_empty() {
        assert!(Query::parse("   ").is_empty());
        assert!(Query::parse("").tokens().is_none());
    }

    #[test]
    fn test_structured_tokens_are_lowercased() {
        let q = Query::parse("  State:Running tag:Env=Prod ");
        let tokens = q.tokens().unwrap_or_default();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].key, "state");
        assert_eq!(tokens[0].value, "running");
        assert_eq!(tokens[1].key, "tag");
        assert_eq!(tokens[1].value, "env=prod");
    }

    #[test]
    fn test_tag_value_keeps_inner_colon() {
        let q = Query::parse("tag:team:core");
        let tokens = q.tokens().unwrap_or_default();
        assert_eq!(tokens[0].value, "team:core");
    }

    #[test]
    fn test_bare_word_reverts_to_free_text() {
        let q = Query::parse("name:web prod");
        assert!(q.tokens().is_none());
        assert_eq!(q.text(), "name:web prod");
    }

    #[test]
    fn test_dangling_colon_reverts_to_free_text() {
        assert!(Query::parse("name:").tokens().is_none());
        assert!(Query::parse(":web").tokens().is_none());
    }
}

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Replaces `{name}` placeholders with known token values.
///
/// Handlers receive the parser during provisioning and hand it back, possibly
/// with more tokens registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenParser {
    tokens: HashMap<String, String>,
}

impl TokenParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, name: &str, value: &str) -> Self {
        self.add_token(name, value);
        self
    }

    /// Token names are case-insensitive.
    pub fn add_token(&mut self, name: &str, value: &str) {
        self.tokens.insert(name.to_lowercase(), value.to_string());
    }

    pub fn get_token(&self, name: &str) -> Option<&str> {
        self.tokens.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Unknown placeholders are left untouched.
    pub fn parse_string(&self, input: &str) -> String {
        let Some(pattern) = placeholder_pattern() else {
            return input.to_string();
        };

        pattern
            .replace_all(input, |caps: &Captures| match self.get_token(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

// `{name}` with no brace inside, so a stray `{` never swallows a later placeholder
fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{([^{}]+)\}").ok())
        .as_ref()
}

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::ExtractError;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("hardcoded whitespace regex is valid"));

/// Trims and collapses runs of two or more whitespace characters to one space.
pub(crate) fn collapse_spaces(value: &str) -> String {
    WHITESPACE_RUN_RE.replace_all(value.trim(), " ").into_owned()
}

/// The user-selected course token, matched literally and case-insensitively.
#[derive(Debug, Clone)]
pub struct CourseToken {
    token: String,
    pattern: Regex,
}

impl CourseToken {
    pub fn new(token: &str) -> Result<Self, ExtractError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ExtractError::InvalidOption(
                "course token must be non-empty".to_string(),
            ));
        }

        let pattern = RegexBuilder::new(&regex::escape(token))
            .case_insensitive(true)
            .build()
            .map_err(|error| ExtractError::InvalidOption(format!("invalid course token: {error}")))?;

        Ok(Self {
            token: token.to_string(),
            pattern,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

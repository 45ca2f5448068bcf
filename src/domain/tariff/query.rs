//! Search query classification
//!
//! A query is either a hierarchical code (`1704`, `1704.90.35`) or free text.
//! The distinction is made once, here, and carried as a variant.

use std::fmt;

use crate::shared::errors::DomainError;

const MAX_QUERY_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TariffQuery {
    Keyword(String),
    Code(String),
}

impl TariffQuery {
    /// Classify raw user input.
    ///
    /// Surrounding whitespace is ignored. Empty, over-long or
    /// control-character input is rejected.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput("query must not be empty".into()));
        }
        if text.chars().count() > MAX_QUERY_LEN {
            return Err(DomainError::InvalidInput(format!(
                "query exceeds {} characters",
                MAX_QUERY_LEN
            )));
        }
        if text.chars().any(char::is_control) {
            return Err(DomainError::InvalidInput(
                "query contains control characters".into(),
            ));
        }

        if is_hierarchical_code(text) {
            Ok(Self::Code(text.to_string()))
        } else {
            Ok(Self::Keyword(text.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Keyword(s) | Self::Code(s) => s,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

impl fmt::Display for TariffQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(s) => write!(f, "keyword '{}'", s),
            Self::Code(s) => write!(f, "code {}", s),
        }
    }
}

/// Digits, optionally followed by repeated `.digits` groups.
pub fn is_hierarchical_code(text: &str) -> bool {
    !text.is_empty()
        && text
            .split('.')
            .all(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
}

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a ticker to uppercase.
    ///
    /// Leading digits are allowed; many non-US listings are numeric.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !is_symbol_char(ch) {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Exchange suffixes (`7203.T`), share classes (`BRK-B`), index carets
/// (`^GSPC`) and futures (`GC=F`) are accepted. Whitespace and URL delimiters
/// are not.
fn is_symbol_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '^' | '=' | '_')
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Upstream API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingApiKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw credential, for placing on the wire only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl Display for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" meta ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "META");
    }

    #[test]
    fn accepts_share_class_suffix() {
        let parsed = Symbol::parse("brk.b").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "BRK.B");
    }

    #[test]
    fn accepts_numeric_exchange_listings() {
        for (input, expected) in [
            ("0700.hk", "0700.HK"),
            ("7203.T", "7203.T"),
            ("005930.KS", "005930.KS"),
        ] {
            let parsed = Symbol::parse(input).expect("numeric listing should parse");
            assert_eq!(parsed.as_str(), expected);
        }
    }

    #[test]
    fn accepts_index_and_futures_symbols() {
        assert_eq!(Symbol::parse("^gspc").expect("index").as_str(), "^GSPC");
        assert_eq!(Symbol::parse("gc=f").expect("future").as_str(), "GC=F");
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = Symbol::parse("AAPL$").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { .. }));
    }

    #[test]
    fn rejects_whitespace_and_url_delimiters() {
        for input in ["BRK B", "META/../X", "A?B", "A&apikey=x", "A#B", "A%20"] {
            let err = Symbol::parse(input).expect_err("must fail");
            assert!(
                matches!(err, ValidationError::SymbolInvalidChar { .. }),
                "{input}: {err:?}"
            );
        }
    }

    #[test]
    fn blank_api_key_is_missing() {
        assert_eq!(ApiKey::parse("   "), Err(ValidationError::MissingApiKey));
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let key = ApiKey::parse("secret-123").expect("key should parse");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
        assert_eq!(key.expose(), "secret-123");
    }
}

//! Inlined SQL literal values.
//!
//! Values are rendered straight into the statement text. Numbers (and text that
//! looks like a number) are emitted bare; everything else is quoted. This is a
//! syntactic heuristic, not type-aware escaping.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::BuilderConfig;

/// A value inlined into a predicate, assignment or VALUES tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

/// Returns `true` for text that reads as a decimal number.
///
/// Accepts surrounding whitespace, a sign, a fractional part written as `1.`,
/// `.5` or `1.5`, and an exponent. Hex, `inf` and `NaN` are not numeric.
pub fn is_numeric_text(s: &str) -> bool {
    static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_RE
        .get_or_init(|| {
            Regex::new(
                r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$",
            )
            .expect("invalid built-in numeric regex")
        })
        .is_match(s)
}

impl Literal {
    /// Whether this value is emitted without quotes.
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Int(_) | Self::UInt(_) => true,
            Self::Float(f) => f.is_finite(),
            Self::Text(s) => is_numeric_text(s),
        }
    }

    /// The unquoted text of this value.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            Self::Int(i) => Cow::Owned(i.to_string()),
            Self::UInt(u) => Cow::Owned(u.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
        }
    }

    /// Render as the last token of a predicate: bare if numeric, quoted otherwise.
    pub(crate) fn render_predicate(&self, config: &BuilderConfig) -> String {
        if self.is_numeric() {
            return self.as_text().into_owned();
        }
        let quote = config.string_quote.as_char();
        let text = self.as_text();
        let body = escape(&text, quote, config.escape_literals);
        format!("{quote}{body}{quote}")
    }

    /// Render for a VALUES tuple, where the enclosing single quotes are added by
    /// the caller.
    pub(crate) fn render_tuple_item(&self, config: &BuilderConfig) -> String {
        escape(&self.as_text(), '\'', config.escape_literals).into_owned()
    }
}

fn escape(s: &str, quote: char, enabled: bool) -> Cow<'_, str> {
    if enabled && s.contains(quote) {
        let doubled: String = [quote, quote].iter().collect();
        Cow::Owned(s.replace(quote, &doubled))
    } else {
        Cow::Borrowed(s)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Literal {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Literal {
            fn from(v: $t) -> Self {
                Self::UInt(u64::from(v))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Literal {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Literal {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StringQuote;

    #[test]
    fn numeric_text_heuristic() {
        for s in ["5", "-3", "+7", "1.5", "1.", ".5", "1e3", "2.5E-4", " 12", "12 "] {
            assert!(is_numeric_text(s), "{s:?} should be numeric");
        }
        for s in ["", "abc", "0x1A", "1 2", "1e", "NaN", "inf", ">= 13", "."] {
            assert!(!is_numeric_text(s), "{s:?} should not be numeric");
        }
    }

    #[test]
    fn predicate_quoting() {
        let config = BuilderConfig::default();
        assert_eq!(Literal::from(5).render_predicate(&config), "5");
        assert_eq!(Literal::from(2.5).render_predicate(&config), "2.5");
        assert_eq!(Literal::from("42").render_predicate(&config), "42");
        assert_eq!(Literal::from("foo").render_predicate(&config), "\"foo\"");
        assert_eq!(
            Literal::from(f64::NAN).render_predicate(&config),
            "\"NaN\""
        );
    }

    #[test]
    fn quotes_are_kept_verbatim_by_default() {
        let config = BuilderConfig::default();
        assert_eq!(
            Literal::from(r#"say "hi""#).render_predicate(&config),
            r#""say "hi"""#
        );
        assert_eq!(Literal::from("O'Brien").render_tuple_item(&config), "O'Brien");
    }

    #[test]
    fn escaping_doubles_the_active_quote() {
        let config = BuilderConfig::new()
            .string_quote(StringQuote::Single)
            .escape_literals(true);
        assert_eq!(
            Literal::from("O'Brien").render_predicate(&config),
            "'O''Brien'"
        );
        assert_eq!(Literal::from("O'Brien").render_tuple_item(&config), "O''Brien");
    }

    #[test]
    fn bool_is_numeric() {
        assert_eq!(Literal::from(true), Literal::Int(1));
        assert!(Literal::from(false).is_numeric());
    }
}

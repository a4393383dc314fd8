//! Builder configuration.

use tracing::Level;

/// Quote character wrapped around non-numeric values in WHERE/SET predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringQuote {
    /// `"value"` (MySQL-style string literal).
    #[default]
    Double,
    /// `'value'` (standard SQL; required by PostgreSQL, where `"x"` is an identifier).
    Single,
}

impl StringQuote {
    pub fn as_char(self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }
}

/// Configuration for [`StatementBuilder`](crate::StatementBuilder).
///
/// The defaults reproduce the raw inlined SQL format exactly: double-quoted
/// predicate strings and no escaping of embedded quote characters.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Quote used for non-numeric predicate values.
    pub string_quote: StringQuote,
    /// Double any quote character found inside a quoted literal.
    ///
    /// Off by default: values are trusted verbatim and inlined as-is, so
    /// untrusted input must never reach the builder with this disabled.
    pub escape_literals: bool,
    /// Tracing event level for executed statements.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            string_quote: StringQuote::Double,
            escape_literals: false,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings suited to PostgreSQL: single-quoted, escaped literals.
    pub fn postgres() -> Self {
        Self::default()
            .string_quote(StringQuote::Single)
            .escape_literals(true)
    }

    /// Set the predicate string quote.
    pub fn string_quote(mut self, quote: StringQuote) -> Self {
        self.string_quote = quote;
        self
    }

    /// Enable or disable quote escaping inside literals.
    pub fn escape_literals(mut self, enabled: bool) -> Self {
        self.escape_literals = enabled;
        self
    }

    /// Override the tracing event level.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}

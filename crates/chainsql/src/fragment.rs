//! Text fragment utilities: joining clause pieces and the patch-or-append rewriter.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// SELECT column list: either a list joined with `, ` or a verbatim expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    List(Vec<String>),
    Raw(String),
}

impl Fields {
    /// `*`
    pub fn all() -> Self {
        Self::Raw("*".to_string())
    }

    /// Join list entries with `delimiter`; raw text is returned unchanged.
    pub fn implode(&self, delimiter: &str) -> String {
        match self {
            Self::List(cols) if cols.is_empty() => "*".to_string(),
            Self::List(cols) => cols.join(delimiter),
            Self::Raw(expr) => expr.clone(),
        }
    }
}

impl Default for Fields {
    fn default() -> Self {
        Self::all()
    }
}

impl From<&str> for Fields {
    fn from(expr: &str) -> Self {
        Self::Raw(expr.to_string())
    }
}

impl From<String> for Fields {
    fn from(expr: String) -> Self {
        Self::Raw(expr)
    }
}

impl From<&[&str]> for Fields {
    fn from(cols: &[&str]) -> Self {
        Self::List(cols.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Fields {
    fn from(cols: [&str; N]) -> Self {
        Self::List(cols.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<&str>> for Fields {
    fn from(cols: Vec<&str>) -> Self {
        Self::List(cols.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Fields {
    fn from(cols: Vec<String>) -> Self {
        Self::List(cols)
    }
}

/// Join the non-empty pieces with `delimiter`.
///
/// Leading/trailing whitespace of each piece is dropped so a buffer that already
/// starts with ` WHERE ...` does not produce a double space.
pub fn join_fragments(parts: &[&str], delimiter: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Replace every span of `text` matched by `pattern` with `replacement`, or append
/// `replacement` when nothing matches.
///
/// `replacement` is inserted literally (no `$n` group expansion). It carries its
/// own leading separator, e.g. `" LIMIT 10"`.
pub fn replace_or_append(text: &str, pattern: &Regex, replacement: &str) -> String {
    if pattern.is_match(text) {
        pattern.replace_all(text, NoExpand(replacement)).into_owned()
    } else {
        let mut out = String::with_capacity(text.len() + replacement.len());
        out.push_str(text);
        out.push_str(replacement);
        out
    }
}

fn built_in(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("invalid built-in clause regex"))
}

/// ` ORDER BY <anything> ASC|DESC`
pub(crate) fn order_by_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    built_in(&RE, r"(?i) ORDER BY .+ (?:ASC|DESC)\b")
}

/// ` LIMIT <digits>`
pub(crate) fn limit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    built_in(&RE, r"(?i) LIMIT [0-9]+")
}

/// ` OFFSET <digits>`
pub(crate) fn offset_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    built_in(&RE, r"(?i) OFFSET [0-9]+")
}

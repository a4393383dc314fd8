//! WHERE predicates and SET assignment formatting.

use std::collections::BTreeMap;

use crate::config::BuilderConfig;
use crate::literal::Literal;

/// Operators recognised at the start of a mapped value (`"<op> <value>"`).
///
/// Longer operators come first so `<=` wins over `<`.
const VALUE_OPERATORS: &[&str] = &[
    "NOT ILIKE", "NOT LIKE", "ILIKE", "LIKE", "<=", ">=", "<>", "!=", "=", "<", ">",
];

/// Argument accepted by [`StatementBuilder::where_`](crate::StatementBuilder::where_).
///
/// # Example
/// ```ignore
/// use chainsql::{Literal, Predicate};
///
/// let p: Predicate = ("age", ">=", 18).into();          // age >= 18
/// let p: Predicate = ("status", "active").into();       // status = "active"
/// let p: Predicate = [("x", Literal::from(5)), ("y", "foo".into())].into();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// No predicate; `where_` is a no-op.
    Empty,
    /// `field = value`
    Pair { field: String, value: Literal },
    /// `field op value`
    Triple {
        field: String,
        op: String,
        value: Literal,
    },
    /// One predicate per entry, ANDed together.
    ///
    /// A text value written as `"<op> <value>"` (e.g. `">= 13"`) uses that operator.
    /// Word operators (`LIKE`, `NOT LIKE`, `ILIKE`, `NOT ILIKE`) match
    /// case-insensitively, so plain text such as `"like new"` renders as
    /// `field like "new"`. Use [`Predicate::Triple`] to compare such text with `=`.
    Map(Vec<(String, Literal)>),
}

impl Predicate {
    pub fn pair(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::Pair {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn triple(
        field: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<Literal>,
    ) -> Self {
        Self::Triple {
            field: field.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Literal>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Format each predicate term separately.
    pub(crate) fn terms(&self, config: &BuilderConfig) -> Vec<String> {
        match self {
            Self::Empty => Vec::new(),
            Self::Pair { field, value } => vec![format_where(field, None, value, config)],
            Self::Triple { field, op, value } => {
                vec![format_where(field, Some(op), value, config)]
            }
            Self::Map(entries) => entries
                .iter()
                .map(|(field, value)| format_map_entry(field, value, config))
                .collect(),
        }
    }

    /// The predicate text that follows `WHERE`, or `None` when there is nothing to add.
    ///
    /// Several terms are ANDed and wrapped in parentheses.
    pub(crate) fn render(&self, config: &BuilderConfig) -> Option<String> {
        let mut terms = self.terms(config);
        match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(format!("({})", terms.join(" AND "))),
        }
    }
}

/// `field op value` (or `field = value`), quoting the value per [`Literal::render_predicate`].
pub(crate) fn format_where(
    field: &str,
    op: Option<&str>,
    value: &Literal,
    config: &BuilderConfig,
) -> String {
    let value = value.render_predicate(config);
    format!("{} {} {}", field, op.unwrap_or("="), value)
}

fn format_map_entry(field: &str, value: &Literal, config: &BuilderConfig) -> String {
    if let Literal::Text(text) = value {
        if let Some((op, rest)) = split_operator(text) {
            return format_where(field, Some(op), &Literal::Text(rest.to_string()), config);
        }
    }
    format_where(field, None, value, config)
}

/// Split `"<op> <value>"` into its operator and value.
fn split_operator(text: &str) -> Option<(&str, &str)> {
    let trimmed = text.trim_start();
    VALUE_OPERATORS.iter().find_map(|op| {
        let head = trimmed.get(..op.len())?;
        if !head.eq_ignore_ascii_case(op) {
            return None;
        }
        let rest = trimmed[op.len()..].strip_prefix(' ')?.trim_start();
        (!rest.is_empty()).then_some((head, rest))
    })
}

/// `k1 = v1, k2 = v2` assignment list for UPDATE ... SET.
pub(crate) fn format_set(assignments: &[(String, Literal)], config: &BuilderConfig) -> String {
    assignments
        .iter()
        .map(|(field, value)| format_where(field, None, value, config))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<()> for Predicate {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl<F, V> From<(F, V)> for Predicate
where
    F: Into<String>,
    V: Into<Literal>,
{
    fn from((field, value): (F, V)) -> Self {
        Self::pair(field, value)
    }
}

impl<F, O, V> From<(F, O, V)> for Predicate
where
    F: Into<String>,
    O: Into<String>,
    V: Into<Literal>,
{
    fn from((field, op, value): (F, O, V)) -> Self {
        Self::triple(field, op, value)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Predicate
where
    K: Into<String>,
    V: Into<Literal>,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::map(entries)
    }
}

impl<K, V> From<Vec<(K, V)>> for Predicate
where
    K: Into<String>,
    V: Into<Literal>,
{
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::map(entries)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Predicate
where
    K: Into<String>,
    V: Into<Literal>,
{
    fn from(entries: BTreeMap<K, V>) -> Self {
        Self::map(entries)
    }
}

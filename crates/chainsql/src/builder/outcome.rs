use crate::row::Record;

/// Result of a successful [`StatementBuilder::get`](crate::StatementBuilder::get),
/// shaped by the statement kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every row matched by a SELECT (possibly empty).
    Rows(Vec<Record>),
    /// Identifier of the row created by an INSERT, as reported by the connection.
    InsertId(i64),
    /// Success flag for UPDATE and unseeded statements.
    Success(bool),
}

impl Outcome {
    /// The fetched rows, if this was a SELECT.
    pub fn into_rows(self) -> Option<Vec<Record>> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// The inserted row's identifier, if this was an INSERT.
    pub fn insert_id(&self) -> Option<i64> {
        match self {
            Self::InsertId(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Success(ok) => *ok,
            Self::Rows(_) | Self::InsertId(_) => true,
        }
    }
}

//! The reusable statement builder.
//!
//! A [`StatementBuilder`] accumulates one SQL statement as text. Seeding calls
//! (`select`, `insert`, `update`) set the statement kind and write the leading
//! clause; `where_` appends predicates; `order_by` and `page` patch their clause in
//! place when it already exists, so calling them twice never duplicates it.
//! `get` runs the text on the connection, shapes the result by kind, and clears
//! the statement so the same builder can compose the next one.
//!
//! Values are inlined into the SQL text, not bound as parameters. Never pass
//! untrusted input without enabling [`BuilderConfig::escape_literals`].

mod outcome;


pub use outcome::Outcome;

use crate::client::{Connection, PreparedStatement};
use crate::config::BuilderConfig;
use crate::error::{StmtError, StmtResult};
use crate::fragment::{
    Fields, join_fragments, limit_pattern, offset_pattern, order_by_pattern, replace_or_append,
};
use crate::literal::Literal;
use crate::log;
use crate::predicate::{Predicate, format_set};

/// Column used by [`StatementBuilder::order_by_default`].
pub const DEFAULT_ORDER_FIELD: &str = "updated_at";
/// Direction used by [`StatementBuilder::order_by_default`].
pub const DEFAULT_ORDER_DIRECTION: &str = "desc";

/// Category of the statement being composed; decides how `get` shapes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    /// No seeding call since the last reset.
    #[default]
    Unset,
}

/// Stateful, reusable SQL statement builder bound to one connection.
///
/// Clause methods mutate the builder and return it for chaining. One statement is
/// composed at a time; seeding a second statement before `get` keeps appending to
/// the same text.
///
/// # Example
/// ```ignore
/// use chainsql::StatementBuilder;
///
/// let mut q = StatementBuilder::new(&client);
/// let rows = q
///     .select_fields("users", ["id", "name"])
///     .where_(("active", 1))
///     .order_by("name", "asc")
///     .page(2, 20)
///     .get()
///     .await?
///     .into_rows();
///
/// // Same builder, next statement.
/// let id = q.insert("users", [("name", "carol")]).get().await?.insert_id();
/// ```
pub struct StatementBuilder<'c, C: Connection> {
    conn: &'c C,
    config: BuilderConfig,
    text: String,
    table: Option<String>,
    kind: StatementKind,
}

impl<'c, C: Connection> StatementBuilder<'c, C> {
    /// Create a builder with the default configuration.
    pub fn new(conn: &'c C) -> Self {
        Self::with_config(conn, BuilderConfig::default())
    }

    /// Create a builder with a custom configuration.
    pub fn with_config(conn: &'c C, config: BuilderConfig) -> Self {
        Self {
            conn,
            config,
            text: String::new(),
            table: None,
            kind: StatementKind::Unset,
        }
    }

    // ==================== Accessors ====================

    /// The statement text composed so far.
    pub fn sql(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn connection(&self) -> &'c C {
        self.conn
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    // ==================== Seeding ====================

    /// `SELECT * FROM <table>`
    pub fn select(&mut self, table: &str) -> &mut Self {
        self.select_fields(table, Fields::all())
    }

    /// `SELECT <fields> FROM <table>`, placed before any text already in the buffer.
    pub fn select_fields(&mut self, table: &str, fields: impl Into<Fields>) -> &mut Self {
        let fields: Fields = fields.into();
        let fields = fields.implode(", ");
        self.seed(StatementKind::Select, table);
        self.text = join_fragments(&["SELECT", &fields, "FROM", table, &self.text], " ");
        self
    }

    /// `INSERT INTO <table> (<keys>) VALUES ('<v1>', '<v2>')`.
    ///
    /// Every value is written as a string literal, whatever its type.
    pub fn insert<K, V>(
        &mut self,
        table: &str,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<Literal>,
    {
        let (keys, values): (Vec<String>, Vec<String>) = values
            .into_iter()
            .map(|(k, v)| {
                let key: String = k.into();
                let value: Literal = v.into();
                (key, value.render_tuple_item(&self.config))
            })
            .unzip();
        let keys = format!("({})", keys.join(", "));
        let values = format!("('{}')", values.join("', '"));

        self.seed(StatementKind::Insert, table);
        self.text = join_fragments(
            &["INSERT INTO", table, &keys, "VALUES", &values, &self.text],
            " ",
        );
        self
    }

    /// `UPDATE <table> SET <k> = <v>, ...` followed by `WHERE <wheres>`.
    ///
    /// Unlike `select` and `insert`, this replaces any text already in the buffer.
    pub fn update<K, V>(
        &mut self,
        table: &str,
        wheres: impl Into<Predicate>,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<Literal>,
    {
        let assignments: Vec<(String, Literal)> =
            values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let set = format_set(&assignments, &self.config);

        self.seed(StatementKind::Update, table);
        self.text = join_fragments(&["UPDATE", table, "SET", &set], " ");
        self.where_(wheres)
    }

    fn seed(&mut self, kind: StatementKind, table: &str) {
        self.kind = kind;
        self.table = Some(table.to_string());
    }

    // ==================== WHERE ====================

    /// Append ` WHERE <predicate>`.
    ///
    /// Each call appends a new WHERE clause; it is never merged with an earlier
    /// one. An empty predicate is a no-op.
    pub fn where_(&mut self, predicate: impl Into<Predicate>) -> &mut Self {
        let predicate: Predicate = predicate.into();
        if let Some(rendered) = predicate.render(&self.config) {
            self.text.push_str(" WHERE ");
            self.text.push_str(&rendered);
        }
        self
    }

    /// Append ` WHERE field = value`.
    pub fn where_eq(&mut self, field: &str, value: impl Into<Literal>) -> &mut Self {
        self.where_(Predicate::pair(field, value))
    }

    /// Append ` WHERE field op value`.
    pub fn where_op(&mut self, field: &str, op: &str, value: impl Into<Literal>) -> &mut Self {
        self.where_(Predicate::triple(field, op, value))
    }

    // ==================== ORDER BY / paging ====================

    /// Set ` ORDER BY <field> <ASC|DESC>`, replacing an existing ORDER BY clause.
    ///
    /// `direction` is case-insensitive; anything other than asc/desc is ignored.
    pub fn order_by(&mut self, field: &str, direction: &str) -> &mut Self {
        let direction = direction.to_ascii_uppercase();
        if direction == "ASC" || direction == "DESC" {
            let clause = format!(" ORDER BY {field} {direction}");
            self.text = replace_or_append(&self.text, order_by_pattern(), &clause);
        }
        self
    }

    /// `ORDER BY updated_at DESC`
    pub fn order_by_default(&mut self) -> &mut Self {
        self.order_by(DEFAULT_ORDER_FIELD, DEFAULT_ORDER_DIRECTION)
    }

    /// Set ` LIMIT <limit> OFFSET <limit * (page_num - 1)>`, replacing existing
    /// LIMIT/OFFSET clauses independently.
    ///
    /// `page_num` is 1-based; 0 is treated as 1.
    pub fn page(&mut self, page_num: u64, limit: u64) -> &mut Self {
        let offset = limit.saturating_mul(page_num.saturating_sub(1));
        self.text = replace_or_append(&self.text, limit_pattern(), &format!(" LIMIT {limit}"));
        self.text = replace_or_append(&self.text, offset_pattern(), &format!(" OFFSET {offset}"));
        self
    }

    /// `page(1, limit)`
    pub fn first(&mut self, limit: u64) -> &mut Self {
        self.page(1, limit)
    }

    /// `LIMIT 1 OFFSET 0`
    pub fn first_row(&mut self) -> &mut Self {
        self.first(1)
    }

    // ==================== Execution ====================

    /// Execute the composed statement and clear it.
    ///
    /// The result depends on the statement kind:
    /// - `Select`: [`Outcome::Rows`]
    /// - `Insert`: [`Outcome::InsertId`]
    /// - otherwise: [`Outcome::Success`]
    ///
    /// If the statement fails to run, its text, table and kind are left as they
    /// were; call [`reset`](Self::reset) before reusing the builder for something
    /// else. Once the connection reports success the builder is cleared, even if
    /// collecting rows or the insert id then fails.
    pub async fn get(&mut self) -> StmtResult<Outcome> {
        log::statement(&self.config, self.kind, self.table.as_deref(), &self.text);
        let conn = self.conn;
        let mut prepared = match self.execute_current(conn).await {
            Ok(prepared) => prepared,
            Err(err) => {
                log::failure(&self.config, self.kind, &self.text, &err);
                return Err(err);
            }
        };

        // The statement has run; it must not stay in the buffer to run again.
        let kind = self.kind;
        let sql = std::mem::take(&mut self.text);
        self.reset();

        let outcome = match kind {
            StatementKind::Select => prepared.fetch_all().map(Outcome::Rows),
            StatementKind::Insert => conn.last_insert_id().await.map(Outcome::InsertId),
            StatementKind::Update | StatementKind::Unset => Ok(Outcome::Success(true)),
        };
        if let Err(err) = &outcome {
            log::failure(&self.config, kind, &sql, err);
        }
        outcome
    }

    /// Alias for [`get`](Self::get).
    pub async fn run(&mut self) -> StmtResult<Outcome> {
        self.get().await
    }

    async fn execute_current(&self, conn: &'c C) -> StmtResult<C::Prepared<'c>> {
        if self.text.trim().is_empty() {
            return Err(StmtError::Other("no statement to execute".to_string()));
        }

        let mut prepared = conn.prepare(&self.text).await?;
        if !prepared.execute().await? {
            return Err(StmtError::rejected(self.text.clone()));
        }
        Ok(prepared)
    }

    /// Clear the statement text, table and kind. The connection and configuration
    /// are kept.
    pub fn reset(&mut self) -> &mut Self {
        tracing::trace!(target: log::TARGET, "statement reset");
        self.text.clear();
        self.table = None;
        self.kind = StatementKind::Unset;
        self
    }
}

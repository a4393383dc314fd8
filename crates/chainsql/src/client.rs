//! Connection traits consumed by the statement builder.

use crate::error::{StmtError, StmtResult};
use crate::row::{Record, record_from_row};
use tokio_postgres::{Row, Statement};

/// A database connection that can prepare and run parameterless SQL text.
///
/// The builder borrows the connection for its whole lifetime and never closes,
/// pools or wraps it in a transaction; those concerns belong to the caller.
pub trait Connection: Send + Sync {
    /// Statement handle returned by [`Connection::prepare`].
    type Prepared<'a>: PreparedStatement + Send
    where
        Self: 'a;

    /// Prepare `sql` on this connection.
    fn prepare<'a>(
        &'a self,
        sql: &str,
    ) -> impl std::future::Future<Output = StmtResult<Self::Prepared<'a>>> + Send;

    /// Identifier of the row most recently inserted on this connection.
    fn last_insert_id(&self) -> impl std::future::Future<Output = StmtResult<i64>> + Send;
}

/// A prepared statement: run it once, then collect its rows.
pub trait PreparedStatement {
    /// Execute with no bound parameters.
    ///
    /// `Ok(false)` means the connection declined the statement without raising an error.
    fn execute(&mut self) -> impl std::future::Future<Output = StmtResult<bool>> + Send;

    /// All rows produced by the last [`execute`](PreparedStatement::execute).
    fn fetch_all(&mut self) -> StmtResult<Vec<Record>>;
}

/// Prepared statement on a `tokio_postgres` client or transaction.
///
/// Rows are buffered by `execute` and decoded by `fetch_all`.
pub struct PgPrepared<'a, C> {
    client: &'a C,
    statement: Statement,
    rows: Vec<Row>,
}

impl<'a, C> PgPrepared<'a, C> {
    fn new(client: &'a C, statement: Statement) -> Self {
        Self {
            client,
            statement,
            rows: Vec::new(),
        }
    }
}

impl<C> PreparedStatement for PgPrepared<'_, C>
where
    C: tokio_postgres::GenericClient + Sync,
{
    async fn execute(&mut self) -> StmtResult<bool> {
        self.rows = tokio_postgres::GenericClient::query(self.client, &self.statement, &[])
            .await
            .map_err(StmtError::from_db_error)?;
        Ok(true)
    }

    fn fetch_all(&mut self) -> StmtResult<Vec<Record>> {
        std::mem::take(&mut self.rows)
            .iter()
            .map(record_from_row)
            .collect()
    }
}

async fn pg_last_insert_id<C>(client: &C) -> StmtResult<i64>
where
    C: tokio_postgres::GenericClient + Sync,
{
    let row = tokio_postgres::GenericClient::query_one(client, "SELECT lastval()", &[])
        .await
        .map_err(StmtError::from_db_error)?;
    row.try_get::<_, i64>(0)
        .map_err(|e| StmtError::decode("lastval", e.to_string()))
}

impl Connection for tokio_postgres::Client {
    type Prepared<'a>
        = PgPrepared<'a, Self>
    where
        Self: 'a;

    async fn prepare<'a>(&'a self, sql: &str) -> StmtResult<PgPrepared<'a, Self>> {
        let statement = tokio_postgres::Client::prepare(self, sql)
            .await
            .map_err(StmtError::from_db_error)?;
        Ok(PgPrepared::new(self, statement))
    }

    async fn last_insert_id(&self) -> StmtResult<i64> {
        pg_last_insert_id(self).await
    }
}

impl Connection for tokio_postgres::Transaction<'_> {
    type Prepared<'a>
        = PgPrepared<'a, Self>
    where
        Self: 'a;

    async fn prepare<'a>(&'a self, sql: &str) -> StmtResult<PgPrepared<'a, Self>> {
        let statement = tokio_postgres::Transaction::prepare(self, sql)
            .await
            .map_err(StmtError::from_db_error)?;
        Ok(PgPrepared::new(self, statement))
    }

    async fn last_insert_id(&self) -> StmtResult<i64> {
        pg_last_insert_id(self).await
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl Connection for deadpool_postgres::Client {
    type Prepared<'a>
        = PgPrepared<'a, tokio_postgres::Client>
    where
        Self: 'a;

    async fn prepare<'a>(
        &'a self,
        sql: &str,
    ) -> StmtResult<PgPrepared<'a, tokio_postgres::Client>> {
        // Delegate to the deref target (ClientWrapper -> tokio_postgres::Client).
        let client: &'a tokio_postgres::Client = self;
        Connection::prepare(client, sql).await
    }

    async fn last_insert_id(&self) -> StmtResult<i64> {
        let client: &tokio_postgres::Client = self;
        pg_last_insert_id(client).await
    }
}

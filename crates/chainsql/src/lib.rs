//! # chainsql
//!
//! A reusable, fluent SQL statement builder for PostgreSQL.
//!
//! ## Features
//!
//! - **One object, many statements**: a [`StatementBuilder`] composes a statement,
//!   runs it, then clears itself for the next one
//! - **Idempotent clauses**: calling `order_by` or `page` again rewrites the clause
//!   in place instead of duplicating it
//! - **Kind-shaped results**: SELECT yields rows, INSERT the new id, UPDATE a flag
//! - **Pluggable connections**: anything implementing [`Connection`]; adapters for
//!   `tokio_postgres` clients/transactions and pooled `deadpool` clients
//!
//! ## Example
//!
//! ```ignore
//! use chainsql::{BuilderConfig, StatementBuilder};
//!
//! let mut q = StatementBuilder::with_config(&client, BuilderConfig::postgres());
//!
//! let rows = q
//!     .select_fields("users", ["id", "name"])
//!     .where_(("active", 1))
//!     .order_by("name", "asc")
//!     .page(2, 20)
//!     .get()
//!     .await?;
//!
//! q.update("users", ("id", 7), [("name", "bob")]).run().await?;
//! ```
//!
//! Values are inlined into the statement text rather than bound as parameters.
//! Enable [`BuilderConfig::escape_literals`] (as [`BuilderConfig::postgres`] does)
//! before passing anything user-supplied.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod fragment;
pub mod literal;
pub mod predicate;
pub mod row;

mod log;

pub use builder::{
    DEFAULT_ORDER_DIRECTION, DEFAULT_ORDER_FIELD, Outcome, StatementBuilder, StatementKind,
};
pub use client::{Connection, PgPrepared, PreparedStatement};
pub use config::{BuilderConfig, StringQuote};
pub use error::{StmtError, StmtResult};
pub use fragment::Fields;
pub use literal::Literal;
pub use predicate::Predicate;
pub use row::{Record, record_from_row};

//! `tracing` events for executed statements.

use crate::builder::StatementKind;
use crate::config::BuilderConfig;
use tracing::Level;

pub(crate) const TARGET: &str = "chainsql.sql";

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn display_sql(config: &BuilderConfig, sql: &str) -> String {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Emit the statement about to run, at the configured level.
pub(crate) fn statement(
    config: &BuilderConfig,
    kind: StatementKind,
    table: Option<&str>,
    sql: &str,
) {
    /// Dispatch a tracing event at a runtime-determined level.
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    let sql = display_sql(config, sql);
    let table = table.unwrap_or("-");
    emit_at_level!(
        config.log_level,
        target: TARGET,
        kind = ?kind,
        table,
        sql = %sql,
        "executing statement"
    );
}

/// Emit a failed execution; the statement text is kept for the caller to inspect.
pub(crate) fn failure(
    config: &BuilderConfig,
    kind: StatementKind,
    sql: &str,
    error: &dyn std::fmt::Display,
) {
    let sql = display_sql(config, sql);
    tracing::warn!(target: TARGET, kind = ?kind, sql = %sql, error = %error, "statement failed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("é", 1), "");
    }

    #[test]
    fn display_sql_appends_ellipsis() {
        let config = BuilderConfig::new().max_sql_length(6);
        assert_eq!(display_sql(&config, "SELECT * FROM t"), "SELECT...");
        assert_eq!(display_sql(&config.no_truncate(), "SELECT * FROM t"), "SELECT * FROM t");
    }
}

//! End-to-end checks against a live PostgreSQL server.
//!
//! Skipped unless `DATABASE_URL` is set (a `.env` file is honoured).

use chainsql::{BuilderConfig, Outcome, StatementBuilder, StatementKind};
use serde_json::Value;

async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

#[tokio::test]
async fn insert_select_update_on_one_builder() {
    let Some(client) = try_connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    client
        .batch_execute(
            "CREATE TEMP TABLE chainsql_users (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                active INT NOT NULL DEFAULT 1,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .await
        .unwrap();

    let mut q = StatementBuilder::with_config(&client, BuilderConfig::postgres());

    let first = q
        .insert("chainsql_users", [("name", "ann"), ("active", "1")])
        .get()
        .await
        .unwrap()
        .insert_id()
        .unwrap();
    let second = q
        .insert("chainsql_users", [("name", "o'neil"), ("active", "0")])
        .get()
        .await
        .unwrap()
        .insert_id()
        .unwrap();
    assert!(second > first);
    assert_eq!(q.kind(), StatementKind::Unset);

    let rows = q
        .select_fields("chainsql_users", ["id", "name"])
        .where_(("active", 1))
        .order_by("name", "asc")
        .first(10)
        .get()
        .await
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], Value::from("ann"));
    assert_eq!(rows[0]["id"], Value::from(first));

    let outcome = q
        .update("chainsql_users", ("id", second), [("active", 1)])
        .run()
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Success(true));

    let rows = q
        .select("chainsql_users")
        .where_(("active", 1))
        .order_by("id", "desc")
        .get()
        .await
        .unwrap()
        .into_rows()
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], Value::from("o'neil"));
    assert!(rows[0]["updated_at"].is_string());
}

#[tokio::test]
async fn failed_statement_keeps_text() {
    let Some(client) = try_connect().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };

    let mut q = StatementBuilder::new(&client);
    let result = q.select("chainsql_missing_table").get().await;
    assert!(result.is_err());
    assert_eq!(q.sql(), "SELECT * FROM chainsql_missing_table");
}

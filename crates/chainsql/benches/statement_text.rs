use chainsql::{Connection, Literal, PreparedStatement, Record, StatementBuilder, StmtResult};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Connection that is never executed against; only the text is measured.
struct NoopConnection;

struct NoopPrepared;

impl PreparedStatement for NoopPrepared {
    async fn execute(&mut self) -> StmtResult<bool> {
        Ok(true)
    }

    fn fetch_all(&mut self) -> StmtResult<Vec<Record>> {
        Ok(Vec::new())
    }
}

impl Connection for NoopConnection {
    type Prepared<'a> = NoopPrepared;

    async fn prepare<'a>(&'a self, _sql: &str) -> StmtResult<NoopPrepared> {
        Ok(NoopPrepared)
    }

    async fn last_insert_id(&self) -> StmtResult<i64> {
        Ok(0)
    }
}

fn bench_where_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_text/where_map");
    let conn = NoopConnection;

    for n in [1, 5, 20, 100] {
        let entries: Vec<(String, Literal)> = (0..n)
            .map(|i| (format!("col{i}"), Literal::from(format!("v{i}"))))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &entries, |b, entries| {
            b.iter(|| {
                let mut q = StatementBuilder::new(&conn);
                q.select("t").where_(entries.clone());
                black_box(q.sql().len())
            });
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let conn = NoopConnection;
    c.bench_function("statement_text/repeated_order_and_page", |b| {
        b.iter(|| {
            let mut q = StatementBuilder::new(&conn);
            q.select_fields("users", ["id", "name"]).where_(("active", 1));
            for page in 1..=10 {
                q.order_by("name", "asc").page(page, 20);
            }
            black_box(q.sql().len())
        });
    });
}

criterion_group!(benches, bench_where_map, bench_rewrite);
criterion_main!(benches);

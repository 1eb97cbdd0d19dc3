use pretty_assertions::assert_eq;
use squill_core::{
    dialect::{Dialect, LimitStyle, Mssql, Postgresql, Sqlite},
    driver::BoundParams,
    schema::Table,
    stmt::{Expr, Select, Statement, TableRef, Type, Value},
};
use squill_sql::{
    get_or_compile, resolve, CacheStats, CacheStatus, CacheStore, CompiledCache, Params,
};

use std::sync::Arc;

fn users() -> Arc<Table> {
    Table::builder("users")
        .column("id", Type::I64)
        .column("name", Type::String)
        .primary_key(["id"])
        .build()
        .unwrap()
}

/// A statement whose shape differs for every `n`.
fn labeled(users: &Arc<Table>, n: usize) -> Statement {
    Select::new([users.c("id").label(format!("c{n}"))])
        .from(users)
        .into()
}

fn lookup(cache: &CompiledCache, stmt: &Statement) -> CacheStatus {
    get_or_compile(stmt, &Sqlite, Some(cache)).unwrap().status
}

#[derive(Debug)]
struct Uncached;

impl Dialect for Uncached {
    fn name(&self) -> &'static str {
        "uncached"
    }

    fn supports_statement_cache(&self) -> bool {
        false
    }

    fn supports_parameterized_limit(&self) -> bool {
        true
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset { unbounded: None }
    }
}

#[test]
fn same_shape_different_values_hits() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();

    let first: Statement = users.select().filter(users.c("id").eq(5i64)).into();
    let second: Statement = users.select().filter(users.c("id").eq(99i64)).into();

    let a = get_or_compile(&first, &Sqlite, Some(&cache)).unwrap();
    assert_eq!(a.status, CacheStatus::Miss);

    let b = get_or_compile(&second, &Sqlite, Some(&cache)).unwrap();
    assert_eq!(b.status, CacheStatus::Hit);

    assert!(Arc::ptr_eq(&a.compiled, &b.compiled));
    assert_eq!(cache.len(), 1);

    // The cached statement is executed with the values of the second one.
    let values = b
        .compiled
        .construct_params(&b.extracted, &[], &Params::new())
        .unwrap();
    let stmt = resolve(&b.compiled, &Sqlite, &values).unwrap();
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(99)]));
}

#[test]
fn different_shapes_miss() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();

    assert_eq!(lookup(&cache, &labeled(&users, 1)), CacheStatus::Miss);
    assert_eq!(lookup(&cache, &labeled(&users, 2)), CacheStatus::Miss);
    assert_eq!(lookup(&cache, &labeled(&users, 1)), CacheStatus::Hit);
    assert_eq!(cache.len(), 2);
}

#[test]
fn prunes_least_recently_used_past_threshold() {
    let users = users();
    let cache = CompiledCache::new(10, 0.5).unwrap();
    let stmts: Vec<_> = (1..=16).map(|n| labeled(&users, n)).collect();

    for stmt in &stmts[..15] {
        lookup(&cache, stmt);
    }

    // Up to capacity * 1.5 entries are kept.
    assert_eq!(cache.len(), 15);

    lookup(&cache, &stmts[15]);
    assert_eq!(cache.len(), 10);

    // The six oldest entries were evicted.
    for stmt in &stmts[..6] {
        assert_eq!(lookup(&cache, stmt), CacheStatus::Miss);
    }
}

#[test]
fn recently_used_entries_survive_pruning() {
    let users = users();
    let cache = CompiledCache::new(10, 0.5).unwrap();
    let stmts: Vec<_> = (1..=16).map(|n| labeled(&users, n)).collect();

    for stmt in &stmts[..15] {
        lookup(&cache, stmt);
    }

    // Touch the oldest entry.
    assert_eq!(lookup(&cache, &stmts[0]), CacheStatus::Hit);

    lookup(&cache, &stmts[15]);
    assert_eq!(cache.len(), 10);

    assert_eq!(lookup(&cache, &stmts[0]), CacheStatus::Hit);
    assert_eq!(lookup(&cache, &stmts[6]), CacheStatus::Miss);
}

#[test]
fn uncacheable_statements_are_never_stored() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();

    let insert: Statement = users
        .insert()
        .columns(["id", "name"])
        .values([Expr::from(1i64), Expr::from("a")])
        .values([Expr::from(2i64), Expr::from("b")])
        .into();

    let lookup = get_or_compile(&insert, &Sqlite, Some(&cache)).unwrap();

    assert_eq!(lookup.status, CacheStatus::NoKey);
    assert_eq!(
        lookup.compiled.sql(),
        "INSERT INTO users (id, name) VALUES (?1, ?2), (?3, ?4)"
    );
    assert!(cache.is_empty());

    // Remembered on the statement.
    assert_eq!(
        insert.cacheability(),
        Some(squill_core::stmt::Cacheability::Uncacheable)
    );
}

#[test]
fn without_a_store_every_call_compiles() {
    let users = users();
    let stmt: Statement = users.select().into();

    let a = get_or_compile(&stmt, &Sqlite, None).unwrap();
    let b = get_or_compile(&stmt, &Sqlite, None).unwrap();

    assert_eq!(a.status, CacheStatus::Disabled);
    assert_eq!(b.status, CacheStatus::Disabled);
    assert!(!Arc::ptr_eq(&a.compiled, &b.compiled));
}

#[test]
fn dialect_without_cache_support() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();
    let stmt: Statement = users.select().into();

    let lookup = get_or_compile(&stmt, &Uncached, Some(&cache)).unwrap();

    assert_eq!(lookup.status, CacheStatus::NoDialectSupport);
    assert!(cache.is_empty());
}

#[test]
fn inline_limits_share_an_entry() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();

    let page = |n: i64| -> Statement {
        Select::new([users.c("id")])
            .from(&users)
            .order_by([users.c("id")])
            .limit(n)
            .into()
    };

    let mut rendered = vec![];
    for n in [5, 10] {
        let lookup = get_or_compile(&page(n), &Mssql, Some(&cache)).unwrap();
        let values = lookup
            .compiled
            .construct_params(&lookup.extracted, &[], &Params::new())
            .unwrap();
        rendered.push(resolve(&lookup.compiled, &Mssql, &values).unwrap().sql);
    }

    assert_eq!(cache.len(), 1);
    assert_eq!(&*rendered[0], "SELECT TOP 5 users.id FROM users ORDER BY users.id");
    assert_eq!(&*rendered[1], "SELECT TOP 10 users.id FROM users ORDER BY users.id");
}

#[test]
fn entries_are_scoped_by_dialect() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();
    let stmt: Statement = users.select().filter(users.c("id").eq(1i64)).into();

    let sqlite = get_or_compile(&stmt, &Sqlite, Some(&cache)).unwrap();
    let postgres = get_or_compile(&stmt, &Postgresql, Some(&cache)).unwrap();

    assert_eq!(sqlite.status, CacheStatus::Miss);
    assert_eq!(postgres.status, CacheStatus::Miss);
    assert_eq!(cache.len(), 2);
    assert!(postgres.compiled.sql().ends_with("WHERE users.id = $1"));
}

#[test]
fn invalid_configuration() {
    for (capacity, threshold) in [(0, 0.5), (10, -1.0), (10, f64::NAN), (10, f64::INFINITY)] {
        let err = CompiledCache::new(capacity, threshold).unwrap_err();
        assert!(err.is_invalid_cache_configuration(), "{err}");
    }

    assert!(CompiledCache::new(1, 0.0).is_ok());
}

#[test]
fn stats_count_lookups() {
    let users = users();
    let cache = CompiledCache::with_capacity(10).unwrap();

    lookup(&cache, &labeled(&users, 1));
    lookup(&cache, &labeled(&users, 1));
    lookup(&cache, &labeled(&users, 1));

    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 2,
            misses: 1,
            len: 1,
            capacity: 10,
        }
    );

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(lookup(&cache, &labeled(&users, 1)), CacheStatus::Miss);
}

#[test]
fn status_display() {
    assert_eq!(CacheStatus::Hit.to_string(), "hit");
    assert_eq!(CacheStatus::Miss.to_string(), "miss");
    assert_eq!(CacheStatus::NoKey.to_string(), "no key");
    assert_eq!(CacheStatus::Raw.to_string(), "raw");
    assert_eq!(CacheStatus::Disabled.to_string(), "caching disabled");
}

#[test]
fn custom_store() {
    #[derive(Debug, Default)]
    struct Unbounded(parking_lot::Mutex<Vec<(squill_sql::CacheKey, Arc<squill_sql::CompiledStatement>)>>);

    impl CacheStore for Unbounded {
        fn get(&self, key: &squill_sql::CacheKey) -> Option<Arc<squill_sql::CompiledStatement>> {
            self.0
                .lock()
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, compiled)| compiled.clone())
        }

        fn insert(&self, key: squill_sql::CacheKey, compiled: Arc<squill_sql::CompiledStatement>) {
            self.0.lock().push((key, compiled));
        }

        fn len(&self) -> usize {
            self.0.lock().len()
        }
    }

    let users = users();
    let store = Unbounded::default();

    for n in 1..=3 {
        assert_eq!(
            get_or_compile(&labeled(&users, n), &Sqlite, Some(&store))
                .unwrap()
                .status,
            CacheStatus::Miss
        );
    }

    let status = get_or_compile(&labeled(&users, 2), &Sqlite, Some(&store))
        .unwrap()
        .status;
    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(store.len(), 3);
}

#[test]
fn inferred_joins_depend_on_foreign_keys() {
    let a = Table::builder("a")
        .column("id", Type::I64)
        .primary_key(["id"])
        .build()
        .unwrap();

    let b = |fk: &str| {
        Table::builder("b")
            .column("x_id", Type::I64)
            .column("y_id", Type::I64)
            .foreign_key([fk], "a", ["id"])
            .build()
            .unwrap()
    };

    let query = |b: &Arc<Table>| -> Statement {
        Select::new([a.c("id")])
            .from(TableRef::new(a.clone()).join_inferred(b))
            .into()
    };

    let cache = CompiledCache::with_capacity(10).unwrap();

    let x = get_or_compile(&query(&b("x_id")), &Sqlite, Some(&cache)).unwrap();
    let y = get_or_compile(&query(&b("y_id")), &Sqlite, Some(&cache)).unwrap();

    assert_eq!(x.status, CacheStatus::Miss);
    assert_eq!(y.status, CacheStatus::Miss);
    assert_eq!(x.compiled.sql(), "SELECT a.id FROM a JOIN b ON a.id = b.x_id");
    assert_eq!(y.compiled.sql(), "SELECT a.id FROM a JOIN b ON a.id = b.y_id");
    assert_eq!(cache.len(), 2);

    let again = get_or_compile(&query(&b("y_id")), &Sqlite, Some(&cache)).unwrap();
    assert_eq!(again.status, CacheStatus::Hit);
    assert_eq!(again.compiled.sql(), "SELECT a.id FROM a JOIN b ON a.id = b.y_id");
}

#[test]
fn concurrent_lookups_while_pruning() {
    let cache = CompiledCache::new(4, 0.5).unwrap();

    std::thread::scope(|s| {
        for t in 0..4usize {
            let cache = &cache;
            s.spawn(move || {
                let users = users();

                for i in 0..50usize {
                    let n = (t * 7 + i) % 12;
                    let stmt: Statement = Select::new([users.c("id").label(format!("c{n}"))])
                        .from(&users)
                        .filter(users.c("id").eq(n as i64))
                        .into();

                    let lookup = get_or_compile(&stmt, &Sqlite, Some(cache)).unwrap();

                    // Entries evicted by other threads stay usable.
                    let values = lookup
                        .compiled
                        .construct_params(&lookup.extracted, &[], &Params::new())
                        .unwrap();
                    let resolved = resolve(&lookup.compiled, &Sqlite, &values).unwrap();

                    assert_eq!(
                        &*resolved.sql,
                        format!("SELECT users.id AS c{n} FROM users WHERE users.id = ?1")
                    );
                    assert_eq!(
                        resolved.params,
                        BoundParams::Positional(vec![Value::I64(n as i64)])
                    );
                }
            });
        }
    });

    // A pruning pass skipped under contention runs on the next insert.
    lookup(&cache, &labeled(&users(), 100));
    assert!(cache.len() <= 6, "len = {}", cache.len());

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 201);
}

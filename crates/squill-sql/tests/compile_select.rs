use pretty_assertions::assert_eq;
use squill_core::{
    dialect::{Dialect, Mysql, Oracle, Postgresql, Sqlite},
    schema::Table,
    stmt::{self, Expr, Select, Statement, Type},
};
use squill_sql::{CompiledStatement, Compiler};

use std::sync::Arc;

fn users() -> Arc<Table> {
    Table::builder("users")
        .column("id", Type::I64)
        .column("name", Type::String)
        .nullable_column("email", Type::String)
        .primary_key(["id"])
        .build()
        .unwrap()
}

fn addresses() -> Arc<Table> {
    Table::builder("addresses")
        .column("id", Type::I64)
        .column("user_id", Type::I64)
        .column("street", Type::String)
        .primary_key(["id"])
        .foreign_key(["user_id"], "users", ["id"])
        .build()
        .unwrap()
}

fn compile(dialect: &dyn Dialect, stmt: impl Into<Statement>) -> CompiledStatement {
    let stmt = stmt.into();
    Compiler::new(dialect).compile(&stmt, None).unwrap()
}

fn binding_names(compiled: &CompiledStatement) -> Vec<&str> {
    compiled.bindings().keys().map(String::as_str).collect()
}

// ---------------------------------------------------------------------------
// Column lists and filters
// ---------------------------------------------------------------------------

#[test]
fn select_all_columns() {
    let users = users();
    let compiled = compile(&Sqlite, users.select());

    assert_eq!(
        compiled.sql(),
        "SELECT users.id, users.name, users.email FROM users"
    );
    assert!(compiled.bindings().is_empty());
    assert!(compiled.returns_rows());
}

#[test]
fn filter_binds_are_named_after_the_column() {
    let users = users();
    let compiled = compile(&Sqlite, users.select().filter(users.c("id").eq(5i64)));

    assert_eq!(
        compiled.sql(),
        "SELECT users.id, users.name, users.email FROM users WHERE users.id = ?1"
    );
    assert_eq!(binding_names(&compiled), ["id_1"]);
    assert_eq!(compiled.binding("id_1").unwrap().ty, Type::I64);
}

#[test]
fn numeric_placeholders_follow_first_appearance() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("id").gt(1i64))
        .filter(users.c("name").eq("bob"));

    let compiled = compile(&Postgresql, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id > $1 AND users.name = $2"
    );
    assert_eq!(binding_names(&compiled), ["id_1", "name_1"]);
}

#[test]
fn repeated_anonymous_hints_are_numbered() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("id").gt(1i64))
        .filter(users.c("id").lt(10i64));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id > ?1 AND users.id < ?2"
    );
    assert_eq!(binding_names(&compiled), ["id_1", "id_2"]);
}

#[test]
fn named_paramstyle() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("name").eq("bob"));

    let compiled = compile(&Oracle, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.name = :name_1"
    );
}

#[test]
fn or_nested_in_and_is_parenthesized() {
    let users = users();
    let query = Select::new([users.c("id")]).from(&users).filter(Expr::and(
        Expr::or(users.c("id").eq(1i64), users.c("id").eq(2i64)),
        users.c("email").is_not_null(),
    ));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE (users.id = ?1 OR users.id = ?2) AND users.email IS NOT NULL"
    );
}

#[test]
fn comparing_to_null_renders_is_null() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("email").eq(Expr::null()));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.email IS NULL"
    );
}

#[test]
fn labels_render_in_the_column_list() {
    let users = users();
    let query = Select::new([
        users.c("name").label("user_name"),
        Expr::count_star().label("total"),
    ])
    .from(&users)
    .group_by([users.c("name")]);

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.name AS user_name, COUNT(*) AS total FROM users GROUP BY users.name"
    );
}

#[test]
fn fixed_in_list() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("id").in_list([1i64, 2, 3]));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id IN (?1, ?2, ?3)"
    );
    assert_eq!(binding_names(&compiled), ["id_1", "id_2", "id_3"]);
}

#[test]
fn expanding_in_list_renders_a_marker() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("id").in_expanding([1i64, 2, 3]));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id IN (__[POSTCOMPILE_id_1])"
    );
    assert!(compiled.has_post_compile());

    let binding = compiled.binding("id_1").unwrap();
    assert!(binding.expanding);
    assert_eq!(binding.ty, Type::list(Type::I64));
}

#[test]
fn literals_render_inline() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("name").eq(Expr::literal("o'brien")));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.name = 'o''brien'"
    );
    assert!(compiled.bindings().is_empty());
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[test]
fn identifiers_that_require_quotes() {
    let accounts = Table::builder("Accounts")
        .column("id", Type::I64)
        .column("order", Type::I32)
        .build()
        .unwrap();

    let query = Select::new([accounts.c("id"), accounts.c("order")]).from(&accounts);

    assert_eq!(
        compile(&Sqlite, query.clone()).sql(),
        r#"SELECT "Accounts".id, "Accounts"."order" FROM "Accounts""#
    );
    assert_eq!(
        compile(&Mysql, query).sql(),
        "SELECT `Accounts`.id, `Accounts`.`order` FROM `Accounts`"
    );
}

#[test]
fn schema_qualified_table() {
    let audit = Table::builder("events")
        .schema("audit")
        .column("id", Type::I64)
        .build()
        .unwrap();

    let compiled = compile(&Postgresql, Select::new([audit.c("id")]).from(&audit));

    assert_eq!(
        compiled.sql(),
        "SELECT audit.events.id FROM audit.events"
    );
}

// ---------------------------------------------------------------------------
// Aliases and subqueries
// ---------------------------------------------------------------------------

#[test]
fn anonymous_aliases_are_numbered_per_statement() {
    let users = users();
    let u1 = users.anon_alias();
    let u2 = users.anon_alias();

    let query = Select::new([u1.c("id"), u2.c("id")])
        .from(u1.clone().join(u2.clone(), u1.c("id").eq(u2.c("id"))));

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT anon_1.id, anon_2.id FROM users AS anon_1 JOIN users AS anon_2 ON anon_1.id = anon_2.id"
    );
}

#[test]
fn derived_table() {
    let users = users();
    let inner = Select::new([users.c("id"), users.c("name")])
        .from(&users)
        .filter(users.c("email").is_not_null())
        .alias("named");

    let query = Select::new([inner.c("name")]).from(inner.clone());

    let compiled = compile(&Postgresql, query);

    assert_eq!(
        compiled.sql(),
        "SELECT named.name FROM (SELECT users.id, users.name FROM users WHERE users.email IS NOT NULL) AS named"
    );
}

#[test]
fn common_table_expression() {
    let users = users();
    let cte = stmt::Cte::new(
        "active",
        Select::new([users.c("id")])
            .from(&users)
            .filter(users.c("email").is_not_null()),
    );
    let active = cte.table();

    let query = stmt::Query::new(Select::new([active.c("id")]).from(active.clone())).with(cte);

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "WITH active AS (SELECT users.id FROM users WHERE users.email IS NOT NULL) SELECT active.id FROM active"
    );
}

#[test]
fn scalar_subquery_and_exists() {
    let users = users();
    let addresses = addresses();

    let has_address = Expr::exists(
        Select::new([Expr::literal(1i64)])
            .from(&addresses)
            .filter(addresses.c("user_id").eq(users.c("id"))),
    );

    let query = Select::new([users.c("id")]).from(&users).filter(has_address);

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE EXISTS (SELECT 1 FROM addresses WHERE addresses.user_id = users.id)"
    );
}

#[test]
fn select_without_from_uses_the_dual_table() {
    let query = Select::new([Expr::literal(1i64)]);

    assert_eq!(compile(&Sqlite, query.clone()).sql(), "SELECT 1");
    assert_eq!(compile(&Oracle, query).sql(), "SELECT 1 FROM DUAL");
}

#[test]
fn select_requires_a_column() {
    let users = users();
    let stmt: Statement = Select::new(Vec::<Expr>::new()).from(&users).into();

    let err = Compiler::new(&Sqlite).compile(&stmt, None).unwrap_err();
    assert!(err.is_invalid_statement());
}

// ---------------------------------------------------------------------------
// Compound queries
// ---------------------------------------------------------------------------

#[test]
fn union_ordered_by_a_labeled_column() {
    let users = users();
    let addresses = addresses();

    let query = stmt::union([
        Select::new([Expr::from(users.c("id")), users.c("name").label("who")])
            .from(&users)
            .filter(users.c("id").lt(10i64)),
        Select::new([addresses.c("user_id"), addresses.c("street")]).from(&addresses),
    ])
    .order_by([users.c("name").desc(), users.c("id").asc()]);

    let compiled = compile(&Sqlite, query);

    assert_eq!(
        compiled.sql(),
        "SELECT users.id, users.name AS who FROM users WHERE users.id < ?1 \
         UNION SELECT addresses.user_id, addresses.street FROM addresses \
         ORDER BY who DESC, id ASC"
    );
}

#[test]
fn union_ordered_by_an_unselected_column() {
    let users = users();
    let addresses = addresses();

    let stmt: Statement = stmt::union_all([
        Select::new([users.c("id")]).from(&users),
        Select::new([addresses.c("user_id")]).from(&addresses),
    ])
    .order_by([users.c("name")])
    .into();

    let err = Compiler::new(&Sqlite).compile(&stmt, None).unwrap_err();
    assert!(err.is_invalid_statement());
}

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use squill_core::{
    dialect::{Dialect, Mysql, Oracle, Postgresql, Sqlite},
    driver::{BoundParams, ExecutableStatement},
    schema::Table,
    stmt::{BindParam, Expr, Select, Statement, Type, Value},
};
use squill_sql::{resolve, CompiledStatement, Compiler, ExtractedParams, Params};

use std::sync::Arc;

fn users() -> Arc<Table> {
    Table::builder("users")
        .column("id", Type::I64)
        .column("name", Type::String)
        .primary_key(["id"])
        .build()
        .unwrap()
}

fn compile(dialect: &dyn Dialect, stmt: impl Into<Statement>) -> CompiledStatement {
    let stmt = stmt.into();
    Compiler::new(dialect).compile(&stmt, None).unwrap()
}

fn execute(dialect: &dyn Dialect, compiled: &CompiledStatement, params: &Params) -> ExecutableStatement {
    let values = compiled
        .construct_params(&ExtractedParams::default(), &[], params)
        .unwrap();
    resolve(compiled, dialect, &values).unwrap()
}

fn ids_in(users: &Arc<Table>, ids: Vec<i64>) -> Select {
    Select::new([users.c("id")])
        .from(users)
        .filter(users.c("id").in_expanding(ids))
        .filter(users.c("name").ne("root"))
}

// ---------------------------------------------------------------------------
// Expanding parameters
// ---------------------------------------------------------------------------

#[test]
fn expanding_qmark() {
    let users = users();
    let compiled = compile(&Mysql, ids_in(&users, vec![1, 2, 3]));

    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id IN (__[POSTCOMPILE_id_1]) AND users.name != ?"
    );

    let stmt = execute(&Mysql, &compiled, &Params::new());

    assert_eq!(
        &*stmt.sql,
        "SELECT users.id FROM users WHERE users.id IN (?, ?, ?) AND users.name != ?"
    );
    assert_eq!(
        stmt.params,
        BoundParams::Positional(vec![
            Value::I64(1),
            Value::I64(2),
            Value::I64(3),
            Value::from("root"),
        ])
    );
}

#[test]
fn expanding_renumbers_numeric_placeholders() {
    let users = users();
    let compiled = compile(&Postgresql, ids_in(&users, vec![1, 2, 3]));

    // Placeholders are numbered once the list length is known.
    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.id IN (__[POSTCOMPILE_id_1]) AND users.name != $1"
    );

    let stmt = execute(&Postgresql, &compiled, &Params::new());

    assert_eq!(
        &*stmt.sql,
        "SELECT users.id FROM users WHERE users.id IN ($1, $2, $3) AND users.name != $4"
    );
    assert_eq!(stmt.params.len(), 4);
}

#[test]
fn expanding_named() {
    let users = users();
    let compiled = compile(&Oracle, ids_in(&users, vec![4, 5]));

    let stmt = execute(&Oracle, &compiled, &Params::new());

    assert_eq!(
        &*stmt.sql,
        "SELECT users.id FROM users WHERE users.id IN (:id_1_1, :id_1_2) AND users.name != :name_1"
    );

    let mut expected = IndexMap::new();
    expected.insert("id_1_1".to_string(), Value::I64(4));
    expected.insert("id_1_2".to_string(), Value::I64(5));
    expected.insert("name_1".to_string(), Value::from("root"));
    assert_eq!(stmt.params, BoundParams::Named(expected));
}

#[test]
fn empty_expanding_list_renders_the_empty_set() {
    let users = users();
    let compiled = compile(&Sqlite, ids_in(&users, vec![]));

    let stmt = execute(&Sqlite, &compiled, &Params::new());

    assert_eq!(
        &*stmt.sql,
        "SELECT users.id FROM users WHERE users.id IN (SELECT 1 FROM (SELECT 1) WHERE 1!=1) \
         AND users.name != ?1"
    );
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::from("root")]));
}

#[test]
fn literal_execute_expanding_renders_values() {
    let users = users();
    let query = Select::new([users.c("id")]).from(&users).filter(Expr::in_list(
        users.c("id"),
        [BindParam::expanding([7i64, 8]).literal_execute()],
    ));

    let compiled = compile(&Sqlite, query);
    let stmt = execute(&Sqlite, &compiled, &Params::new());

    assert_eq!(&*stmt.sql, "SELECT users.id FROM users WHERE users.id IN (7, 8)");
    assert!(stmt.params.is_empty());
}

#[test]
fn literal_execute_scalar() {
    let users = users();
    let query = Select::new([users.c("id")])
        .from(&users)
        .filter(users.c("name").eq(Expr::from("it's").literal_execute()));

    let compiled = compile(&Postgresql, query);
    assert_eq!(
        compiled.sql(),
        "SELECT users.id FROM users WHERE users.name = __[POSTCOMPILE_name_1]"
    );

    let stmt = execute(&Postgresql, &compiled, &Params::new());
    assert_eq!(
        &*stmt.sql,
        "SELECT users.id FROM users WHERE users.name = 'it''s'"
    );
}

#[test]
fn literal_execute_strings_stay_quoted_on_mysql() {
    let users = users();
    let query = Select::new([users.c("id")]).from(&users).filter(
        users
            .c("name")
            .eq(Expr::bind_named("n", r"\' OR 1=1 -- ").literal_execute()),
    );

    let compiled = compile(&Mysql, query);
    let stmt = execute(&Mysql, &compiled, &Params::new());

    assert_eq!(
        &*stmt.sql,
        r"SELECT users.id FROM users WHERE users.name = '\\'' OR 1=1 -- '"
    );
}

#[test]
fn expanding_parameter_requires_a_list() {
    let users = users();
    let compiled = compile(&Sqlite, ids_in(&users, vec![1]));

    let err = compiled
        .construct_params(
            &ExtractedParams::default(),
            &[],
            &Params::new().set("id_1", 1i64),
        )
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

// ---------------------------------------------------------------------------
// Values supplied at execution
// ---------------------------------------------------------------------------

#[test]
fn deferred_bind_requires_a_value() {
    let users = users();
    let query = Select::new([users.c("name")])
        .from(&users)
        .filter(users.c("id").eq(Expr::bind_deferred("user_id", Type::I64)));

    let compiled = compile(&Sqlite, query);
    assert_eq!(
        compiled.sql(),
        "SELECT users.name FROM users WHERE users.id = ?1"
    );

    let err = compiled
        .construct_params(&ExtractedParams::default(), &[], &Params::new())
        .unwrap_err();
    assert!(err.is_missing_parameter());

    let stmt = execute(&Sqlite, &compiled, &Params::new().set("user_id", 42i64));
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(42)]));
}

#[test]
fn params_override_statement_values() {
    let users = users();
    let query = Select::new([users.c("name")])
        .from(&users)
        .filter(users.c("id").eq(Expr::bind_named("user_id", 1i64)));

    let compiled = compile(&Sqlite, query);
    let stmt = execute(&Sqlite, &compiled, &Params::new().set("user_id", 2i64));

    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(2)]));
}

#[test]
fn repeated_named_bind_qmark() {
    let users = users();
    let query = Select::new([users.c("name")]).from(&users).filter(Expr::or(
        users.c("id").eq(Expr::bind_named("user_id", 3i64)),
        users.c("id").gt(Expr::bind_named("user_id", 3i64)),
    ));

    let compiled = compile(&Mysql, query.clone());
    assert_eq!(compiled.bindings().len(), 1);

    let stmt = execute(&Mysql, &compiled, &Params::new());
    assert_eq!(
        &*stmt.sql,
        "SELECT users.name FROM users WHERE users.id = ? OR users.id > ?"
    );
    assert_eq!(
        stmt.params,
        BoundParams::Positional(vec![Value::I64(3), Value::I64(3)])
    );

    // Numbered styles bind the value once.
    let compiled = compile(&Postgresql, query);
    let stmt = execute(&Postgresql, &compiled, &Params::new());
    assert_eq!(
        &*stmt.sql,
        "SELECT users.name FROM users WHERE users.id = $1 OR users.id > $1"
    );
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(3)]));
}

#[test]
fn conflicting_named_binds() {
    let users = users();
    let query = Select::new([users.c("name")]).from(&users).filter(Expr::or(
        users.c("id").eq(Expr::bind_named("key", 3i64)),
        users.c("name").eq(Expr::bind_named("key", "x")),
    ));

    let stmt: Statement = query.into();
    let err = Compiler::new(&Sqlite).compile(&stmt, None).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn value_count_must_match_bindings() {
    let users = users();
    let compiled = compile(
        &Sqlite,
        Select::new([users.c("name")])
            .from(&users)
            .filter(users.c("id").eq(1i64)),
    );

    let err = resolve(&compiled, &Sqlite, &[]).unwrap_err();
    assert!(err.is_invalid_argument());
}

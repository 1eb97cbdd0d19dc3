use pretty_assertions::assert_eq;
use squill_core::{
    dialect::{Postgresql, Sqlite},
    driver::BoundParams,
    schema::Table,
    stmt::{Expr, Select, Type, Value},
};
use squill_sql::{
    get_or_compile_template, resolve, CacheStatus, CompiledCache, Params, StatementTemplate,
};

use std::sync::Arc;

fn users() -> Arc<Table> {
    Table::builder("users")
        .column("id", Type::I64)
        .column("name", Type::String)
        .column("active", Type::Bool)
        .primary_key(["id"])
        .build()
        .unwrap()
}

fn by_id(users: &Arc<Table>) -> StatementTemplate {
    StatementTemplate::new(
        Select::new([users.c("name")])
            .from(users)
            .filter(users.c("id").eq(Expr::arg(0)))
            .filter(users.c("active").eq(true)),
        [Type::I64],
    )
    .unwrap()
}

#[test]
fn args_are_named_by_position() {
    let users = users();
    let template = by_id(&users);

    let lookup = get_or_compile_template(&template, &Sqlite, None).unwrap();

    assert_eq!(
        lookup.compiled.sql(),
        "SELECT users.name FROM users WHERE users.id = ?1 AND users.active = ?2"
    );

    let names: Vec<_> = lookup.compiled.bindings().keys().map(String::as_str).collect();
    assert_eq!(names, ["arg_0", "active_1"]);
}

#[test]
fn executions_hit_the_cache() {
    let users = users();
    let template = by_id(&users);
    let cache = CompiledCache::with_capacity(10).unwrap();

    let first = get_or_compile_template(&template, &Postgresql, Some(&cache)).unwrap();
    let second = get_or_compile_template(&template, &Postgresql, Some(&cache)).unwrap();

    assert_eq!(first.status, CacheStatus::Miss);
    assert_eq!(second.status, CacheStatus::Hit);
    assert!(Arc::ptr_eq(&first.compiled, &second.compiled));

    // Argument values come from the execution, statement values from the
    // template.
    for id in [7i64, 8] {
        let args = [Value::I64(id)];
        template.check_args(&args).unwrap();

        let values = second
            .compiled
            .construct_params(&second.extracted, &args, &Params::new())
            .unwrap();
        let stmt = resolve(&second.compiled, &Postgresql, &values).unwrap();

        assert_eq!(
            stmt.params,
            BoundParams::Positional(vec![Value::I64(id), Value::Bool(true)])
        );
    }
}

#[test]
fn template_and_statement_share_entries() {
    let users = users();
    let template = by_id(&users);
    let cache = CompiledCache::with_capacity(10).unwrap();

    get_or_compile_template(&template, &Sqlite, Some(&cache)).unwrap();
    let lookup = get_or_compile_template(&by_id(&users), &Sqlite, Some(&cache)).unwrap();

    assert_eq!(lookup.status, CacheStatus::Hit);
    assert_eq!(cache.len(), 1);
}

#[test]
fn undeclared_argument() {
    let users = users();
    let err = StatementTemplate::new(
        Select::new([users.c("name")])
            .from(&users)
            .filter(users.c("id").eq(Expr::arg(1))),
        [Type::I64],
    )
    .unwrap_err();

    assert!(err.is_invalid_argument());
}

#[test]
fn argument_used_with_another_type() {
    let users = users();
    let err = StatementTemplate::new(
        Select::new([users.c("name")])
            .from(&users)
            .filter(users.c("name").eq(Expr::arg(0))),
        [Type::I64],
    )
    .unwrap_err();

    assert!(err.is_invalid_argument());
}

#[test]
fn check_args() {
    let users = users();
    let template = by_id(&users);

    assert!(template.check_args(&[Value::I64(1)]).is_ok());
    assert!(template.check_args(&[Value::I32(1)]).is_ok());
    assert!(template.check_args(&[Value::Null]).is_ok());

    assert!(template.check_args(&[]).unwrap_err().is_invalid_argument());
    assert!(template
        .check_args(&[Value::I64(1), Value::I64(2)])
        .unwrap_err()
        .is_invalid_argument());
    assert!(template
        .check_args(&[Value::from("1")])
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn list_arguments_expand() {
    let users = users();
    let template = StatementTemplate::new(
        Select::new([users.c("name")]).from(&users).filter(Expr::in_list(
            users.c("id"),
            [Expr::arg_typed(0, Type::list(Type::I64))],
        )),
        [Type::list(Type::I64)],
    )
    .unwrap();

    let lookup = get_or_compile_template(&template, &Sqlite, None).unwrap();
    assert_eq!(
        lookup.compiled.sql(),
        "SELECT users.name FROM users WHERE users.id IN (__[POSTCOMPILE_arg_0])"
    );

    let args = [Value::List(vec![Value::I64(1), Value::I64(2)])];
    template.check_args(&args).unwrap();

    let values = lookup
        .compiled
        .construct_params(&lookup.extracted, &args, &Params::new())
        .unwrap();
    let stmt = resolve(&lookup.compiled, &Sqlite, &values).unwrap();

    assert_eq!(&*stmt.sql, "SELECT users.name FROM users WHERE users.id IN (?1, ?2)");
}

#[test]
fn list_arguments_must_be_typed_at_use() {
    let users = users();
    let err = StatementTemplate::new(
        Select::new([users.c("name")])
            .from(&users)
            .filter(Expr::in_list(users.c("id"), [Expr::arg(0)])),
        [Type::list(Type::I64)],
    )
    .unwrap_err();

    assert!(err.is_invalid_argument());
}

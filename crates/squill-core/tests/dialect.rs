use pretty_assertions::assert_eq;
use squill_core::{
    dialect::{Dialect, Mssql, Mysql, Oracle, Paramstyle, Postgresql, Sqlite},
    stmt::{Type, Value},
};

#[test]
fn identifiers_requiring_quotes() {
    for ident in ["users", "user_id", "_tmp", "col$1"] {
        assert!(!Sqlite.requires_quotes(ident), "{ident}");
    }

    for ident in ["Users", "order", "user", "first name", "1st", ""] {
        assert!(Sqlite.requires_quotes(ident), "{ident}");
    }
}

#[test]
fn quoting_escapes_the_quote_character() {
    assert_eq!(Sqlite.quote_identifier(r#"a"b"#), r#""a""b""#);
    assert_eq!(Mysql.quote_identifier("a`b"), "`a``b`");
    assert_eq!(Mssql.quote_identifier("a]b"), "[a]]b]");
}

#[test]
fn literals() {
    assert_eq!(Sqlite.render_literal(&Value::from("it's")).unwrap(), "'it''s'");
    assert_eq!(Sqlite.render_literal(&Value::Null).unwrap(), "NULL");
    assert_eq!(Sqlite.render_literal(&Value::Bool(true)).unwrap(), "1");
    assert_eq!(Postgresql.render_literal(&Value::Bool(true)).unwrap(), "true");
    assert_eq!(Sqlite.render_literal(&Value::F64(1.5)).unwrap(), "1.5");
    assert_eq!(Mssql.render_literal(&Value::from("x")).unwrap(), "N'x'");
    assert_eq!(
        Sqlite.render_literal(&Value::Bytes(vec![0xde, 0xad])).unwrap(),
        "X'DEAD'"
    );
}

#[test]
fn mysql_escapes_backslashes() {
    assert_eq!(
        Mysql.render_literal(&Value::from(r"\' OR 1=1 -- ")).unwrap(),
        r"'\\'' OR 1=1 -- '"
    );
    assert_eq!(Mysql.render_literal(&Value::from(r"a\b")).unwrap(), r"'a\\b'");

    // Backslash is an ordinary character elsewhere.
    assert_eq!(Postgresql.render_literal(&Value::from(r"a\b")).unwrap(), r"'a\b'");
}

#[test]
fn unrenderable_literals() {
    let err = Sqlite.render_literal(&Value::F64(f64::NAN)).unwrap_err();
    assert!(err.is_invalid_argument());

    let err = Sqlite
        .render_literal(&Value::List(vec![Value::I64(1)]))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn column_types() {
    assert_eq!(Sqlite.type_name(&Type::I64).unwrap(), "BIGINT");
    assert_eq!(Mysql.type_name(&Type::String).unwrap(), "VARCHAR(255)");
    assert_eq!(Oracle.type_name(&Type::I64).unwrap(), "NUMBER(19)");
    assert_eq!(Postgresql.type_name(&Type::Bytes).unwrap(), "BYTEA");

    let err = Sqlite.type_name(&Type::list(Type::I64)).unwrap_err();
    assert!(err.is_unsupported_feature());
}

#[test]
fn paramstyles() {
    assert_eq!(Sqlite.paramstyle(), Paramstyle::NumericQmark);
    assert_eq!(Postgresql.paramstyle(), Paramstyle::Numeric);
    assert_eq!(Mysql.paramstyle(), Paramstyle::Qmark);
    assert_eq!(Oracle.paramstyle(), Paramstyle::Named);

    assert!(Paramstyle::Numeric.is_numbered());
    assert!(!Paramstyle::Named.is_positional());
}

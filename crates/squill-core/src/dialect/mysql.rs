use super::{Dialect, LimitStyle, Paramstyle, UpdateFromStyle};
use crate::{
    stmt::{Type, Value},
    Result,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Mysql;

impl Dialect for Mysql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    fn supports_parameterized_limit(&self) -> bool {
        true
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset {
            unbounded: Some("18446744073709551615"),
        }
    }

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Qmark
    }

    fn update_from_style(&self) -> UpdateFromStyle {
        UpdateFromStyle::MultiTable
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }

    /// Backslash is an escape character inside MySQL string literals.
    fn render_literal(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(value) => Ok(super::quote_string(&value.replace('\\', "\\\\"))),
            _ => super::default_render_literal(self, value),
        }
    }

    fn type_name(&self, ty: &Type) -> Result<String> {
        match ty {
            Type::String => Ok("VARCHAR(255)".to_string()),
            Type::F64 => Ok("DOUBLE".to_string()),
            _ => super::default_type_name(ty),
        }
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }
}

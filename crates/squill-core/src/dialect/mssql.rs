use super::{hex, Dialect, LimitStyle, Paramstyle, UpdateFromStyle};
use crate::{
    stmt::{Type, Value},
    Result,
};

/// Microsoft SQL Server.
///
/// `TOP` and `OFFSET ... FETCH` do not accept bound parameters, so limit
/// values are rendered inline when the statement is executed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mssql;

impl Dialect for Mssql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    fn supports_parameterized_limit(&self) -> bool {
        false
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::OffsetFetch
    }

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Qmark
    }

    fn update_from_style(&self) -> UpdateFromStyle {
        UpdateFromStyle::From
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn render_literal(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(value) => Ok(format!("N{}", super::quote_string(value))),
            Value::Bytes(bytes) => Ok(format!("0x{}", hex(bytes))),
            _ => super::default_render_literal(self, value),
        }
    }

    fn type_name(&self, ty: &Type) -> Result<String> {
        match ty {
            Type::Bool => Ok("BIT".to_string()),
            Type::F64 => Ok("FLOAT".to_string()),
            Type::String => Ok("NVARCHAR(max)".to_string()),
            Type::Bytes => Ok("VARBINARY(max)".to_string()),
            _ => super::default_type_name(ty),
        }
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{}]", ident.replace(']', "]]"))
    }
}

use super::{hex, Dialect, LimitStyle, Paramstyle, UpdateFromStyle};
use crate::{
    stmt::{Type, Value},
    Result,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Postgresql;

impl Dialect for Postgresql {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    fn supports_parameterized_limit(&self) -> bool {
        true
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset { unbounded: None }
    }

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Numeric
    }

    fn update_from_style(&self) -> UpdateFromStyle {
        UpdateFromStyle::From
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value {
            "true"
        } else {
            "false"
        }
    }

    fn render_literal(&self, value: &Value) -> Result<String> {
        match value {
            Value::Bytes(bytes) => Ok(format!("'\\x{}'::bytea", hex(bytes))),
            _ => super::default_render_literal(self, value),
        }
    }

    fn type_name(&self, ty: &Type) -> Result<String> {
        match ty {
            Type::Bytes => Ok("BYTEA".to_string()),
            _ => super::default_type_name(ty),
        }
    }
}

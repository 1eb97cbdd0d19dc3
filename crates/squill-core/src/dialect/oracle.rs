use super::{hex, Dialect, LimitStyle, Paramstyle};
use crate::{
    stmt::{Type, Value},
    Result,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    fn supports_parameterized_limit(&self) -> bool {
        true
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::RowNumber
    }

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::Named
    }

    fn table_alias_keyword(&self) -> &'static str {
        " "
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
            Value::Bytes(bytes) => Ok(format!("HEXTORAW('{}')", hex(bytes))),
            _ => super::default_render_literal(self, value),
        }
    }

    fn type_name(&self, ty: &Type) -> Result<String> {
        match ty {
            Type::Bool => Ok("NUMBER(1)".to_string()),
            Type::I32 => Ok("NUMBER(10)".to_string()),
            Type::I64 => Ok("NUMBER(19)".to_string()),
            Type::F64 => Ok("BINARY_DOUBLE".to_string()),
            Type::String => Ok("VARCHAR2(4000)".to_string()),
            _ => super::default_type_name(ty),
        }
    }

    fn dual_table(&self) -> Option<&'static str> {
        Some("DUAL")
    }

    fn empty_set_expr(&self) -> &'static str {
        "SELECT 1 FROM DUAL WHERE 1!=1"
    }
}

use super::{Dialect, LimitStyle, Paramstyle, UpdateFromStyle};

#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn supports_statement_cache(&self) -> bool {
        true
    }

    fn supports_parameterized_limit(&self) -> bool {
        true
    }

    fn limit_style(&self) -> LimitStyle {
        LimitStyle::LimitOffset {
            unbounded: Some("-1"),
        }
    }

    fn paramstyle(&self) -> Paramstyle {
        Paramstyle::NumericQmark
    }

    fn update_from_style(&self) -> UpdateFromStyle {
        UpdateFromStyle::From
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value {
            "1"
        } else {
            "0"
        }
    }

    fn empty_set_expr(&self) -> &'static str {
        "SELECT 1 FROM (SELECT 1) WHERE 1!=1"
    }
}

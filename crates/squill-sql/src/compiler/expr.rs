use super::{Comma, Delimited, Formatter, Ident, ToSql};

use squill_core::{stmt, Result};

impl<'stmt> ToSql<'stmt> for &'stmt stmt::Expr {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        use stmt::Expr::*;

        match self {
            And(expr) if expr.operands.is_empty() => fmt!(f, "1 = 1"),
            And(expr) => {
                let operands = expr
                    .operands
                    .iter()
                    .map(|operand| Nested(operand, matches!(operand, Or(_))));
                fmt!(f, Delimited(operands, " AND "));
            }
            Arg(arg) => f.arg(arg, false)?,
            BinaryOp(expr) => {
                let lhs = Nested(&expr.lhs, is_compound(&expr.lhs));
                let rhs = Nested(&expr.rhs, is_compound(&expr.rhs));
                fmt!(f, lhs " " expr.op.as_str() " " rhs);
            }
            Bind(bind) => f.bind(bind, false)?,
            Cast(expr) => {
                let ty = f.dialect.type_name(&expr.ty)?;
                fmt!(f, "CAST(" expr.expr " AS " ty ")");
            }
            Column(column) => f.column(column)?,
            Custom(custom) => {
                let sql = custom.0.to_sql(f.dialect)?;
                fmt!(f, sql);
            }
            Exists(expr) => fmt!(f, "EXISTS (" expr.query ")"),
            Func(func) => fmt!(f, func.name.as_str() "(" Comma(&func.args) ")"),
            InList(expr) => {
                fmt!(f, Nested(&expr.expr, is_compound(&expr.expr)) " IN (");
                if expr.list.is_empty() {
                    fmt!(f, f.dialect.empty_set_expr());
                } else {
                    fmt!(f, Comma(&expr.list));
                }
                fmt!(f, ")");
            }
            InSubquery(expr) => {
                fmt!(f, Nested(&expr.expr, is_compound(&expr.expr)) " IN (" expr.query ")");
            }
            IsNull(expr) => {
                let op = if expr.negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, Nested(&expr.expr, is_compound(&expr.expr)) op);
            }
            // Labels only name a column of a column list. Anywhere else the
            // labeled expression stands for itself.
            Label(expr) => fmt!(f, expr.expr),
            Literal(value) => {
                let sql = f.dialect.render_literal(value)?;
                fmt!(f, sql);
            }
            Not(expr) => {
                let nested = !matches!(
                    &*expr.expr,
                    Column(_) | Bind(_) | Arg(_) | Literal(_) | Func(_) | Exists(_)
                );
                fmt!(f, "NOT " Nested(&expr.expr, nested));
            }
            Or(expr) if expr.operands.is_empty() => fmt!(f, "1 != 1"),
            Or(expr) => {
                let operands = expr.operands.iter().map(|operand| Nested(operand, false));
                fmt!(f, Delimited(operands, " OR "));
            }
            Stmt(expr) => fmt!(f, "(" expr.query ")"),
            Wildcard(qualifier) => {
                if f.qualify {
                    f.qualifier(qualifier)?;
                }
                fmt!(f, "*");
            }
        }

        Ok(())
    }
}

/// An entry of a column list: labels render as `expr AS name`.
pub(super) struct SelectColumn<'stmt>(pub(super) &'stmt stmt::Expr);

impl<'stmt> ToSql<'stmt> for SelectColumn<'stmt> {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        match self.0 {
            stmt::Expr::Label(label) => fmt!(f, label.expr " AS " Ident(&label.name)),
            expr => fmt!(f, expr),
        }
        Ok(())
    }
}

/// An operand, parenthesized when the flag is set.
struct Nested<'stmt>(&'stmt stmt::Expr, bool);

impl<'stmt> ToSql<'stmt> for Nested<'stmt> {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if self.1 {
            fmt!(f, "(" self.0 ")");
        } else {
            fmt!(f, self.0);
        }
        Ok(())
    }
}

fn is_compound(expr: &stmt::Expr) -> bool {
    matches!(
        expr,
        stmt::Expr::And(_) | stmt::Expr::Or(_) | stmt::Expr::BinaryOp(_) | stmt::Expr::Not(_)
    )
}

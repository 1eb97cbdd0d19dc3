use super::{expr::SelectColumn, limit, Comma, Formatter, Ident, ToSql};

use squill_core::{
    stmt::{self, Direction, ExprSet},
    Error, Result,
};

impl<'stmt> ToSql<'stmt> for &'stmt stmt::Query {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if let Some(with) = &self.with {
            fmt!(f, "WITH " Comma(&with.ctes) " ");
        }

        match &self.limit {
            Some(limit) => limit::query(f, self, limit)?,
            None => {
                fmt!(f, &self.body);
                order_by(f, self)?;
            }
        }

        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt stmt::Cte {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, Ident(&self.name) " AS (" self.query ")");
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt ExprSet {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        match self {
            ExprSet::Select(select) => select_with_top(f, select, None)?,
            ExprSet::SetOp(set_op) => {
                for (i, operand) in set_op.operands.iter().enumerate() {
                    if i > 0 {
                        fmt!(f, " " set_op.op.as_str() " ");
                    }

                    // Nested set operations keep their own grouping.
                    if matches!(operand, ExprSet::SetOp(_)) {
                        fmt!(f, "(" operand ")");
                    } else {
                        fmt!(f, operand);
                    }
                }
            }
            ExprSet::Values(values) => fmt!(f, values),
        }
        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt stmt::Values {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        if self.rows.is_empty() {
            return Err(Error::invalid_statement("VALUES requires at least one row"));
        }

        let rows = self.rows.iter().map(|row| ("(", Comma(row), ")"));
        fmt!(f, "VALUES " Comma(rows));
        Ok(())
    }
}

/// Renders a `SELECT`, with `TOP n` after the `SELECT` keyword when given.
pub(super) fn select_with_top<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    select: &'stmt stmt::Select,
    top: Option<&'stmt stmt::Expr>,
) -> Result<()> {
    if select.columns.is_empty() {
        return Err(Error::invalid_statement("SELECT requires at least one column"));
    }

    fmt!(f, "SELECT ");

    if select.distinct {
        fmt!(f, "DISTINCT ");
    }

    if let Some(top) = top {
        fmt!(f, "TOP ");
        limit::value(f, top)?;
        fmt!(f, " ");
    }

    fmt!(f, Comma(select.columns.iter().map(SelectColumn)));
    from_where(f, select)
}

/// The `FROM`, `WHERE`, `GROUP BY` and `HAVING` clauses of a `SELECT`.
pub(super) fn from_where<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    select: &'stmt stmt::Select,
) -> Result<()> {
    if !select.from.is_empty() {
        fmt!(f, " FROM " Comma(&select.from));
    } else if let Some(dual) = f.dialect.dual_table() {
        fmt!(f, " FROM " dual);
    }

    if let Some(filter) = &select.filter {
        fmt!(f, " WHERE " filter);
    }

    if !select.group_by.is_empty() {
        fmt!(f, " GROUP BY " Comma(&select.group_by));
    }

    if let Some(having) = &select.having {
        fmt!(f, " HAVING " having);
    }

    Ok(())
}

/// Renders the `ORDER BY` clause of a query, if it has one.
pub(super) fn order_by<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    query: &'stmt stmt::Query,
) -> Result<()> {
    let Some(order_by) = &query.order_by else {
        return Ok(());
    };

    fmt!(f, " ORDER BY ");

    let compound = match &query.body {
        ExprSet::SetOp(_) => query.body.first_select(),
        _ => None,
    };

    let mut sep = "";
    for item in &order_by.exprs {
        fmt!(f, sep);
        sep = ", ";

        match (&item.expr, compound) {
            (stmt::Expr::Label(label), _) => fmt!(f, Ident(&label.name)),
            (stmt::Expr::Column(column), Some(first)) => {
                fmt!(f, Ident(compound_column_name(first, column)?));
            }
            (expr, Some(_)) => f.qualified(false, |f| expr.to_sql(f))?,
            (expr, None) => fmt!(f, expr),
        }

        fmt!(f, direction(item.direction));
    }

    Ok(())
}

/// Renders the terms of an `ORDER BY` list as plain expressions, for use
/// inside a window function.
pub(super) fn order_by_exprs<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    order_by: &'stmt stmt::OrderBy,
) -> Result<()> {
    let items = order_by.exprs.iter().map(|item| (&item.expr, direction(item.direction)));
    fmt!(f, Comma(items));
    Ok(())
}

/// The name under which a compound query exposes `column`: the label or
/// bare name of the matching column of its first `SELECT`.
fn compound_column_name<'stmt>(
    first: &'stmt stmt::Select,
    column: &stmt::ExprColumn,
) -> Result<&'stmt str> {
    for selected in &first.columns {
        match selected {
            stmt::Expr::Column(selected) if selected.is_same_column(column) => {
                return Ok(&selected.name)
            }
            stmt::Expr::Label(label) => {
                if let stmt::Expr::Column(selected) = &*label.expr {
                    if selected.is_same_column(column) {
                        return Ok(&label.name);
                    }
                }
            }
            _ => {}
        }
    }

    Err(Error::invalid_statement(format!(
        "ORDER BY column `{}` of a compound query must be selected by its first SELECT",
        column.name
    )))
}

fn direction(direction: Option<Direction>) -> &'static str {
    match direction {
        None => "",
        Some(Direction::Asc) => " ASC",
        Some(Direction::Desc) => " DESC",
    }
}

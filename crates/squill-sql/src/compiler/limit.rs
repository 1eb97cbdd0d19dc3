//! `LIMIT` / `OFFSET` rendering, one strategy per [`LimitStyle`].

use super::{
    expr::SelectColumn,
    query::{from_where, order_by, order_by_exprs, select_with_top},
    Comma, Formatter, Ident, ToSql,
};

use squill_core::{
    dialect::LimitStyle,
    stmt::{Expr, ExprSet, Limit, Query},
    Error, Result,
};

/// Renders a query that carries a `LIMIT` and/or `OFFSET`.
pub(super) fn query<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    query: &'stmt Query,
    limit: &'stmt Limit,
) -> Result<()> {
    if limit.limit.is_none() && limit.offset.is_none() {
        fmt!(f, &query.body);
        return order_by(f, query);
    }

    match f.dialect.limit_style() {
        LimitStyle::LimitOffset { unbounded } => {
            fmt!(f, &query.body);
            order_by(f, query)?;

            match &limit.limit {
                Some(count) => {
                    fmt!(f, " LIMIT ");
                    value(f, count)?;
                }
                None => {
                    if let Some(unbounded) = unbounded {
                        fmt!(f, " LIMIT " unbounded);
                    }
                }
            }

            if let Some(offset) = &limit.offset {
                fmt!(f, " OFFSET ");
                value(f, offset)?;
            }

            Ok(())
        }
        LimitStyle::OffsetFetch => offset_fetch(f, query, limit),
        LimitStyle::RowNumber => row_number(f, query, limit),
    }
}

/// Renders a `LIMIT` or `OFFSET` value.
///
/// On dialects that cannot bind these values, bind parameters are marked
/// to be rendered inline at execution time and literals are rendered
/// directly.
pub(super) fn value<'stmt>(f: &mut Formatter<'_, 'stmt>, expr: &'stmt Expr) -> Result<()> {
    if f.dialect.supports_parameterized_limit() {
        return expr.to_sql(f);
    }

    match expr {
        Expr::Bind(bind) => f.bind(bind, true),
        Expr::Arg(arg) => f.arg(arg, true),
        Expr::Literal(value) => match value.as_i64() {
            Some(n) if n >= 0 => {
                fmt!(f, n.to_string());
                Ok(())
            }
            _ => Err(Error::invalid_statement(format!(
                "LIMIT and OFFSET require a non-negative integer, got {value:?}"
            ))),
        },
        _ => Err(Error::unsupported_feature(format!(
            "{} requires LIMIT and OFFSET to be bind parameters or integer literals",
            f.dialect.name()
        ))),
    }
}

fn offset_fetch<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    query: &'stmt Query,
    limit: &'stmt Limit,
) -> Result<()> {
    if let (Some(count), None, ExprSet::Select(select)) = (&limit.limit, &limit.offset, &query.body)
    {
        select_with_top(f, select, Some(count))?;
        return order_by(f, query);
    }

    if query.order_by.is_none() {
        return Err(Error::invalid_statement(
            "OFFSET / FETCH pagination requires ORDER BY",
        ));
    }

    fmt!(f, &query.body);
    order_by(f, query)?;

    fmt!(f, " OFFSET ");
    match &limit.offset {
        Some(offset) => value(f, offset)?,
        None => fmt!(f, "0"),
    }
    fmt!(f, " ROWS");

    if let Some(count) = &limit.limit {
        fmt!(f, " FETCH NEXT ");
        value(f, count)?;
        fmt!(f, " ROWS ONLY");
    }

    Ok(())
}

/// Wraps the query in a derived table numbering its rows with
/// `ROW_NUMBER()` and filters on that number.
fn row_number<'stmt>(
    f: &mut Formatter<'_, 'stmt>,
    query: &'stmt Query,
    limit: &'stmt Limit,
) -> Result<()> {
    let ExprSet::Select(select) = &query.body else {
        return Err(Error::unsupported_feature(
            "ROW_NUMBER() pagination of a compound query",
        ));
    };

    let Some(ordering) = &query.order_by else {
        return Err(Error::invalid_statement(
            "ROW_NUMBER() pagination requires ORDER BY",
        ));
    };

    let mut names = Vec::with_capacity(select.columns.len());
    for (i, column) in select.columns.iter().enumerate() {
        if matches!(column, Expr::Wildcard(_)) {
            return Err(Error::unsupported_feature(
                "ROW_NUMBER() pagination of a wildcard column list",
            ));
        }

        names.push(match column.output_name() {
            Some(name) => name.to_string(),
            None => format!("col_{}", i + 1),
        });
    }

    let alias = f.fresh_alias();

    fmt!(f, "SELECT " Comma(names.iter().map(Ident)) " FROM (SELECT ");

    if select.distinct {
        fmt!(f, "DISTINCT ");
    }

    for (i, (column, name)) in select.columns.iter().zip(&names).enumerate() {
        if i > 0 {
            fmt!(f, ", ");
        }

        if column.output_name().is_some() {
            fmt!(f, SelectColumn(column));
        } else {
            fmt!(f, column " AS " Ident(name));
        }
    }

    fmt!(f, ", ROW_NUMBER() OVER (ORDER BY ");
    order_by_exprs(f, ordering)?;
    fmt!(f, ") AS squill_rn");

    from_where(f, select)?;

    fmt!(f, ")" f.dialect.table_alias_keyword() "anon_" alias " WHERE ");

    match (&limit.limit, &limit.offset) {
        (Some(count), Some(offset)) => {
            fmt!(f, "squill_rn > ");
            value(f, offset)?;
            fmt!(f, " AND squill_rn <= ");
            value(f, offset)?;
            fmt!(f, " + ");
            value(f, count)?;
        }
        (Some(count), None) => {
            fmt!(f, "squill_rn <= ");
            value(f, count)?;
        }
        (None, Some(offset)) => {
            fmt!(f, "squill_rn > ");
            value(f, offset)?;
        }
        (None, None) => {}
    }

    fmt!(f, " ORDER BY squill_rn");
    Ok(())
}

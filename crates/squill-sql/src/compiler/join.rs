use super::{Comma, Formatter, Ident, ToSql};

use squill_core::{
    schema::ForeignKey,
    stmt::{ExprColumn, JoinKind, JoinOn, TableFactor, TableRef, TableWithJoins},
    Error, Result,
};

impl<'stmt> ToSql<'stmt> for &'stmt TableWithJoins {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        fmt!(f, &self.relation);

        for (i, join) in self.joins.iter().enumerate() {
            let keyword = match join.kind {
                JoinKind::Inner => " JOIN ",
                JoinKind::Left => " LEFT OUTER JOIN ",
                JoinKind::Right => " RIGHT OUTER JOIN ",
                JoinKind::Full => " FULL OUTER JOIN ",
                JoinKind::Cross => " CROSS JOIN ",
            };

            fmt!(f, keyword join.table);

            match (&join.on, join.kind) {
                (JoinOn::None, JoinKind::Cross) => {}
                (JoinOn::None, _) => {
                    return Err(Error::invalid_statement(format!(
                        "{}requires an ON condition",
                        keyword.trim_start()
                    )))
                }
                (_, JoinKind::Cross) => {
                    return Err(Error::invalid_statement(
                        "CROSS JOIN does not take an ON condition",
                    ))
                }
                (JoinOn::Expr(on), _) => fmt!(f, " ON " on),
                (JoinOn::Infer, _) => {
                    let left = std::iter::once(&self.relation)
                        .chain(self.joins[..i].iter().map(|join| &join.table));
                    let condition = infer_join_condition(left, &join.table)?;

                    fmt!(f, " ON ");
                    for (i, (lhs, rhs)) in condition.iter().enumerate() {
                        if i > 0 {
                            fmt!(f, " AND ");
                        }
                        f.column(lhs)?;
                        fmt!(f, " = ");
                        f.column(rhs)?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl<'stmt> ToSql<'stmt> for &'stmt TableFactor {
    fn to_sql(self, f: &mut Formatter<'_, 'stmt>) -> Result<()> {
        match self {
            TableFactor::Table(table_ref) => {
                fmt!(f, &table_ref.table.table_name());

                if let Some(alias) = &table_ref.alias {
                    fmt!(f, f.dialect.table_alias_keyword() alias);
                }
            }
            TableFactor::Derived(derived) => {
                fmt!(f, "(" derived.subquery ")" f.dialect.table_alias_keyword() derived.alias);

                if !derived.columns.is_empty() {
                    fmt!(f, " (" Comma(derived.columns.iter().map(Ident)) ")");
                }
            }
            TableFactor::Cte(cte_ref) => {
                fmt!(f, Ident(&cte_ref.name));

                if let Some(alias) = &cte_ref.alias {
                    fmt!(f, f.dialect.table_alias_keyword() alias);
                }
            }
        }

        Ok(())
    }
}

/// Pairs of columns compared by an inferred join condition.
pub(crate) type Condition = Vec<(ExprColumn, ExprColumn)>;

/// Infers the `ON` condition joining `right` to the factors on the left of
/// the join from the foreign keys between them.
///
/// The left factors are searched in order and the first one sharing foreign
/// keys with `right` wins. Exactly one foreign key must relate the two.
pub(crate) fn infer_join_condition<'a>(
    left: impl Iterator<Item = &'a TableFactor>,
    right: &TableFactor,
) -> Result<Condition> {
    let Some(right) = right.as_table() else {
        return Err(Error::invalid_statement(
            "can't infer a join condition for a join to a subquery or CTE; specify the ON clause",
        ));
    };

    let mut searched = vec![];

    for left in left {
        let Some(left) = left.as_table() else {
            continue;
        };

        let mut candidates = vec![];

        // Foreign keys of the right table referencing the left table.
        for fk in &right.table.foreign_keys {
            if left.table.is_named(&fk.references) {
                candidates.push(fk_condition(fk, right, left));
            }
        }

        // Foreign keys of the left table referencing the right table.
        if left.table.table_name() != right.table.table_name() {
            for fk in &left.table.foreign_keys {
                if right.table.is_named(&fk.references) {
                    candidates.push(fk_condition(fk, left, right));
                }
            }
        }

        match candidates.len() {
            0 => searched.push(left),
            1 => return Ok(candidates.remove(0)),
            _ => {
                let candidates = candidates
                    .iter()
                    .map(|condition| describe(condition))
                    .collect::<Vec<_>>()
                    .join(", ");

                return Err(Error::invalid_statement(format!(
                    "can't determine join between '{}' and '{}'; tables have more than one \
                     foreign key constraint relationship between them ({candidates}); \
                     specify the ON clause explicitly",
                    left.table.table_name(),
                    right.table.table_name(),
                )));
            }
        }
    }

    let searched = searched
        .iter()
        .map(|left| format!("'{}'", left.table.table_name()))
        .collect::<Vec<_>>()
        .join(", ");

    Err(Error::invalid_statement(format!(
        "can't find any foreign key relationships between {} and '{}'",
        if searched.is_empty() { "the joined tables".to_string() } else { searched },
        right.table.table_name(),
    )))
}

/// The condition of one foreign key: referenced columns on the left of each
/// comparison, referencing columns on the right.
fn fk_condition(fk: &ForeignKey, owner: &TableRef, referenced: &TableRef) -> Condition {
    fk.referenced_columns
        .iter()
        .zip(&fk.columns)
        .map(|(to, from)| (referenced.c(to), owner.c(from)))
        .collect()
}

fn describe(condition: &Condition) -> String {
    condition
        .iter()
        .map(|(lhs, rhs)| format!("{} = {}", describe_column(lhs), describe_column(rhs)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn describe_column(column: &ExprColumn) -> String {
    use squill_core::stmt::{Alias, Qualifier};

    match &column.qualifier {
        Qualifier::Table(name) => format!("{name}.{}", column.name),
        Qualifier::Alias(Alias::Named(alias)) => format!("{alias}.{}", column.name),
        Qualifier::Alias(Alias::Anonymous(_)) | Qualifier::None => column.name.clone(),
    }
}

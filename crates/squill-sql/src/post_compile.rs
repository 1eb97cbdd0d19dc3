//! Per-execution substitution of post-compile markers.
//!
//! Runs on every execution, after the cache lookup: the text of a cached
//! statement is shared, the values are not.

use crate::{compiled::Marker, CompiledStatement};

use squill_core::{
    dialect::{Dialect, Paramstyle},
    driver::{BoundParams, ExecutableStatement},
    stmt::Value,
    Error, Result,
};

use indexmap::IndexMap;
use std::{collections::HashMap, fmt::Write};

/// Produces the final SQL text and driver parameters of one execution.
///
/// `values` holds the value of every binding of `compiled`, in binding
/// order, as returned by [`CompiledStatement::construct_params`].
///
/// Literal-execute values are rendered inline and expanding values get one
/// placeholder per element, named `{name}_1`, `{name}_2`, ... An empty
/// expanding list renders the dialect's empty set expression. Numbered
/// placeholders are renumbered to account for the expansion.
pub fn resolve(
    compiled: &CompiledStatement,
    dialect: &dyn Dialect,
    values: &[Value],
) -> Result<ExecutableStatement> {
    if values.len() != compiled.bindings.len() {
        return Err(Error::invalid_argument(format!(
            "expected {} parameter values, got {}",
            compiled.bindings.len(),
            values.len()
        )));
    }

    if !compiled.has_post_compile() {
        return Ok(ExecutableStatement {
            sql: compiled.sql.clone(),
            params: fast_params(compiled, values),
        });
    }

    let mut out = Output::new(compiled.paramstyle);
    let mut pos = 0;

    for marker in &compiled.markers {
        out.sql.push_str(&compiled.sql[pos..marker.range.start]);
        pos = marker.range.end;

        let (name, binding) = compiled
            .bindings
            .get_index(marker.binding)
            .ok_or_else(|| Error::invalid_statement("marker references an unknown binding"))?;
        let value = &values[marker.binding];

        if !marker.post_compile {
            out.placeholder(name, value)?;
            continue;
        }

        if binding.expanding {
            let Some(items) = value.as_list() else {
                return Err(Error::invalid_argument(format!(
                    "expanding parameter `{name}` requires a list value"
                )));
            };

            if items.is_empty() {
                out.sql.push_str(dialect.empty_set_expr());
                continue;
            }

            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.sql.push_str(", ");
                }

                if binding.literal_execute {
                    out.sql.push_str(&dialect.render_literal(item)?);
                } else {
                    out.placeholder(&format!("{name}_{}", i + 1), item)?;
                }
            }
        } else {
            // A post-compile marker that does not expand renders its value.
            out.sql.push_str(&dialect.render_literal(value)?);
        }
    }

    out.sql.push_str(&compiled.sql[pos..]);

    Ok(ExecutableStatement {
        sql: out.sql.into(),
        params: out.params,
    })
}

/// Parameters of a statement whose text needs no substitution.
fn fast_params(compiled: &CompiledStatement, values: &[Value]) -> BoundParams {
    match compiled.paramstyle {
        Paramstyle::Qmark => BoundParams::Positional(
            compiled
                .markers
                .iter()
                .map(|marker| values[marker.binding].clone())
                .collect(),
        ),
        Paramstyle::NumericQmark | Paramstyle::Numeric => {
            let mut seen = vec![false; values.len()];
            let mut params = vec![];

            for Marker { binding, .. } in &compiled.markers {
                if !std::mem::replace(&mut seen[*binding], true) {
                    params.push(values[*binding].clone());
                }
            }

            BoundParams::Positional(params)
        }
        Paramstyle::Named => BoundParams::Named(
            compiled
                .bindings
                .keys()
                .cloned()
                .zip(values.iter().cloned())
                .collect(),
        ),
    }
}

/// SQL text and parameters under construction.
struct Output {
    paramstyle: Paramstyle,
    sql: String,
    params: BoundParams,

    /// Placeholder numbers by parameter name, for numbered paramstyles.
    numbers: HashMap<String, usize>,
}

impl Output {
    fn new(paramstyle: Paramstyle) -> Self {
        let params = match paramstyle {
            Paramstyle::Named => BoundParams::Named(IndexMap::new()),
            _ => BoundParams::Positional(vec![]),
        };

        Self {
            paramstyle,
            sql: String::new(),
            params,
            numbers: HashMap::new(),
        }
    }

    fn placeholder(&mut self, name: &str, value: &Value) -> Result<()> {
        match (&mut self.params, self.paramstyle) {
            (BoundParams::Positional(params), Paramstyle::Qmark) => {
                self.sql.push('?');
                params.push(value.clone());
            }
            (BoundParams::Positional(params), style) => {
                let number = match self.numbers.get(name) {
                    Some(number) => *number,
                    None => {
                        params.push(value.clone());
                        self.numbers.insert(name.to_string(), params.len());
                        params.len()
                    }
                };

                let prefix = if style == Paramstyle::Numeric { '$' } else { '?' };
                write!(self.sql, "{prefix}{number}")?;
            }
            (BoundParams::Named(params), _) => {
                write!(self.sql, ":{name}")?;
                params.insert(name.to_string(), value.clone());
            }
        }
        Ok(())
    }
}

use crate::{ExtractedParams, Params};

use squill_core::{
    dialect::Paramstyle,
    stmt::{Type, Value},
    Error, Result,
};

use indexmap::IndexMap;
use std::{ops::Range, sync::Arc, time::Instant};

/// The compiled form of a statement.
///
/// Holds SQL text with dialect placeholders and `__[POSTCOMPILE_name]`
/// markers, plus a description of every bind parameter. A compiled
/// statement never holds the values of a particular execution unless the
/// statement could not be cached; see [`BindValue`].
#[derive(Debug)]
pub struct CompiledStatement {
    pub(crate) sql: Arc<str>,
    pub(crate) bindings: IndexMap<String, Binding>,
    pub(crate) markers: Vec<Marker>,
    pub(crate) paramstyle: Paramstyle,
    pub(crate) dialect: &'static str,
    pub(crate) statement_type: StatementType,
    pub(crate) returns_rows: bool,
    pub(crate) created_at: Instant,
}

/// A bind parameter of a compiled statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub ty: Type,

    /// Where the value comes from at execution time.
    pub value: BindValue,

    /// The value is rendered inline at execution time.
    pub literal_execute: bool,

    /// The value is a list rendered as one placeholder per element.
    pub expanding: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// The value at this position of the statement's extracted parameters.
    Extracted(usize),

    /// The template argument at this position.
    Arg(usize),

    /// No value; one must be supplied by name at execution time.
    Deferred,

    /// A value captured at compile time. Only used for statements that are
    /// not cached.
    Captured(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Ddl,
}

/// A placeholder or post-compile marker in the SQL text.
#[derive(Debug, Clone)]
pub(crate) struct Marker {
    /// Byte range of the marker in the SQL text.
    pub(crate) range: Range<usize>,

    /// Index into the bindings.
    pub(crate) binding: usize,

    /// Rendered as `__[POSTCOMPILE_name]`.
    pub(crate) post_compile: bool,
}

impl CompiledStatement {
    /// The compiled SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &IndexMap<String, Binding> {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn dialect(&self) -> &'static str {
        self.dialect
    }

    pub fn paramstyle(&self) -> Paramstyle {
        self.paramstyle
    }

    pub fn statement_type(&self) -> StatementType {
        self.statement_type
    }

    /// True if executing the statement produces rows.
    pub fn returns_rows(&self) -> bool {
        self.returns_rows
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// True if the SQL text contains markers that are substituted on every
    /// execution.
    pub fn has_post_compile(&self) -> bool {
        self.markers.iter().any(|marker| marker.post_compile)
    }

    /// Assembles the value of every binding for one execution, in binding
    /// order.
    ///
    /// A value in `params` overrides the binding's own source. Expanding
    /// bindings must receive a list.
    pub fn construct_params(
        &self,
        extracted: &ExtractedParams,
        args: &[Value],
        params: &Params,
    ) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(self.bindings.len());

        for (name, binding) in &self.bindings {
            let value = match params.get(name) {
                Some(value) => value.clone(),
                None => match &binding.value {
                    BindValue::Extracted(position) => extracted
                        .get(*position)
                        .cloned()
                        .ok_or_else(|| Error::missing_parameter(name.as_str()))?,
                    BindValue::Arg(position) => args
                        .get(*position)
                        .cloned()
                        .ok_or_else(|| Error::missing_parameter(name.as_str()))?,
                    BindValue::Captured(value) => value.clone(),
                    BindValue::Deferred => return Err(Error::missing_parameter(name.as_str())),
                },
            };

            if binding.expanding && !value.is_list() {
                return Err(Error::invalid_argument(format!(
                    "expanding parameter `{name}` requires a list value"
                )));
            }

            values.push(value);
        }

        Ok(values)
    }
}

use squill_core::{driver::ExecutableStatement, stmt::Value, Dialect, Result};
use squill_sql::{resolve, CacheLookup, CacheStatus, CompiledStatement, ExtractedParams, Params};

use std::sync::Arc;

/// A compiled statement together with the values of the statement it was
/// compiled from.
#[derive(Debug, Clone)]
pub struct Prepared {
    compiled: Arc<CompiledStatement>,
    extracted: ExtractedParams,
    status: CacheStatus,
    dialect: Arc<dyn Dialect>,
}

impl Prepared {
    pub(super) fn new(lookup: CacheLookup, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            compiled: lookup.compiled,
            extracted: lookup.extracted,
            status: lookup.status,
            dialect,
        }
    }

    /// The compiled SQL text, before post-compile substitution.
    pub fn sql(&self) -> &str {
        self.compiled.sql()
    }

    pub fn status(&self) -> CacheStatus {
        self.status
    }

    pub fn compiled(&self) -> &Arc<CompiledStatement> {
        &self.compiled
    }

    /// The values of the statement's own bind parameters.
    pub fn extracted(&self) -> &ExtractedParams {
        &self.extracted
    }

    /// Resolves the final SQL text and parameters for one execution.
    pub fn bind(&self, params: &Params) -> Result<ExecutableStatement> {
        self.bind_args(&[], params)
    }

    /// Like [`bind`](Self::bind), for statements that reference template
    /// arguments.
    pub fn bind_args(&self, args: &[Value], params: &Params) -> Result<ExecutableStatement> {
        let values = self
            .compiled
            .construct_params(&self.extracted, args, params)?;
        resolve(&self.compiled, &*self.dialect, &values)
    }
}

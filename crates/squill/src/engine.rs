mod builder;
pub use builder::Builder;

mod options;
pub use options::{CompiledCacheOption, ExecOptions};

mod prepared;
pub use prepared::Prepared;

use squill_core::{
    driver::{BoundParams, Connection, ExecutableStatement, Response},
    stmt::{Statement, Value},
    Dialect, Result,
};
use squill_sql::{
    get_or_compile, get_or_compile_template, resolve, CacheLookup, CacheStatus, CacheStore,
    CompiledCache, Params, StatementTemplate,
};

use std::{sync::Arc, time::Instant};
use tracing::debug;

/// Compiles statements for one dialect and executes them on one connection
/// source, reusing compiled forms through a shared cache.
///
/// Cloning an engine is cheap; clones share the cache and the connection.
#[derive(Debug, Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    dialect: Arc<dyn Dialect>,
    connection: Arc<dyn Connection>,
    cache: Arc<CompiledCache>,
}

/// The outcome of one execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecResult {
    pub response: Response,

    /// The SQL text sent to the connection.
    pub sql: Arc<str>,

    pub status: CacheStatus,
}

impl Engine {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.shared.dialect
    }

    /// The engine's own compiled cache.
    pub fn cache(&self) -> &CompiledCache {
        &self.shared.cache
    }

    /// Compiles `stmt` through the engine's cache without executing it.
    pub fn compile(&self, stmt: &Statement) -> Result<Prepared> {
        self.compile_with(stmt, &ExecOptions::default())
    }

    pub fn compile_with(&self, stmt: &Statement, options: &ExecOptions) -> Result<Prepared> {
        let lookup = get_or_compile(stmt, self.dialect(), self.store(options))?;
        Ok(Prepared::new(lookup, self.shared.dialect.clone()))
    }

    pub async fn exec(&self, stmt: impl Into<Statement>) -> Result<ExecResult> {
        self.exec_with(stmt, Params::default(), ExecOptions::default())
            .await
    }

    /// Executes `stmt` with values supplied by name and per-call options.
    pub async fn exec_with(
        &self,
        stmt: impl Into<Statement>,
        params: Params,
        options: ExecOptions,
    ) -> Result<ExecResult> {
        let stmt = stmt.into();
        let start = Instant::now();
        let lookup = get_or_compile(&stmt, self.dialect(), self.store(&options))?;

        self.run(lookup, start, &[], &params).await
    }

    /// Executes a template with one value per declared argument.
    pub async fn exec_template(
        &self,
        template: &StatementTemplate,
        args: &[Value],
    ) -> Result<ExecResult> {
        self.exec_template_with(template, args, Params::default(), ExecOptions::default())
            .await
    }

    pub async fn exec_template_with(
        &self,
        template: &StatementTemplate,
        args: &[Value],
        params: Params,
        options: ExecOptions,
    ) -> Result<ExecResult> {
        template.check_args(args)?;

        let start = Instant::now();
        let lookup = get_or_compile_template(template, self.dialect(), self.store(&options))?;

        self.run(lookup, start, args, &params).await
    }

    /// Sends SQL text to the connection as is. Nothing is compiled or cached.
    pub async fn exec_driver_sql(&self, sql: &str, params: BoundParams) -> Result<ExecResult> {
        let stmt = ExecutableStatement {
            sql: sql.into(),
            params,
        };

        debug!(sql = %stmt.sql, status = %CacheStatus::Raw, "raw sql");

        let sql = stmt.sql.clone();
        let response = self.shared.connection.exec(stmt).await?;

        Ok(ExecResult {
            response,
            sql,
            status: CacheStatus::Raw,
        })
    }

    fn store<'a>(&'a self, options: &'a ExecOptions) -> Option<&'a dyn CacheStore> {
        match &options.compiled_cache {
            CompiledCacheOption::Default => Some(&*self.shared.cache),
            CompiledCacheOption::Disabled => None,
            CompiledCacheOption::Store(store) => Some(&**store),
        }
    }

    async fn run(
        &self,
        lookup: CacheLookup,
        start: Instant,
        args: &[Value],
        params: &Params,
    ) -> Result<ExecResult> {
        let CacheLookup {
            compiled,
            extracted,
            status,
        } = lookup;

        let values = compiled.construct_params(&extracted, args, params)?;
        let stmt = resolve(&compiled, self.dialect(), &values)?;

        match status {
            CacheStatus::Hit => debug!(
                sql = %stmt.sql,
                %status,
                "cached since {:.4?} ago",
                compiled.created_at().elapsed()
            ),
            _ => debug!(
                sql = %stmt.sql,
                %status,
                "generated in {:.4?}",
                start.elapsed()
            ),
        }

        let sql = stmt.sql.clone();
        let response = self.shared.connection.exec(stmt).await?;

        Ok(ExecResult {
            response,
            sql,
            status,
        })
    }
}

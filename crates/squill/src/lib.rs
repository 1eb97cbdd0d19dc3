mod engine;
pub use engine::{Builder, CompiledCacheOption, Engine, ExecOptions, ExecResult, Prepared};

pub use squill_core::{
    async_trait, bail,
    dialect::{self, Dialect},
    driver::{self, BoundParams, Connection, ExecutableStatement, Response, Rows},
    err, schema,
    schema::Table,
    stmt::{self, Expr, Statement, Type, Value},
    Error, Result,
};

pub use squill_sql::{
    cache_key, CacheKey, CacheStats, CacheStatus, CacheStore, CompiledCache, CompiledStatement,
    Compiler, ExtractedParams, Params, StatementTemplate, StatementType,
};

use squill_sql::CacheStore;

use std::sync::Arc;

/// Options for a single execution.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pub compiled_cache: CompiledCacheOption,
}

/// Which cache an execution compiles through.
#[derive(Debug, Clone, Default)]
pub enum CompiledCacheOption {
    /// The engine's cache.
    #[default]
    Default,

    /// No cache; the statement is compiled for this execution only.
    Disabled,

    /// An alternate store in place of the engine's cache.
    Store(Arc<dyn CacheStore>),
}

impl ExecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compiled_cache(mut self, compiled_cache: CompiledCacheOption) -> Self {
        self.compiled_cache = compiled_cache;
        self
    }

    pub fn no_cache() -> Self {
        Self::default().compiled_cache(CompiledCacheOption::Disabled)
    }

    pub fn with_store(store: Arc<dyn CacheStore>) -> Self {
        Self::default().compiled_cache(CompiledCacheOption::Store(store))
    }
}

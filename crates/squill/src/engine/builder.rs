use super::{Engine, Shared};

use squill_core::{bail, Connection, Dialect, Result};
use squill_sql::CompiledCache;

use std::sync::Arc;

#[derive(Debug)]
pub struct Builder {
    dialect: Option<Arc<dyn Dialect>>,

    /// Capacity of the compiled cache.
    query_cache_size: usize,

    /// Fraction the cache may grow past its capacity before it is pruned.
    cache_threshold: f64,
}

impl Builder {
    pub fn dialect(&mut self, dialect: impl Dialect) -> &mut Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }

    /// Use a dialect shared with other engines.
    pub fn shared_dialect(&mut self, dialect: Arc<dyn Dialect>) -> &mut Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn query_cache_size(&mut self, size: usize) -> &mut Self {
        self.query_cache_size = size;
        self
    }

    pub fn cache_threshold(&mut self, threshold: f64) -> &mut Self {
        self.cache_threshold = threshold;
        self
    }

    pub fn build(&mut self, connection: impl Connection) -> Result<Engine> {
        let Some(dialect) = self.dialect.clone() else {
            bail!("an engine requires a dialect");
        };

        let cache = CompiledCache::new(self.query_cache_size, self.cache_threshold)?;

        Ok(Engine {
            shared: Arc::new(Shared {
                dialect,
                connection: Arc::new(connection),
                cache: Arc::new(cache),
            }),
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dialect: None,
            query_cache_size: CompiledCache::DEFAULT_CAPACITY,
            cache_threshold: CompiledCache::DEFAULT_THRESHOLD,
        }
    }
}

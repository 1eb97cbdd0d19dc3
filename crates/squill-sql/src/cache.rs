use crate::{
    cache_key::{self, CacheKey, ExtractedParams},
    CompiledStatement, Compiler, StatementTemplate,
};

use squill_core::{dialect::Dialect, stmt::Statement, Error, Result};

use dashmap::DashMap;
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tracing::debug;

/// Storage for compiled statements, keyed by structural cache key.
///
/// [`CompiledCache`] is the default implementation. Implementations must be
/// safe to share between threads; lookups happen on every execution.
pub trait CacheStore: fmt::Debug + Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Arc<CompiledStatement>>;

    fn insert(&self, key: CacheKey, compiled: Arc<CompiledStatement>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A bounded cache of compiled statements with least-recently-used
/// eviction.
///
/// The cache may grow past its capacity by the threshold fraction before it
/// is pruned back to its capacity, keeping the most recently used entries.
/// Lookups never take a global lock; pruning is skipped by a thread that
/// finds another thread already pruning.
pub struct CompiledCache {
    entries: DashMap<CacheKey, Entry>,
    capacity: usize,
    threshold: f64,

    /// Logical clock stamping every access.
    clock: AtomicU64,

    pruning: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct Entry {
    compiled: Arc<CompiledStatement>,
    last_access: AtomicU64,
}

/// Counters describing the use of a [`CompiledCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// How a compiled statement was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Raw SQL text; nothing was compiled.
    Raw,

    /// The statement cannot be cached and was compiled.
    NoKey,

    /// Compiled and stored.
    Miss,

    /// Found in the cache.
    Hit,

    /// Caching was disabled for the execution.
    Disabled,

    /// The dialect does not support statement caching.
    NoDialectSupport,
}

/// The result of looking a statement up in the cache.
#[derive(Debug, Clone)]
pub struct CacheLookup {
    pub compiled: Arc<CompiledStatement>,

    /// Bind values of the statement that was looked up, for use with
    /// [`CompiledStatement::construct_params`].
    pub extracted: ExtractedParams,

    pub status: CacheStatus,
}

impl CompiledCache {
    pub const DEFAULT_CAPACITY: usize = 500;
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    /// Creates a cache holding `capacity` entries, pruned once it grows past
    /// `capacity * (1 + threshold)` entries.
    pub fn new(capacity: usize, threshold: f64) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid_cache_configuration(
                "capacity must be greater than zero",
            ));
        }

        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::invalid_cache_configuration(format!(
                "threshold must be a non-negative number, got {threshold}"
            )));
        }

        Ok(Self {
            entries: DashMap::new(),
            capacity,
            threshold,
            clock: AtomicU64::new(0),
            pruning: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Creates a cache with the default threshold.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, Self::DEFAULT_THRESHOLD)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes every entry. Statements already handed out stay valid.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.entries.len(),
            capacity: self.capacity,
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of entries above which the cache is pruned.
    fn ceiling(&self) -> usize {
        self.capacity + (self.capacity as f64 * self.threshold) as usize
    }

    fn prune(&self) {
        let Some(_guard) = self.pruning.try_lock() else {
            return;
        };

        let mut by_access: Vec<(CacheKey, u64)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.last_access.load(Ordering::Relaxed)))
            .collect();

        if by_access.len() <= self.capacity {
            return;
        }

        by_access.sort_unstable_by(|a, b| b.1.cmp(&a.1));

        let evict = &by_access[self.capacity..];
        for (key, _) in evict {
            self.entries.remove(key);
        }

        debug!(
            evicted = evict.len(),
            remaining = self.entries.len(),
            capacity = self.capacity,
            "pruned compiled cache"
        );
    }
}

impl CacheStore for CompiledCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<CompiledStatement>> {
        let compiled = self.entries.get(key).map(|entry| {
            entry.last_access.store(self.tick(), Ordering::Relaxed);
            entry.compiled.clone()
        });

        match compiled {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };

        compiled
    }

    fn insert(&self, key: CacheKey, compiled: Arc<CompiledStatement>) {
        let entry = Entry {
            compiled,
            last_access: AtomicU64::new(self.tick()),
        };
        self.entries.insert(key, entry);

        if self.entries.len() > self.ceiling() {
            self.prune();
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for CompiledCache {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            capacity: Self::DEFAULT_CAPACITY,
            threshold: Self::DEFAULT_THRESHOLD,
            clock: AtomicU64::new(0),
            pruning: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl fmt::Debug for CompiledCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::NoKey => "no key",
            Self::Miss => "miss",
            Self::Hit => "hit",
            Self::Disabled => "caching disabled",
            Self::NoDialectSupport => "dialect does not support caching",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the compiled form of `stmt`, from `store` when possible.
///
/// With no store every call compiles. A statement that cannot be cached is
/// compiled and never stored; that is not an error.
pub fn get_or_compile(
    stmt: &Statement,
    dialect: &dyn Dialect,
    store: Option<&dyn CacheStore>,
) -> Result<CacheLookup> {
    let Some(store) = store else {
        return compile_uncached(stmt, dialect, CacheStatus::Disabled);
    };

    if !dialect.supports_statement_cache() {
        return compile_uncached(stmt, dialect, CacheStatus::NoDialectSupport);
    }

    let Some(generated) = cache_key::generate(stmt) else {
        return compile_uncached(stmt, dialect, CacheStatus::NoKey);
    };

    let key = generated.key.for_dialect(dialect.name());

    if let Some(compiled) = store.get(&key) {
        return Ok(CacheLookup {
            compiled,
            extracted: generated.extracted,
            status: CacheStatus::Hit,
        });
    }

    let compiled = Arc::new(Compiler::new(dialect).compile(stmt, Some(&generated.index))?);
    store.insert(key, compiled.clone());

    Ok(CacheLookup {
        compiled,
        extracted: generated.extracted,
        status: CacheStatus::Miss,
    })
}

/// Returns the compiled form of a template's statement.
///
/// The template's cache key is derived once; a lookup only rehashes it for
/// the dialect.
pub fn get_or_compile_template(
    template: &StatementTemplate,
    dialect: &dyn Dialect,
    store: Option<&dyn CacheStore>,
) -> Result<CacheLookup> {
    let (Some(store), true, Some((key, extracted))) = (
        store,
        dialect.supports_statement_cache(),
        template.cache_key(),
    ) else {
        return get_or_compile(template.statement(), dialect, store);
    };

    let key = key.for_dialect(dialect.name());

    if let Some(compiled) = store.get(&key) {
        return Ok(CacheLookup {
            compiled,
            extracted: extracted.clone(),
            status: CacheStatus::Hit,
        });
    }

    // The bind index borrows the statement, so it is derived again on a miss.
    let Some(generated) = cache_key::generate(template.statement()) else {
        return compile_uncached(template.statement(), dialect, CacheStatus::NoKey);
    };

    let compiled = Compiler::new(dialect).compile(template.statement(), Some(&generated.index))?;
    let compiled = Arc::new(compiled);
    store.insert(key, compiled.clone());

    Ok(CacheLookup {
        compiled,
        extracted: generated.extracted,
        status: CacheStatus::Miss,
    })
}

fn compile_uncached(
    stmt: &Statement,
    dialect: &dyn Dialect,
    status: CacheStatus,
) -> Result<CacheLookup> {
    let compiled = Compiler::new(dialect).compile(stmt, None)?;

    Ok(CacheLookup {
        compiled: Arc::new(compiled),
        extracted: ExtractedParams::default(),
        status,
    })
}

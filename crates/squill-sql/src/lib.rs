mod cache;
pub use cache::{
    get_or_compile, get_or_compile_template, CacheLookup, CacheStats, CacheStatus, CacheStore,
    CompiledCache,
};

pub mod cache_key;
pub use cache_key::{BindIndex, CacheKey, ExtractedParams};

mod compiled;
pub use compiled::{BindValue, Binding, CompiledStatement, StatementType};

#[macro_use]
mod compiler;
pub use compiler::Compiler;

mod params;
pub use params::Params;

mod post_compile;
pub use post_compile::resolve;

mod template;
pub use template::StatementTemplate;

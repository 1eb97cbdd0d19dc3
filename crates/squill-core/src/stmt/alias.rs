use std::sync::atomic::{AtomicU64, Ordering};

/// The alias of a table factor.
///
/// Anonymous aliases carry a process-wide identity so that two anonymous
/// aliases in the same statement stay distinct. The identity never reaches
/// the SQL text or a cache key: both number anonymous aliases by their order
/// of first appearance within the statement (`anon_1`, `anon_2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alias {
    Named(String),
    Anonymous(AnonId),
}

/// Identity of an anonymous alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnonId(u64);

impl AnonId {
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for AnonId {
    fn default() -> Self {
        Self::new()
    }
}

impl Alias {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn anonymous() -> Self {
        Self::Anonymous(AnonId::new())
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Anonymous(_) => None,
        }
    }
}

impl From<&str> for Alias {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}

impl From<String> for Alias {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

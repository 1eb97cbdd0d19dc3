use super::Value;

/// The declared type of an expression or bind parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,

    /// A list of a single type; the type of an expanding parameter.
    List(Box<Type>),

    /// The type of the `NULL` literal.
    Null,

    /// A type that could not be determined, e.g. a column of a derived table
    /// whose subquery does not name it.
    Unknown,
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }

    /// Returns the item type if `self` is a list type.
    pub fn list_item(&self) -> Option<&Type> {
        match self {
            Self::List(item) => Some(item),
            _ => None,
        }
    }

    /// Returns `true` if `value` may be bound to a parameter of this type.
    ///
    /// `NULL` is accepted by every type, integers widen, and `Unknown`
    /// accepts anything.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Unknown, _) | (_, Value::Null) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::I32 | Self::I64, Value::I32(_) | Value::I64(_)) => true,
            (Self::F64, Value::F64(_) | Value::I32(_) | Value::I64(_)) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Bytes, Value::Bytes(_)) => true,
            (Self::List(item), Value::List(items)) => items.iter().all(|v| item.accepts(v)),
            _ => false,
        }
    }
}

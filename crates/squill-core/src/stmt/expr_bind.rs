use super::{Expr, Type, Value};

/// A bind parameter.
///
/// The parameter's value never affects the SQL text or the cache key; only
/// its key, declared type and flags do.
#[derive(Debug, Clone, PartialEq)]
pub struct BindParam {
    /// How the parameter is named in the compiled SQL.
    pub key: BindKey,

    /// Declared type of the parameter.
    pub ty: Type,

    /// Current value. `None` for a parameter whose value is supplied at
    /// execution time.
    pub value: Option<Value>,

    /// Render the value inline when the statement is executed instead of
    /// sending it as a driver parameter.
    pub literal_execute: bool,

    /// The value is a list that expands to one placeholder per element when
    /// the statement is executed.
    pub expanding: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindKey {
    /// Named by the compiler as `{hint}_{n}`, or `param_{n}` without a hint.
    Anonymous { hint: Option<String> },

    /// Explicitly named by the caller.
    Named(String),
}

impl BindKey {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous { .. })
    }

    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Anonymous { .. } => None,
        }
    }
}

impl BindParam {
    /// An anonymous parameter holding `value`.
    pub fn anonymous(value: impl Into<Value>) -> Self {
        let value = value.into();

        BindParam {
            key: BindKey::Anonymous { hint: None },
            ty: value.ty(),
            value: Some(value),
            literal_execute: false,
            expanding: false,
        }
    }

    /// A named parameter without a value. The value must be supplied when
    /// the statement is executed.
    pub fn named(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        BindParam {
            key: BindKey::Named(name.into()),
            ty: ty.into(),
            value: None,
            literal_execute: false,
            expanding: false,
        }
    }

    /// An anonymous expanding parameter holding a list.
    pub fn expanding(values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        let value = Value::List(values.into_iter().map(Into::into).collect());

        BindParam {
            key: BindKey::Anonymous { hint: None },
            ty: value.ty(),
            value: Some(value),
            literal_execute: false,
            expanding: true,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        if let BindKey::Anonymous { hint: slot } = &mut self.key {
            *slot = Some(hint.into());
        }
        self
    }

    pub fn literal_execute(mut self) -> Self {
        self.literal_execute = true;
        self
    }

    pub fn is_deferred(&self) -> bool {
        self.value.is_none()
    }

    pub(crate) fn hint_from_column(&mut self, name: &str, ty: &Type) {
        if let BindKey::Anonymous { hint: hint @ None } = &mut self.key {
            *hint = Some(name.to_string());
        }

        if !ty.is_unknown() {
            self.ty = if self.expanding {
                Type::list(ty.clone())
            } else {
                ty.clone()
            };
        }
    }
}

impl Expr {
    /// A named bind parameter with a value.
    pub fn bind_named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        BindParam::named(name, value.ty()).with_value(value).into()
    }

    /// A named bind parameter whose value is supplied at execution time.
    pub fn bind_deferred(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        BindParam::named(name, ty).into()
    }

    /// Marks a bind parameter to be rendered inline at execution time.
    /// Other expressions are returned unchanged.
    pub fn literal_execute(self) -> Self {
        match self {
            Expr::Bind(bind) => bind.literal_execute().into(),
            expr => expr,
        }
    }
}

impl From<BindParam> for Expr {
    fn from(value: BindParam) -> Self {
        Self::Bind(value)
    }
}

use crate::cache_key::{self, CacheKey, ExtractedParams};

use squill_core::{
    stmt::{visit, Statement, Type, Value},
    Error, Result,
};

use std::sync::OnceLock;

/// A statement whose external inputs are declared up front.
///
/// The statement references its inputs with [`Expr::arg`] placeholders, by
/// position. The cache key and the values of the statement's own bind
/// parameters are derived once, on first use, and reused by every
/// execution; an execution supplies only the argument values.
///
/// [`Expr::arg`]: squill_core::stmt::Expr::arg
#[derive(Debug)]
pub struct StatementTemplate {
    stmt: Statement,
    arg_types: Vec<Type>,
    key: OnceLock<Option<(CacheKey, ExtractedParams)>>,
}

impl StatementTemplate {
    /// Declares a template taking arguments of `arg_types`.
    ///
    /// Fails if the statement references an argument position that is not
    /// declared, or uses an argument with a type other than the declared
    /// one.
    pub fn new<I>(stmt: impl Into<Statement>, arg_types: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Type>,
    {
        let stmt = stmt.into();
        let arg_types: Vec<Type> = arg_types.into_iter().map(Into::into).collect();

        let mut error = None;
        visit::for_each_arg(&stmt, |arg| {
            if error.is_some() {
                return;
            }

            let Some(declared) = arg_types.get(arg.position) else {
                error = Some(Error::invalid_argument(format!(
                    "argument {} is referenced but the template declares {} arguments",
                    arg.position,
                    arg_types.len()
                )));
                return;
            };

            let compatible = match &arg.ty {
                // A list argument must be typed where it is used so that it
                // is compiled as an expanding parameter.
                Type::Unknown => !matches!(declared, Type::List(_)),
                ty => ty == declared,
            };

            if !compatible {
                error = Some(Error::invalid_argument(format!(
                    "argument {} is declared as {declared:?} but used as {:?}",
                    arg.position, arg.ty
                )));
            }
        });

        if let Some(error) = error {
            return Err(error);
        }

        Ok(Self {
            stmt,
            arg_types,
            key: OnceLock::new(),
        })
    }

    pub fn statement(&self) -> &Statement {
        &self.stmt
    }

    pub fn arg_types(&self) -> &[Type] {
        &self.arg_types
    }

    /// The template's cache key and extracted values, or `None` if the
    /// statement cannot be cached.
    pub fn cache_key(&self) -> Option<&(CacheKey, ExtractedParams)> {
        self.key
            .get_or_init(|| {
                cache_key::generate(&self.stmt)
                    .map(|generated| (generated.key, generated.extracted))
            })
            .as_ref()
    }

    /// Checks the arguments of one execution against the declared types.
    pub fn check_args(&self, args: &[Value]) -> Result<()> {
        if args.len() != self.arg_types.len() {
            return Err(Error::invalid_argument(format!(
                "template expects {} arguments, got {}",
                self.arg_types.len(),
                args.len()
            )));
        }

        for (position, (ty, value)) in self.arg_types.iter().zip(args).enumerate() {
            if !ty.accepts(value) {
                return Err(Error::invalid_argument(format!(
                    "argument {position} expects {ty:?}, got {value:?}"
                )));
            }
        }

        Ok(())
    }
}

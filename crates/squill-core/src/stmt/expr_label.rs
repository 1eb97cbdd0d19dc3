use super::Expr;

/// `expr AS name`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLabel {
    pub expr: Box<Expr>,
    pub name: String,
}

impl Expr {
    pub fn label(self, name: impl Into<String>) -> Self {
        ExprLabel {
            expr: Box::new(self),
            name: name.into(),
        }
        .into()
    }

    /// The name of the column this expression produces in a result set, if
    /// it has one.
    pub fn output_name(&self) -> Option<&str> {
        match self {
            Expr::Label(label) => Some(&label.name),
            Expr::Column(column) => Some(&column.name),
            _ => None,
        }
    }
}

impl From<ExprLabel> for Expr {
    fn from(value: ExprLabel) -> Self {
        Self::Label(value)
    }
}

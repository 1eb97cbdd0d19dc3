use super::Expr;

/// Rows of a `VALUES` clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
    pub rows: Vec<Vec<Expr>>,
}

impl Values {
    pub fn new<R, I>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

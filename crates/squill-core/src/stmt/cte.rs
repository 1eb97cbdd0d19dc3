use super::{Alias, ExprColumn, ExprSet, Qualifier, Query, TableName, Type};

/// A common table expression of a `WITH` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub name: String,
    pub query: Query,
}

/// A reference to a CTE from a `FROM` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct CteRef {
    pub name: String,
    pub alias: Option<Alias>,

    /// Output column names of the CTE's query, used to type column
    /// references.
    columns: Vec<(String, Type)>,
}

impl Cte {
    pub fn new(name: impl Into<String>, query: impl Into<Query>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }

    /// References the CTE from a `FROM` clause.
    pub fn table(&self) -> CteRef {
        let columns = match &self.query.body {
            ExprSet::Select(select) => select
                .columns
                .iter()
                .filter_map(|column| Some((column.output_name()?.to_string(), column.ty())))
                .collect(),
            _ => vec![],
        };

        CteRef {
            name: self.name.clone(),
            alias: None,
            columns,
        }
    }
}

impl CteRef {
    pub fn alias(mut self, alias: impl Into<Alias>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn qualifier(&self) -> Qualifier {
        match &self.alias {
            Some(alias) => Qualifier::Alias(alias.clone()),
            None => Qualifier::Table(TableName::new(&self.name)),
        }
    }

    pub fn c(&self, name: &str) -> ExprColumn {
        let ty = self
            .columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ty)| ty.clone())
            .unwrap_or(Type::Unknown);
        ExprColumn::new(self.qualifier(), name, ty)
    }
}

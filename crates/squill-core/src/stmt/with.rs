use super::Cte;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct With {
    pub ctes: Vec<Cte>,
}

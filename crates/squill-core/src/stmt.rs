mod alias;
pub use alias::{Alias, AnonId};

mod assignment;
pub use assignment::Assignment;

mod cte;
pub use cte::{Cte, CteRef};

mod ddl;
pub use ddl::{CreateTable, Ddl, DropTable};

mod delete;
pub use delete::Delete;

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_arg;
pub use expr_arg::ExprArg;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_bind;
pub use expr_bind::{BindKey, BindParam};

mod expr_cast;
pub use expr_cast::ExprCast;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_custom;
pub use expr_custom::{CustomExpr, ExprCustom};

mod expr_exists;
pub use expr_exists::ExprExists;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_in_subquery;
pub use expr_in_subquery::ExprInSubquery;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_label;
pub use expr_label::ExprLabel;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod expr_set;
pub use expr_set::ExprSet;

mod expr_set_op;
pub use expr_set_op::ExprSetOp;

mod expr_stmt;
pub use expr_stmt::ExprStmt;

mod insert;
pub use insert::{Insert, InsertSource};

mod join;
pub use join::{Join, JoinKind, JoinOn};

mod limit;
pub use limit::Limit;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_set;
pub use op_set::SetOp;

mod order_by;
pub use order_by::OrderBy;

mod order_by_expr;
pub use order_by_expr::OrderByExpr;

mod qualifier;
pub use qualifier::Qualifier;

mod query;
pub use query::Query;

mod select;
pub use select::Select;

mod statement;
pub use statement::{Cacheability, Statement, StatementKind};

mod table_factor;
pub use table_factor::{TableDerived, TableFactor, TableRef};

mod table_name;
pub use table_name::TableName;

mod table_with_joins;
pub use table_with_joins::TableWithJoins;

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

mod values;
pub use values::Values;

pub mod visit;
pub use visit::Visit;

mod with;
pub use with::With;

/// Starts a `SELECT` of the given columns.
pub fn select<I>(columns: I) -> Select
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Select::new(columns)
}

/// Combines queries with `UNION`.
pub fn union<I>(queries: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<ExprSet>,
{
    ExprSetOp::new(SetOp::Union, queries).into()
}

/// Combines queries with `UNION ALL`.
pub fn union_all<I>(queries: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<ExprSet>,
{
    ExprSetOp::new(SetOp::UnionAll, queries).into()
}

/// Combines queries with `EXCEPT`.
pub fn except<I>(queries: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<ExprSet>,
{
    ExprSetOp::new(SetOp::Except, queries).into()
}

/// Combines queries with `INTERSECT`.
pub fn intersect<I>(queries: I) -> Query
where
    I: IntoIterator,
    I::Item: Into<ExprSet>,
{
    ExprSetOp::new(SetOp::Intersect, queries).into()
}

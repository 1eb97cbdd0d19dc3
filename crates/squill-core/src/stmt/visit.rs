#![allow(unused_variables)]

use super::{
    BindParam, Cte, Delete, Expr, ExprArg, ExprColumn, ExprSet, Insert, InsertSource, Join,
    JoinOn, Limit, OrderByExpr, Query, Select, Statement, StatementKind, TableFactor,
    TableWithJoins, Update,
};

/// Read-only traversal of a statement tree.
///
/// Every method defaults to walking the node's children in the order they
/// appear in the SQL text.
pub trait Visit {
    fn visit_statement(&mut self, i: &Statement) {
        visit_statement(self, i);
    }

    fn visit_query(&mut self, i: &Query) {
        visit_query(self, i);
    }

    fn visit_cte(&mut self, i: &Cte) {
        visit_cte(self, i);
    }

    fn visit_expr_set(&mut self, i: &ExprSet) {
        visit_expr_set(self, i);
    }

    fn visit_select(&mut self, i: &Select) {
        visit_select(self, i);
    }

    fn visit_table_with_joins(&mut self, i: &TableWithJoins) {
        visit_table_with_joins(self, i);
    }

    fn visit_table_factor(&mut self, i: &TableFactor) {
        visit_table_factor(self, i);
    }

    fn visit_join(&mut self, i: &Join) {
        visit_join(self, i);
    }

    fn visit_order_by_expr(&mut self, i: &OrderByExpr) {
        visit_order_by_expr(self, i);
    }

    fn visit_limit(&mut self, i: &Limit) {
        visit_limit(self, i);
    }

    fn visit_insert(&mut self, i: &Insert) {
        visit_insert(self, i);
    }

    fn visit_update(&mut self, i: &Update) {
        visit_update(self, i);
    }

    fn visit_delete(&mut self, i: &Delete) {
        visit_delete(self, i);
    }

    fn visit_expr(&mut self, i: &Expr) {
        visit_expr(self, i);
    }

    fn visit_expr_arg(&mut self, i: &ExprArg) {}

    fn visit_expr_bind(&mut self, i: &BindParam) {}

    fn visit_expr_column(&mut self, i: &ExprColumn) {}
}

pub fn visit_statement<V>(v: &mut V, node: &Statement)
where
    V: Visit + ?Sized,
{
    match node.kind() {
        StatementKind::Query(stmt) => v.visit_query(stmt),
        StatementKind::Insert(stmt) => v.visit_insert(stmt),
        StatementKind::Update(stmt) => v.visit_update(stmt),
        StatementKind::Delete(stmt) => v.visit_delete(stmt),
        StatementKind::Ddl(_) => {}
    }
}

pub fn visit_query<V>(v: &mut V, node: &Query)
where
    V: Visit + ?Sized,
{
    if let Some(with) = &node.with {
        for cte in &with.ctes {
            v.visit_cte(cte);
        }
    }

    v.visit_expr_set(&node.body);

    if let Some(order_by) = &node.order_by {
        for expr in &order_by.exprs {
            v.visit_order_by_expr(expr);
        }
    }

    if let Some(limit) = &node.limit {
        v.visit_limit(limit);
    }
}

pub fn visit_cte<V>(v: &mut V, node: &Cte)
where
    V: Visit + ?Sized,
{
    v.visit_query(&node.query);
}

pub fn visit_expr_set<V>(v: &mut V, node: &ExprSet)
where
    V: Visit + ?Sized,
{
    match node {
        ExprSet::Select(select) => v.visit_select(select),
        ExprSet::SetOp(set_op) => {
            for operand in &set_op.operands {
                v.visit_expr_set(operand);
            }
        }
        ExprSet::Values(values) => {
            for expr in values.rows.iter().flatten() {
                v.visit_expr(expr);
            }
        }
    }
}

pub fn visit_select<V>(v: &mut V, node: &Select)
where
    V: Visit + ?Sized,
{
    for expr in &node.columns {
        v.visit_expr(expr);
    }

    for from in &node.from {
        v.visit_table_with_joins(from);
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    for expr in &node.group_by {
        v.visit_expr(expr);
    }

    if let Some(having) = &node.having {
        v.visit_expr(having);
    }
}

pub fn visit_table_with_joins<V>(v: &mut V, node: &TableWithJoins)
where
    V: Visit + ?Sized,
{
    v.visit_table_factor(&node.relation);

    for join in &node.joins {
        v.visit_join(join);
    }
}

pub fn visit_table_factor<V>(v: &mut V, node: &TableFactor)
where
    V: Visit + ?Sized,
{
    if let TableFactor::Derived(derived) = node {
        v.visit_query(&derived.subquery);
    }
}

pub fn visit_join<V>(v: &mut V, node: &Join)
where
    V: Visit + ?Sized,
{
    v.visit_table_factor(&node.table);

    if let JoinOn::Expr(expr) = &node.on {
        v.visit_expr(expr);
    }
}

pub fn visit_order_by_expr<V>(v: &mut V, node: &OrderByExpr)
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.expr);
}

pub fn visit_limit<V>(v: &mut V, node: &Limit)
where
    V: Visit + ?Sized,
{
    if let Some(limit) = &node.limit {
        v.visit_expr(limit);
    }

    if let Some(offset) = &node.offset {
        v.visit_expr(offset);
    }
}

pub fn visit_insert<V>(v: &mut V, node: &Insert)
where
    V: Visit + ?Sized,
{
    match &node.source {
        InsertSource::DefaultValues => {}
        InsertSource::Values(values) => {
            for expr in values.rows.iter().flatten() {
                v.visit_expr(expr);
            }
        }
        InsertSource::Query(query) => v.visit_query(query),
    }

    for expr in &node.returning {
        v.visit_expr(expr);
    }
}

pub fn visit_update<V>(v: &mut V, node: &Update)
where
    V: Visit + ?Sized,
{
    for assignment in &node.assignments {
        v.visit_expr_column(&assignment.column);
        v.visit_expr(&assignment.value);
    }

    for from in &node.from {
        v.visit_table_with_joins(from);
    }

    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    for expr in &node.returning {
        v.visit_expr(expr);
    }
}

pub fn visit_delete<V>(v: &mut V, node: &Delete)
where
    V: Visit + ?Sized,
{
    if let Some(filter) = &node.filter {
        v.visit_expr(filter);
    }

    for expr in &node.returning {
        v.visit_expr(expr);
    }
}

pub fn visit_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::And(expr) => {
            for operand in &expr.operands {
                v.visit_expr(operand);
            }
        }
        Expr::Or(expr) => {
            for operand in &expr.operands {
                v.visit_expr(operand);
            }
        }
        Expr::Arg(expr) => v.visit_expr_arg(expr),
        Expr::BinaryOp(expr) => {
            v.visit_expr(&expr.lhs);
            v.visit_expr(&expr.rhs);
        }
        Expr::Bind(expr) => v.visit_expr_bind(expr),
        Expr::Cast(expr) => v.visit_expr(&expr.expr),
        Expr::Column(expr) => v.visit_expr_column(expr),
        Expr::Exists(expr) => v.visit_query(&expr.query),
        Expr::Func(expr) => {
            for arg in &expr.args {
                v.visit_expr(arg);
            }
        }
        Expr::InList(expr) => {
            v.visit_expr(&expr.expr);
            for item in &expr.list {
                v.visit_expr(item);
            }
        }
        Expr::InSubquery(expr) => {
            v.visit_expr(&expr.expr);
            v.visit_query(&expr.query);
        }
        Expr::IsNull(expr) => v.visit_expr(&expr.expr),
        Expr::Label(expr) => v.visit_expr(&expr.expr),
        Expr::Not(expr) => v.visit_expr(&expr.expr),
        Expr::Stmt(expr) => v.visit_query(&expr.query),
        Expr::Custom(_) | Expr::Literal(_) | Expr::Wildcard(_) => {}
    }
}

/// Calls `f` for every bind parameter in the statement, in traversal order.
pub fn for_each_bind<F>(stmt: &Statement, f: F)
where
    F: FnMut(&BindParam),
{
    struct ForEach<F>(F);

    impl<F: FnMut(&BindParam)> Visit for ForEach<F> {
        fn visit_expr_bind(&mut self, i: &BindParam) {
            (self.0)(i);
        }
    }

    ForEach(f).visit_statement(stmt);
}

/// Calls `f` for every template argument in the statement, in traversal
/// order.
pub fn for_each_arg<F>(stmt: &Statement, f: F)
where
    F: FnMut(&ExprArg),
{
    struct ForEach<F>(F);

    impl<F: FnMut(&ExprArg)> Visit for ForEach<F> {
        fn visit_expr_arg(&mut self, i: &ExprArg) {
            (self.0)(i);
        }
    }

    ForEach(f).visit_statement(stmt);
}

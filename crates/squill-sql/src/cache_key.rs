//! Structural cache keys.
//!
//! A key is derived by a single depth-first walk of the statement. The walk
//! records everything that influences the compiled SQL text (node kinds,
//! operators, identifiers, types, bind parameter names and flags) and
//! nothing that does not. Values of bind parameters are collected separately,
//! in walk order, so a cached compilation can be executed with the values of
//! the statement at hand.

use crate::compiler;

use squill_core::stmt::{
    Alias, AnonId, BindKey, BindParam, Cacheability, Cte, Delete, Direction, Expr, ExprColumn,
    ExprSet, Insert, InsertSource, Join, JoinKind, JoinOn, Limit, OrderBy, Qualifier, Query, Select,
    Statement, StatementKind, TableFactor, TableName, TableWithJoins, Type, Update, Value,
};

use by_address::ByAddress;
use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A structural fingerprint of a statement.
///
/// Two statements have equal keys exactly when they compile to the same SQL
/// text, regardless of the values of their bind parameters. The key is a
/// flat token sequence in which nesting is encoded by open and close tokens.
/// Its hash is computed once.
#[derive(Clone)]
pub struct CacheKey {
    dialect: Option<&'static str>,
    tokens: Arc<[Token]>,
    hash: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    Open(&'static str),
    Close,
    Str(Box<str>),
    Int(i64),
    Float(u64),
    Bool(bool),
    Bytes(Box<[u8]>),
    Ty(Type),
}

/// Values of the bind parameters of a statement, in key walk order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedParams {
    values: Vec<Value>,
}

/// Maps each valued bind parameter of a statement, by address, to the
/// position of its value in [`ExtractedParams`].
///
/// Only valid for the statement the key was derived from.
#[derive(Debug, Default)]
pub struct BindIndex<'stmt> {
    positions: HashMap<ByAddress<&'stmt BindParam>, usize>,
}

/// The output of a successful key derivation.
#[derive(Debug)]
pub struct Generated<'stmt> {
    pub key: CacheKey,
    pub extracted: ExtractedParams,
    pub index: BindIndex<'stmt>,
}

/// Derives the cache key of `stmt`.
///
/// Returns `None` if the statement cannot be cached. The outcome is
/// remembered on the statement, so an uncacheable statement is only walked
/// once.
pub fn generate(stmt: &Statement) -> Option<Generated<'_>> {
    if stmt.cacheability() == Some(Cacheability::Uncacheable) {
        return None;
    }

    let mut k = KeyBuilder::default();

    match k.statement(stmt) {
        Ok(()) => {
            stmt.set_cacheability(Cacheability::Cacheable);
            Some(k.finish())
        }
        Err(Uncacheable) => {
            stmt.set_cacheability(Cacheability::Uncacheable);
            None
        }
    }
}

impl CacheKey {
    /// Scopes the key to a dialect. Keys of different dialects never compare
    /// equal.
    pub fn for_dialect(&self, dialect: &'static str) -> CacheKey {
        let mut hasher = DefaultHasher::new();
        dialect.hash(&mut hasher);
        self.hash.hash(&mut hasher);

        CacheKey {
            dialect: Some(dialect),
            tokens: self.tokens.clone(),
            hash: hasher.finish(),
        }
    }

    pub fn dialect(&self) -> Option<&'static str> {
        self.dialect
    }

    /// Number of tokens in the key.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.dialect == other.dialect
            && (Arc::ptr_eq(&self.tokens, &other.tokens) || self.tokens == other.tokens)
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheKey")
            .field("dialect", &self.dialect)
            .field("hash", &format_args!("{:016x}", self.hash))
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

impl ExtractedParams {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

impl<'stmt> BindIndex<'stmt> {
    /// Position of `bind`'s value in the extracted parameters.
    pub fn position(&self, bind: &'stmt BindParam) -> Option<usize> {
        self.positions.get(&ByAddress(bind)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Raised by the walk when the statement cannot be cached.
struct Uncacheable;

type Walk = Result<(), Uncacheable>;

#[derive(Default)]
struct KeyBuilder<'stmt> {
    tokens: Vec<Token>,
    extracted: Vec<Value>,
    index: HashMap<ByAddress<&'stmt BindParam>, usize>,

    /// Statement-local ordinals of anonymous aliases, by first appearance.
    anon: HashMap<AnonId, usize>,
}

impl<'stmt> KeyBuilder<'stmt> {
    fn finish(self) -> Generated<'stmt> {
        let mut hasher = DefaultHasher::new();
        self.tokens.hash(&mut hasher);

        Generated {
            key: CacheKey {
                dialect: None,
                tokens: self.tokens.into(),
                hash: hasher.finish(),
            },
            extracted: ExtractedParams {
                values: self.extracted,
            },
            index: BindIndex {
                positions: self.index,
            },
        }
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn str(&mut self, s: &str) {
        self.push(Token::Str(s.into()));
    }

    fn group(&mut self, tag: &'static str, f: impl FnOnce(&mut Self) -> Walk) -> Walk {
        self.push(Token::Open(tag));
        f(self)?;
        self.push(Token::Close);
        Ok(())
    }

    fn statement(&mut self, stmt: &'stmt Statement) -> Walk {
        match stmt.kind() {
            StatementKind::Query(query) => self.query(query),
            StatementKind::Insert(insert) => self.insert(insert),
            StatementKind::Update(update) => self.update(update),
            StatementKind::Delete(delete) => self.delete(delete),
            StatementKind::Ddl(_) => Err(Uncacheable),
        }
    }

    fn query(&mut self, query: &'stmt Query) -> Walk {
        self.group("query", |k| {
            if let Some(with) = &query.with {
                k.group("with", |k| {
                    for cte in &with.ctes {
                        k.cte(cte)?;
                    }
                    Ok(())
                })?;
            }

            k.expr_set(&query.body)?;

            if let Some(order_by) = &query.order_by {
                k.order_by(order_by)?;
            }

            if let Some(limit) = &query.limit {
                k.limit(limit)?;
            }

            Ok(())
        })
    }

    fn cte(&mut self, cte: &'stmt Cte) -> Walk {
        self.group("cte", |k| {
            k.str(&cte.name);
            k.query(&cte.query)
        })
    }

    fn expr_set(&mut self, expr_set: &'stmt ExprSet) -> Walk {
        match expr_set {
            ExprSet::Select(select) => self.select(select),
            ExprSet::SetOp(set_op) => self.group("set_op", |k| {
                k.str(set_op.op.as_str());
                for operand in &set_op.operands {
                    k.expr_set(operand)?;
                }
                Ok(())
            }),
            // VALUES used as a query source is rendered row by row.
            ExprSet::Values(_) => Err(Uncacheable),
        }
    }

    fn select(&mut self, select: &'stmt Select) -> Walk {
        self.group("select", |k| {
            k.push(Token::Bool(select.distinct));
            k.exprs("columns", &select.columns)?;

            k.group("from", |k| {
                for from in &select.from {
                    k.table_with_joins(from)?;
                }
                Ok(())
            })?;

            k.opt_expr("where", select.filter.as_ref())?;
            k.exprs("group_by", &select.group_by)?;
            k.opt_expr("having", select.having.as_ref())
        })
    }

    fn order_by(&mut self, order_by: &'stmt OrderBy) -> Walk {
        self.group("order_by", |k| {
            for item in &order_by.exprs {
                k.push(Token::Int(match item.direction {
                    None => 0,
                    Some(Direction::Asc) => 1,
                    Some(Direction::Desc) => 2,
                }));
                k.expr(&item.expr)?;
            }
            Ok(())
        })
    }

    fn limit(&mut self, limit: &'stmt Limit) -> Walk {
        self.group("limit", |k| {
            k.opt_expr("limit", limit.limit.as_ref())?;
            k.opt_expr("offset", limit.offset.as_ref())
        })
    }

    fn table_with_joins(&mut self, table: &'stmt TableWithJoins) -> Walk {
        self.group("table_with_joins", |k| {
            k.table_factor(&table.relation)?;
            for (i, join) in table.joins.iter().enumerate() {
                k.join(table, i, join)?;
            }
            Ok(())
        })
    }

    fn join(&mut self, table: &'stmt TableWithJoins, i: usize, join: &'stmt Join) -> Walk {
        self.group("join", |k| {
            k.push(Token::Int(match join.kind {
                JoinKind::Inner => 0,
                JoinKind::Left => 1,
                JoinKind::Right => 2,
                JoinKind::Full => 3,
                JoinKind::Cross => 4,
            }));
            k.table_factor(&join.table)?;

            match &join.on {
                JoinOn::Expr(expr) => k.group("on", |k| k.expr(expr)),
                JoinOn::Infer => {
                    // The inferred condition depends on the foreign keys of
                    // the joined tables, which the table names don't capture.
                    let left = std::iter::once(&table.relation)
                        .chain(table.joins[..i].iter().map(|join| &join.table));
                    let condition =
                        compiler::infer_join_condition(left, &join.table).map_err(|_| Uncacheable)?;

                    k.group("infer", |k| {
                        for (lhs, rhs) in &condition {
                            k.column(lhs);
                            k.column(rhs);
                        }
                        Ok(())
                    })
                }
                JoinOn::None => Ok(()),
            }
        })
    }

    fn table_factor(&mut self, factor: &'stmt TableFactor) -> Walk {
        match factor {
            TableFactor::Table(table_ref) => self.group("table", |k| {
                k.table_name(&table_ref.table.table_name());
                k.opt_alias(table_ref.alias.as_ref());
                Ok(())
            }),
            TableFactor::Derived(derived) => self.group("derived", |k| {
                k.query(&derived.subquery)?;
                k.alias(&derived.alias);
                for column in &derived.columns {
                    k.str(column);
                }
                Ok(())
            }),
            TableFactor::Cte(cte_ref) => self.group("cte_ref", |k| {
                k.str(&cte_ref.name);
                k.opt_alias(cte_ref.alias.as_ref());
                Ok(())
            }),
        }
    }

    fn table_name(&mut self, name: &TableName) {
        match &name.schema {
            Some(schema) => {
                self.push(Token::Bool(true));
                self.str(schema);
            }
            None => self.push(Token::Bool(false)),
        }
        self.str(&name.name);
    }

    fn alias(&mut self, alias: &Alias) {
        match alias {
            Alias::Named(name) => {
                self.push(Token::Open("alias"));
                self.str(name);
            }
            Alias::Anonymous(id) => {
                let next = self.anon.len() + 1;
                let ordinal = *self.anon.entry(*id).or_insert(next);
                self.push(Token::Open("anon"));
                self.push(Token::Int(ordinal as i64));
            }
        }
        self.push(Token::Close);
    }

    fn opt_alias(&mut self, alias: Option<&Alias>) {
        match alias {
            Some(alias) => self.alias(alias),
            None => self.push(Token::Bool(false)),
        }
    }

    fn column(&mut self, column: &ExprColumn) {
        self.push(Token::Open("column"));
        self.qualifier(&column.qualifier);
        self.str(&column.name);
        self.push(Token::Ty(column.ty.clone()));
        self.push(Token::Close);
    }

    fn qualifier(&mut self, qualifier: &Qualifier) {
        match qualifier {
            Qualifier::None => self.push(Token::Int(0)),
            Qualifier::Table(name) => {
                self.push(Token::Int(1));
                self.table_name(name);
            }
            Qualifier::Alias(alias) => {
                self.push(Token::Int(2));
                self.alias(alias);
            }
        }
    }

    fn insert(&mut self, insert: &'stmt Insert) -> Walk {
        self.group("insert", |k| {
            k.table_name(&insert.table.table_name());
            for column in &insert.columns {
                k.str(column);
            }

            match &insert.source {
                InsertSource::DefaultValues => k.push(Token::Open("default_values")),
                // Multi-row inserts are compiled per execution.
                InsertSource::Values(values) if values.rows.len() > 1 => {
                    return Err(Uncacheable)
                }
                InsertSource::Values(values) => {
                    k.push(Token::Open("values"));
                    for expr in values.rows.iter().flatten() {
                        k.expr(expr)?;
                    }
                }
                InsertSource::Query(query) => {
                    k.push(Token::Open("from_query"));
                    k.query(query)?;
                }
            }
            k.push(Token::Close);

            k.exprs("returning", &insert.returning)
        })
    }

    fn update(&mut self, update: &'stmt Update) -> Walk {
        self.group("update", |k| {
            k.table_name(&update.table.table_name());

            k.group("set", |k| {
                for assignment in &update.assignments {
                    k.qualifier(&assignment.column.qualifier);
                    k.str(&assignment.column.name);
                    k.expr(&assignment.value)?;
                }
                Ok(())
            })?;

            k.group("from", |k| {
                for from in &update.from {
                    k.table_with_joins(from)?;
                }
                Ok(())
            })?;

            k.opt_expr("where", update.filter.as_ref())?;
            k.exprs("returning", &update.returning)
        })
    }

    fn delete(&mut self, delete: &'stmt Delete) -> Walk {
        self.group("delete", |k| {
            k.table_name(&delete.table.table_name());
            k.opt_expr("where", delete.filter.as_ref())?;
            k.exprs("returning", &delete.returning)
        })
    }

    fn exprs(&mut self, tag: &'static str, exprs: &'stmt [Expr]) -> Walk {
        self.group(tag, |k| {
            for expr in exprs {
                k.expr(expr)?;
            }
            Ok(())
        })
    }

    fn opt_expr(&mut self, tag: &'static str, expr: Option<&'stmt Expr>) -> Walk {
        match expr {
            Some(expr) => self.group(tag, |k| k.expr(expr)),
            None => Ok(()),
        }
    }

    fn expr(&mut self, expr: &'stmt Expr) -> Walk {
        match expr {
            Expr::And(expr) => self.exprs("and", &expr.operands),
            Expr::Or(expr) => self.exprs("or", &expr.operands),
            Expr::Arg(arg) => self.group("arg", |k| {
                k.push(Token::Int(arg.position as i64));
                k.push(Token::Ty(arg.ty.clone()));
                Ok(())
            }),
            Expr::BinaryOp(expr) => self.group("binary_op", |k| {
                k.expr(&expr.lhs)?;
                k.str(expr.op.as_str());
                k.expr(&expr.rhs)
            }),
            Expr::Bind(bind) => {
                self.bind(bind);
                Ok(())
            }
            Expr::Cast(expr) => self.group("cast", |k| {
                k.push(Token::Ty(expr.ty.clone()));
                k.expr(&expr.expr)
            }),
            Expr::Column(column) => {
                self.column(column);
                Ok(())
            }
            Expr::Custom(custom) => {
                let key = custom.0.cache_key().ok_or(Uncacheable)?;
                self.group("custom", |k| {
                    k.str(&key);
                    Ok(())
                })
            }
            Expr::Exists(expr) => self.group("exists", |k| k.query(&expr.query)),
            Expr::Func(func) => self.group("func", |k| {
                k.str(&func.name);
                k.push(Token::Ty(func.ty.clone()));
                for arg in &func.args {
                    k.expr(arg)?;
                }
                Ok(())
            }),
            Expr::InList(expr) => self.group("in_list", |k| {
                k.expr(&expr.expr)?;
                k.exprs("list", &expr.list)
            }),
            Expr::InSubquery(expr) => self.group("in_subquery", |k| {
                k.expr(&expr.expr)?;
                k.query(&expr.query)
            }),
            Expr::IsNull(expr) => self.group("is_null", |k| {
                k.push(Token::Bool(expr.negate));
                k.expr(&expr.expr)
            }),
            Expr::Label(expr) => self.group("label", |k| {
                k.str(&expr.name);
                k.expr(&expr.expr)
            }),
            Expr::Literal(value) => self.group("literal", |k| {
                k.value(value);
                Ok(())
            }),
            Expr::Not(expr) => self.group("not", |k| k.expr(&expr.expr)),
            Expr::Stmt(expr) => self.group("scalar_subquery", |k| k.query(&expr.query)),
            Expr::Wildcard(qualifier) => self.group("wildcard", |k| {
                k.qualifier(qualifier);
                Ok(())
            }),
        }
    }

    fn bind(&mut self, bind: &'stmt BindParam) {
        self.push(Token::Open("bind"));

        match &bind.key {
            BindKey::Named(name) => {
                self.push(Token::Int(0));
                self.str(name);
            }
            BindKey::Anonymous { hint: Some(hint) } => {
                self.push(Token::Int(1));
                self.str(hint);
            }
            BindKey::Anonymous { hint: None } => self.push(Token::Int(2)),
        }

        self.push(Token::Ty(bind.ty.clone()));
        self.push(Token::Bool(bind.literal_execute));
        self.push(Token::Bool(bind.expanding));
        self.push(Token::Bool(bind.value.is_some()));
        self.push(Token::Close);

        if let Some(value) = &bind.value {
            self.index.insert(ByAddress(bind), self.extracted.len());
            self.extracted.push(value.clone());
        }
    }

    fn value(&mut self, value: &Value) {
        match value {
            Value::Null => self.push(Token::Open("null")),
            Value::Bool(v) => self.push(Token::Bool(*v)),
            Value::I32(v) => {
                self.push(Token::Open("i32"));
                self.push(Token::Int(*v as i64));
            }
            Value::I64(v) => self.push(Token::Int(*v)),
            Value::F64(v) => self.push(Token::Float(v.to_bits())),
            Value::String(v) => self.str(v),
            Value::Bytes(v) => self.push(Token::Bytes(v.as_slice().into())),
            Value::List(items) => {
                self.push(Token::Open("list"));
                for item in items {
                    self.value(item);
                }
            }
        }

        if matches!(value, Value::Null | Value::I32(_) | Value::List(_)) {
            self.push(Token::Close);
        }
    }
}

#[macro_use]
mod fmt;
use fmt::ToSql;

mod ddl;

mod delim;
use delim::{Comma, Delimited};

mod dml;
mod expr;

mod ident;
use ident::Ident;

mod join;
pub(crate) use join::infer_join_condition;
mod limit;
mod query;

use crate::{
    compiled::{Marker, StatementType},
    BindIndex, BindValue, Binding, CompiledStatement,
};

use squill_core::{
    dialect::{Dialect, Paramstyle},
    stmt::{
        visit, AnonId, BindKey, BindParam, ExprArg, ExprColumn, Qualifier, Statement,
        StatementKind, Type,
    },
    Error, Result,
};

use by_address::ByAddress;
use indexmap::IndexMap;
use std::{
    collections::{HashMap, HashSet},
    fmt::Write,
    sync::Arc,
    time::Instant,
};

/// Compiles statements to SQL text for one dialect.
///
/// Compilation is a single synchronous pass. Bind parameters are named
/// deterministically: a statement always compiles to the same text and the
/// same binding table, whatever the values it carries.
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'a> {
    dialect: &'a dyn Dialect,
}

struct Formatter<'a, 'stmt> {
    dialect: &'a dyn Dialect,

    /// Positions of the statement's bind values in its extracted
    /// parameters. `None` when the statement is not cached, in which case
    /// values are captured into the compiled statement.
    index: Option<&'a BindIndex<'stmt>>,

    /// Where to write the SQL
    dst: String,

    bindings: IndexMap<String, Binding>,
    markers: Vec<Marker>,

    /// Placeholder numbers of bindings, for numbered paramstyles.
    numbers: HashMap<usize, usize>,

    /// Bind nodes already rendered, so a node rendered twice reuses its
    /// binding.
    rendered: HashMap<ByAddress<&'stmt BindParam>, usize>,

    /// Names anonymous binds must not take.
    reserved: HashSet<String>,

    /// Last number handed out per anonymous bind base name.
    counters: HashMap<String, usize>,

    /// Statement-local numbering of anonymous aliases.
    aliases: HashMap<AnonId, usize>,
    alias_count: usize,

    /// True when column references render their qualifier.
    qualify: bool,
}

impl<'a> Compiler<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Compiles `stmt`.
    ///
    /// When `index` is given, bindings of valued bind parameters refer to
    /// positions in the statement's extracted parameters so the result can
    /// be cached and reused by structurally equal statements. Without an
    /// index the values are captured in the result.
    pub fn compile<'stmt>(
        &self,
        stmt: &'stmt Statement,
        index: Option<&BindIndex<'stmt>>,
    ) -> Result<CompiledStatement> {
        let mut reserved = HashSet::new();
        visit::for_each_bind(stmt, |bind| {
            if let BindKey::Named(name) = &bind.key {
                reserved.insert(name.clone());
            }
        });
        visit::for_each_arg(stmt, |arg| {
            reserved.insert(arg_name(arg.position));
        });

        let mut f = Formatter {
            dialect: self.dialect,
            index,
            dst: String::new(),
            bindings: IndexMap::new(),
            markers: vec![],
            numbers: HashMap::new(),
            rendered: HashMap::new(),
            reserved,
            counters: HashMap::new(),
            aliases: HashMap::new(),
            alias_count: 0,
            qualify: true,
        };

        let (statement_type, returns_rows) = match stmt.kind() {
            StatementKind::Query(query) => {
                fmt!(&mut f, query);
                (StatementType::Select, true)
            }
            StatementKind::Insert(insert) => {
                fmt!(&mut f, insert);
                (StatementType::Insert, !insert.returning.is_empty())
            }
            StatementKind::Update(update) => {
                fmt!(&mut f, update);
                (StatementType::Update, !update.returning.is_empty())
            }
            StatementKind::Delete(delete) => {
                fmt!(&mut f, delete);
                (StatementType::Delete, !delete.returning.is_empty())
            }
            StatementKind::Ddl(ddl) => {
                fmt!(&mut f, ddl);
                (StatementType::Ddl, false)
            }
        };

        Ok(CompiledStatement {
            sql: Arc::from(f.dst),
            bindings: f.bindings,
            markers: f.markers,
            paramstyle: self.dialect.paramstyle(),
            dialect: self.dialect.name(),
            statement_type,
            returns_rows,
            created_at: Instant::now(),
        })
    }
}

impl<'stmt> Formatter<'_, 'stmt> {
    /// Runs `f` with column qualification switched on or off.
    fn qualified<R>(&mut self, qualify: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let prev = std::mem::replace(&mut self.qualify, qualify);
        let ret = f(self);
        self.qualify = prev;
        ret
    }

    /// Number of an anonymous alias within the statement.
    fn anon_alias(&mut self, id: AnonId) -> usize {
        if let Some(n) = self.aliases.get(&id) {
            return *n;
        }

        let n = self.fresh_alias();
        self.aliases.insert(id, n);
        n
    }

    /// An alias number for a derived table the compiler introduces itself.
    fn fresh_alias(&mut self) -> usize {
        self.alias_count += 1;
        self.alias_count
    }

    fn qualifier(&mut self, qualifier: &Qualifier) -> Result<()> {
        match qualifier {
            Qualifier::None => {}
            Qualifier::Table(name) => fmt!(self, name "."),
            Qualifier::Alias(alias) => fmt!(self, alias "."),
        }
        Ok(())
    }

    fn column(&mut self, column: &ExprColumn) -> Result<()> {
        if self.qualify {
            self.qualifier(&column.qualifier)?;
        }
        fmt!(self, Ident(&column.name));
        Ok(())
    }

    /// Renders the placeholder of a bind parameter, registering its binding
    /// on first use.
    fn bind(&mut self, bind: &'stmt BindParam, literal_execute: bool) -> Result<()> {
        if let Some(index) = self.rendered.get(&ByAddress(bind)).copied() {
            return self.placeholder(index);
        }

        let value = match &bind.value {
            None => BindValue::Deferred,
            Some(value) => match self.index.and_then(|index| index.position(bind)) {
                Some(position) => BindValue::Extracted(position),
                None => BindValue::Captured(value.clone()),
            },
        };

        let binding = Binding {
            ty: bind.ty.clone(),
            value,
            literal_execute: bind.literal_execute || literal_execute,
            expanding: bind.expanding,
        };

        let index = match &bind.key {
            BindKey::Named(name) => self.register_named(name, binding)?,
            BindKey::Anonymous { hint } => {
                let name = self.anonymous_name(hint.as_deref());
                self.bindings.insert_full(name, binding).0
            }
        };

        self.rendered.insert(ByAddress(bind), index);
        self.placeholder(index)
    }

    /// Renders the placeholder of a template argument.
    fn arg(&mut self, arg: &ExprArg, literal_execute: bool) -> Result<()> {
        let name = arg_name(arg.position);

        let binding = Binding {
            ty: arg.ty.clone(),
            value: BindValue::Arg(arg.position),
            literal_execute,
            expanding: matches!(arg.ty, Type::List(_)),
        };

        let index = match self.bindings.get_index_of(&name) {
            Some(index) => {
                let existing = &self.bindings[index];
                if existing.ty != binding.ty
                    || existing.expanding != binding.expanding
                    || existing.literal_execute != binding.literal_execute
                {
                    return Err(Error::invalid_statement(format!(
                        "template argument {} is used with conflicting types or flags",
                        arg.position
                    )));
                }
                index
            }
            None => self.bindings.insert_full(name, binding).0,
        };

        self.placeholder(index)
    }

    fn register_named(&mut self, name: &str, binding: Binding) -> Result<usize> {
        let Some(index) = self.bindings.get_index_of(name) else {
            return Ok(self.bindings.insert_full(name.to_string(), binding).0);
        };
        let existing = &mut self.bindings[index];

        if matches!(existing.value, BindValue::Arg(_)) {
            return Err(Error::invalid_statement(format!(
                "bind parameter `{name}` conflicts with a template argument"
            )));
        }

        if existing.ty != binding.ty
            || existing.literal_execute != binding.literal_execute
            || existing.expanding != binding.expanding
        {
            return Err(Error::invalid_statement(format!(
                "bind parameter `{name}` is used with conflicting types or flags"
            )));
        }

        if existing.value == BindValue::Deferred {
            existing.value = binding.value;
        }

        Ok(index)
    }

    fn anonymous_name(&mut self, hint: Option<&str>) -> String {
        let base = hint.unwrap_or("param");

        loop {
            let counter = self.counters.entry(base.to_string()).or_insert(0);
            *counter += 1;

            let name = format!("{base}_{counter}");
            if !self.reserved.contains(&name) && !self.bindings.contains_key(&name) {
                return name;
            }
        }
    }

    fn placeholder(&mut self, index: usize) -> Result<()> {
        let Some((name, binding)) = self.bindings.get_index(index) else {
            return Err(Error::invalid_statement("unregistered bind parameter"));
        };

        let post_compile = binding.literal_execute || binding.expanding;
        let start = self.dst.len();

        if post_compile {
            write!(self.dst, "__[POSTCOMPILE_{name}]")?;
        } else {
            match self.dialect.paramstyle() {
                Paramstyle::Qmark => self.dst.push('?'),
                Paramstyle::NumericQmark | Paramstyle::Numeric => {
                    // Distinct bindings are numbered in order of first appearance.
                    let next = self.numbers.len() + 1;
                    let number = *self.numbers.entry(index).or_insert(next);

                    let prefix = match self.dialect.paramstyle() {
                        Paramstyle::Numeric => '$',
                        _ => '?',
                    };
                    write!(self.dst, "{prefix}{number}")?;
                }
                Paramstyle::Named => write!(self.dst, ":{name}")?,
            }
        }

        self.markers.push(Marker {
            range: start..self.dst.len(),
            binding: index,
            post_compile,
        });
        Ok(())
    }
}

fn arg_name(position: usize) -> String {
    format!("arg_{position}")
}

use pretty_assertions::assert_eq;
use squill::{
    dialect::{Oracle, Postgresql, Sqlite},
    driver::{BoundParams, Connection, ExecutableStatement, Response},
    schema::Table,
    stmt::{Expr, Select, Statement, Type, Value},
    CacheStatus, CompiledCache, Engine, ExecOptions, Params, StatementTemplate,
};

use std::sync::{Arc, Mutex};

/// Records every statement it is asked to execute.
#[derive(Debug, Clone, Default)]
struct Recorder {
    executed: Arc<Mutex<Vec<ExecutableStatement>>>,
}

impl Recorder {
    fn executed(&self) -> Vec<ExecutableStatement> {
        self.executed.lock().unwrap().clone()
    }
}

#[squill::async_trait]
impl Connection for Recorder {
    async fn exec(&self, stmt: ExecutableStatement) -> squill::Result<Response> {
        self.executed.lock().unwrap().push(stmt);
        Ok(Response::count(1))
    }
}

fn users() -> Arc<Table> {
    Table::builder("users")
        .column("id", Type::I64)
        .column("name", Type::String)
        .primary_key(["id"])
        .build()
        .unwrap()
}

fn engine(recorder: &Recorder) -> Engine {
    Engine::builder()
        .dialect(Sqlite)
        .build(recorder.clone())
        .unwrap()
}

fn by_id(users: &Arc<Table>, id: i64) -> Statement {
    users.select().filter(users.c("id").eq(id)).into()
}

#[tokio::test]
async fn exec_compiles_once() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);
    let users = users();

    let first = engine.exec(by_id(&users, 1)).await.unwrap();
    let second = engine.exec(by_id(&users, 2)).await.unwrap();

    assert_eq!(first.status, CacheStatus::Miss);
    assert_eq!(second.status, CacheStatus::Hit);
    assert_eq!(first.sql, second.sql);
    assert_eq!(first.response, Response::count(1));
    assert_eq!(engine.cache().len(), 1);

    let executed = recorder.executed();
    assert_eq!(executed.len(), 2);
    assert_eq!(
        &*executed[1].sql,
        "SELECT users.id, users.name FROM users WHERE users.id = ?1"
    );
    assert_eq!(executed[0].params, BoundParams::Positional(vec![Value::I64(1)]));
    assert_eq!(executed[1].params, BoundParams::Positional(vec![Value::I64(2)]));
}

#[tokio::test]
async fn clones_share_the_cache() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);
    let users = users();

    engine.exec(by_id(&users, 1)).await.unwrap();

    let status = engine.clone().exec(by_id(&users, 2)).await.unwrap().status;
    assert_eq!(status, CacheStatus::Hit);
}

#[tokio::test]
async fn exec_without_cache() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);
    let users = users();

    let res = engine
        .exec_with(by_id(&users, 1), Params::new(), ExecOptions::no_cache())
        .await
        .unwrap();

    assert_eq!(res.status, CacheStatus::Disabled);
    assert!(engine.cache().is_empty());
}

#[tokio::test]
async fn exec_with_alternate_store() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);
    let users = users();
    let store = Arc::new(CompiledCache::with_capacity(5).unwrap());

    for expected in [CacheStatus::Miss, CacheStatus::Hit] {
        let res = engine
            .exec_with(
                by_id(&users, 1),
                Params::new(),
                ExecOptions::with_store(store.clone()),
            )
            .await
            .unwrap();
        assert_eq!(res.status, expected);
    }

    assert_eq!(store.len(), 1);
    assert!(engine.cache().is_empty());
}

#[tokio::test]
async fn exec_with_deferred_params() {
    let recorder = Recorder::default();
    let engine = Engine::builder()
        .dialect(Oracle)
        .build(recorder.clone())
        .unwrap();
    let users = users();

    let query = || {
        Select::new([users.c("name")])
            .from(&users)
            .filter(users.c("id").eq(Expr::bind_deferred("user_id", Type::I64)))
    };

    let err = engine.exec(query()).await.unwrap_err();
    assert!(err.is_missing_parameter());

    let res = engine
        .exec_with(query(), Params::new().set("user_id", 9i64), ExecOptions::new())
        .await
        .unwrap();

    assert_eq!(
        &*res.sql,
        "SELECT users.name FROM users WHERE users.id = :user_id"
    );
    assert_eq!(
        recorder.executed()[0].params.as_named().unwrap()["user_id"],
        Value::I64(9)
    );
}

#[tokio::test]
async fn exec_template() {
    let recorder = Recorder::default();
    let engine = Engine::builder()
        .dialect(Postgresql)
        .build(recorder.clone())
        .unwrap();
    let users = users();

    let template = StatementTemplate::new(
        Select::new([users.c("name")])
            .from(&users)
            .filter(users.c("id").eq(Expr::arg(0))),
        [Type::I64],
    )
    .unwrap();

    let first = engine.exec_template(&template, &[Value::I64(1)]).await.unwrap();
    let second = engine.exec_template(&template, &[Value::I64(2)]).await.unwrap();

    assert_eq!(first.status, CacheStatus::Miss);
    assert_eq!(second.status, CacheStatus::Hit);
    assert_eq!(&*second.sql, "SELECT users.name FROM users WHERE users.id = $1");
    assert_eq!(
        recorder.executed()[1].params,
        BoundParams::Positional(vec![Value::I64(2)])
    );

    let err = engine
        .exec_template(&template, &[Value::from("2")])
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(recorder.executed().len(), 2);
}

#[tokio::test]
async fn exec_driver_sql() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);

    let res = engine
        .exec_driver_sql(
            "DELETE FROM users WHERE id = ?1",
            BoundParams::Positional(vec![Value::I64(3)]),
        )
        .await
        .unwrap();

    assert_eq!(res.status, CacheStatus::Raw);
    assert_eq!(&*res.sql, "DELETE FROM users WHERE id = ?1");
    assert!(engine.cache().is_empty());
    assert_eq!(recorder.executed().len(), 1);
}

#[test]
fn compile_without_executing() {
    let recorder = Recorder::default();
    let engine = engine(&recorder);
    let users = users();

    let prepared = engine.compile(&by_id(&users, 4)).unwrap();

    assert_eq!(prepared.status(), CacheStatus::Miss);
    assert_eq!(
        prepared.sql(),
        "SELECT users.id, users.name FROM users WHERE users.id = ?1"
    );

    let stmt = prepared.bind(&Params::new()).unwrap();
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(4)]));

    let stmt = prepared.bind(&Params::new().set("id_1", 5i64)).unwrap();
    assert_eq!(stmt.params, BoundParams::Positional(vec![Value::I64(5)]));

    assert!(recorder.executed().is_empty());
}

#[test]
fn builder_requires_a_dialect() {
    let err = Engine::builder().build(Recorder::default()).unwrap_err();
    assert!(err.to_string().contains("dialect"), "{err}");
}

#[test]
fn builder_validates_the_cache_configuration() {
    let err = Engine::builder()
        .dialect(Sqlite)
        .query_cache_size(0)
        .build(Recorder::default())
        .unwrap_err();
    assert!(err.is_invalid_cache_configuration());

    let engine = Engine::builder()
        .dialect(Sqlite)
        .query_cache_size(20)
        .cache_threshold(0.25)
        .build(Recorder::default())
        .unwrap();
    assert_eq!(engine.cache().capacity(), 20);
    assert_eq!(engine.cache().threshold(), 0.25);
    assert_eq!(engine.dialect().name(), "sqlite");
}

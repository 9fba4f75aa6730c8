mod connect;

use crate::{Record, Recorder, Result};

use recordkit_core::{
    driver::{Driver, ExecResult, Executor, Transaction},
    Flavor, Row, Value,
};
use recordkit_sql::{Serializer, Statement};

use std::sync::Arc;

/// A database handle.
///
/// Wraps a driver together with the SQL flavor statements are rendered for.
/// Cloning is cheap; clones share the driver.
#[derive(Debug, Clone)]
pub struct Db {
    driver: Arc<dyn Driver>,
    flavor: Flavor,
}

impl Db {
    pub fn new(driver: impl Driver) -> Db {
        Db::from_arc(Arc::new(driver))
    }

    pub fn from_arc(driver: Arc<dyn Driver>) -> Db {
        let flavor = driver.flavor();
        Db { driver, flavor }
    }

    /// Open a database from a connection URL.
    ///
    /// The driver is picked by scheme: `sqlite:` needs the `sqlite` feature,
    /// `postgresql:` and `postgres:` need the `postgresql` feature.
    pub fn connect(url: &str) -> Result<Db> {
        connect::connect(url)
    }

    /// Render statements for `flavor` instead of the driver's own dialect.
    pub fn with_flavor(mut self, flavor: Flavor) -> Db {
        self.flavor = flavor;
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn serializer(&self) -> Serializer {
        Serializer::new(self.flavor)
    }

    /// Begin a transaction. Pass it to the `*_by_tx` recorder operations and
    /// commit or roll it back when done.
    pub fn begin(&self) -> Result<Box<dyn Transaction + '_>> {
        self.driver.begin()
    }

    /// Bind a record to a table.
    pub fn bind<R: Record>(&self, table: impl Into<String>, record: R) -> Recorder<R> {
        Recorder::new(self.clone(), table, record)
    }
}

impl Executor for Db {
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.driver.exec(sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[Value],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        self.driver.query(sql, params, each)
    }
}

/// Render and execute a statement that returns no rows.
pub(crate) fn exec<E>(executor: &E, flavor: Flavor, stmt: Statement) -> Result<ExecResult>
where
    E: Executor + ?Sized,
{
    let sql = Serializer::new(flavor).serialize(&stmt)?;
    tracing::debug!(sql = %sql.text, params = sql.params.len(), "recordkit.query");
    executor.exec(&sql.text, &sql.params)
}

/// Render and run a query, handing each row to `each`.
pub(crate) fn query<E>(
    executor: &E,
    flavor: Flavor,
    stmt: Statement,
    each: &mut dyn FnMut(Row) -> Result<()>,
) -> Result<()>
where
    E: Executor + ?Sized,
{
    let sql = Serializer::new(flavor).serialize(&stmt)?;
    tracing::debug!(sql = %sql.text, params = sql.params.len(), "recordkit.query");
    executor.query(&sql.text, &sql.params, each)
}

/// The first row of a query, if any.
pub(crate) fn query_row<E>(executor: &E, flavor: Flavor, stmt: Statement) -> Result<Option<Row>>
where
    E: Executor + ?Sized,
{
    let mut first = None;
    query(executor, flavor, stmt, &mut |row| {
        if first.is_none() {
            first = Some(row);
        }
        Ok(())
    })?;
    Ok(first)
}

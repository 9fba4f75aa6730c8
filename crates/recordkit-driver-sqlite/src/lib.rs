mod value;
pub(crate) use value::Value;

use recordkit_core::{
    driver::{Driver, ExecResult, Executor, Flavor, Transaction as CoreTransaction},
    err, Error, Result, Row, Value as CoreValue,
};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError, TryLockError},
    thread::{self, ThreadId},
};
use url::Url;

/// A blocking SQLite database behind a single connection.
///
/// Statements are serialized through a mutex. An open [`Transaction`] holds
/// the lock until it is committed, rolled back or dropped. While it is open,
/// statements issued on the same thread outside the transaction fail instead
/// of waiting for a lock that thread itself holds.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,

    /// Thread that opened the transaction currently holding `connection`
    tx_thread: Mutex<Option<ThreadId>>,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    ///
    /// `sqlite::memory:` opens an in-memory database; any other path is
    /// opened as a file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
            tx_thread: Mutex::new(None),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        // A panic mid-statement leaves the connection itself usable.
        match self.connection.try_lock() {
            Ok(guard) => return Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {}
        }

        let current = thread::current().id();
        if *lock_ignoring_poison(&self.tx_thread) == Some(current) {
            return Err(err!(
                "sqlite connection is held by an open transaction on this thread; \
                 run the statement through the transaction"
            ));
        }

        Ok(lock_ignoring_poison(&self.connection))
    }
}

impl Executor for Sqlite {
    fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
        exec(&*self.lock()?, sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[CoreValue],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        query(&*self.lock()?, sql, params, each)
    }
}

impl Driver for Sqlite {
    fn flavor(&self) -> Flavor {
        Flavor::Sqlite
    }

    fn begin(&self) -> Result<Box<dyn CoreTransaction + '_>> {
        let connection = self.lock()?;
        connection
            .execute_batch("BEGIN")
            .map_err(Error::driver_operation_failed)?;
        tracing::info!(event = "begin", driver = "sqlite", "recordkit.transaction");

        *lock_ignoring_poison(&self.tx_thread) = Some(thread::current().id());

        Ok(Box::new(Transaction {
            connection,
            tx_thread: &self.tx_thread,
            finished: false,
        }))
    }
}

/// An open SQLite transaction holding the connection lock.
#[derive(Debug)]
pub struct Transaction<'a> {
    connection: MutexGuard<'a, Connection>,
    tx_thread: &'a Mutex<Option<ThreadId>>,
    finished: bool,
}

impl Transaction<'_> {
    fn finish(&mut self, event: &'static str, sql: &str) -> Result<()> {
        self.connection
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)?;
        self.finished = true;
        tracing::info!(event, driver = "sqlite", "recordkit.transaction");
        Ok(())
    }
}

impl Executor for Transaction<'_> {
    fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
        exec(&self.connection, sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[CoreValue],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        query(&self.connection, sql, params, each)
    }
}

impl CoreTransaction for Transaction<'_> {
    fn commit(mut self: Box<Self>) -> Result<()> {
        self.finish("commit", "COMMIT")
    }

    fn rollback(mut self: Box<Self>) -> Result<()> {
        self.finish("rollback", "ROLLBACK")
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        *lock_ignoring_poison(self.tx_thread) = None;

        if self.finished {
            return;
        }

        if let Err(err) = self.finish("rollback", "ROLLBACK") {
            tracing::warn!(error = %err, "failed to roll back abandoned transaction");
        }
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn exec(connection: &Connection, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
    let mut stmt = connection
        .prepare_cached(sql)
        .map_err(Error::driver_operation_failed)?;

    let count = stmt
        .execute(rusqlite::params_from_iter(
            params.iter().cloned().map(Value::from),
        ))
        .map_err(Error::driver_operation_failed)?;

    // The rowid is connection-wide; only report it for the insert just run.
    let last_insert_id = (is_insert(sql) && count > 0).then(|| connection.last_insert_rowid());

    Ok(ExecResult {
        rows_affected: count as u64,
        last_insert_id,
    })
}

fn query(
    connection: &Connection,
    sql: &str,
    params: &[CoreValue],
    each: &mut dyn FnMut(Row) -> Result<()>,
) -> Result<()> {
    let mut stmt = connection
        .prepare_cached(sql)
        .map_err(Error::driver_operation_failed)?;
    let width = stmt.column_count();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(
            params.iter().cloned().map(Value::from),
        ))
        .map_err(Error::driver_operation_failed)?;

    while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
        let mut items = Vec::with_capacity(width);
        for index in 0..width {
            items.push(Value::from_sql(row, index)?.into_inner());
        }
        each(Row::new(items))?;
    }

    Ok(())
}

fn is_insert(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert"))
}

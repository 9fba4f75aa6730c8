mod value;
pub(crate) use value::Value;

use postgres::{fallible_iterator::FallibleIterator, types::ToSql, Client, NoTls};
use recordkit_core::{
    driver::{Driver, ExecResult, Executor, Flavor, Transaction as CoreTransaction},
    err, Error, Result, Row, Value as CoreValue,
};
use std::{
    cell::{RefCell, RefMut},
    sync::{Mutex, MutexGuard, PoisonError, TryLockError},
    thread::{self, ThreadId},
};
use url::Url;

/// A blocking PostgreSQL database behind a single client.
///
/// Generated ids are not reported by the server; records are inserted with
/// `RETURNING` instead. An open [`Transaction`] holds the client until it
/// finishes; statements issued beside it on the same thread fail.
pub struct PostgreSql {
    client: Mutex<Client>,

    /// Thread that opened the transaction currently holding `client`
    tx_thread: Mutex<Option<ThreadId>>,
}

impl PostgreSql {
    /// Connect using a `postgresql://` or `postgres://` URL.
    pub fn connect(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        if !matches!(parsed.scheme(), "postgresql" | "postgres") {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={url}"
            )));
        }

        let client = Client::connect(url, NoTls).map_err(Error::driver_operation_failed)?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
            tx_thread: Mutex::new(None),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Client>> {
        match self.client.try_lock() {
            Ok(guard) => return Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {}
        }

        if *lock_ignoring_poison(&self.tx_thread) == Some(thread::current().id()) {
            return Err(err!(
                "postgresql client is held by an open transaction on this thread; \
                 run the statement through the transaction"
            ));
        }

        Ok(lock_ignoring_poison(&self.client))
    }
}

impl std::fmt::Debug for PostgreSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgreSql").finish_non_exhaustive()
    }
}

impl Executor for PostgreSql {
    fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
        exec(&mut *self.lock()?, sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[CoreValue],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        query(&mut *self.lock()?, sql, params, each)
    }
}

impl Driver for PostgreSql {
    fn flavor(&self) -> Flavor {
        Flavor::Postgresql
    }

    fn begin(&self) -> Result<Box<dyn CoreTransaction + '_>> {
        let mut client = self.lock()?;
        client
            .batch_execute("BEGIN")
            .map_err(Error::driver_operation_failed)?;
        tracing::info!(event = "begin", driver = "postgresql", "recordkit.transaction");

        *lock_ignoring_poison(&self.tx_thread) = Some(thread::current().id());

        Ok(Box::new(Transaction {
            client: RefCell::new(client),
            tx_thread: &self.tx_thread,
            finished: false,
        }))
    }
}

/// An open PostgreSQL transaction holding the client.
pub struct Transaction<'a> {
    client: RefCell<MutexGuard<'a, Client>>,
    tx_thread: &'a Mutex<Option<ThreadId>>,
    finished: bool,
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("finished", &self.finished)
            .finish()
    }
}

impl<'a> Transaction<'a> {
    fn client(&self) -> Result<RefMut<'_, MutexGuard<'a, Client>>> {
        self.client
            .try_borrow_mut()
            .map_err(|_| err!("transaction is already running a statement"))
    }

    fn finish(&mut self, event: &'static str, sql: &str) -> Result<()> {
        self.client
            .get_mut()
            .batch_execute(sql)
            .map_err(Error::driver_operation_failed)?;
        self.finished = true;
        tracing::info!(event, driver = "postgresql", "recordkit.transaction");
        Ok(())
    }
}

impl Executor for Transaction<'_> {
    fn exec(&self, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
        exec(&mut **self.client()?, sql, params)
    }

    fn query(
        &self,
        sql: &str,
        params: &[CoreValue],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()> {
        query(&mut **self.client()?, sql, params, each)
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

fn exec(client: &mut Client, sql: &str, params: &[CoreValue]) -> Result<ExecResult> {
    let params: Vec<Value> = params.iter().cloned().map(Value::from).collect();
    let params: Vec<&(dyn ToSql + Sync)> = params.iter().map(|param| param as _).collect();

    let count = client
        .execute(sql, &params)
        .map_err(Error::driver_operation_failed)?;

    Ok(ExecResult {
        rows_affected: count,
        last_insert_id: None,
    })
}

fn query(
    client: &mut Client,
    sql: &str,
    params: &[CoreValue],
    each: &mut dyn FnMut(Row) -> Result<()>,
) -> Result<()> {
    let params: Vec<Value> = params.iter().cloned().map(Value::from).collect();

    let mut rows = client
        .query_raw(sql, params.iter())
        .map_err(Error::driver_operation_failed)?;

    while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
        let mut items = Vec::with_capacity(row.len());
        for index in 0..row.len() {
            items.push(Value::from_sql(&row, index)?.into_inner());
        }
        each(Row::new(items))?;
    }

    Ok(())
}

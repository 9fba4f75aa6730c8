mod capability;
pub use capability::{Capability, Placeholder};

mod flavor;
pub use flavor::Flavor;

use crate::{Result, Row, Value};

use std::fmt::Debug;

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    pub rows_affected: u64,

    /// Id generated by the statement, when the database reports one.
    pub last_insert_id: Option<i64>,
}

/// Something that can run statements: a connection or a transaction.
///
/// Every call is a single blocking round trip.
pub trait Executor {
    /// Execute a statement that returns no rows.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<ExecResult>;

    /// Run a query, handing each row to `each` in order.
    ///
    /// The cursor is released before this returns, whether or not `each`
    /// fails.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
        each: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<()>;
}

/// A database that can run statements and begin transactions.
pub trait Driver: Executor + Debug + Send + Sync + 'static {
    /// The SQL dialect spoken by this database.
    fn flavor(&self) -> Flavor;

    /// Begin a transaction. Commit and rollback are up to the caller.
    fn begin(&self) -> Result<Box<dyn Transaction + '_>>;
}

/// An open transaction.
///
/// Dropping a transaction that was neither committed nor rolled back rolls
/// it back.
pub trait Transaction: Executor {
    fn commit(self: Box<Self>) -> Result<()>;

    fn rollback(self: Box<Self>) -> Result<()>;
}

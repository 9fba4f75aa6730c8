//! Queries over a whole table.
//!
//! Each helper starts from `SELECT ... FROM <table>` for the table of a bound
//! recorder and hands it to a transform that may add predicates, joins or
//! ordering before it runs.

use crate::{
    db::{self, Db},
    Describe, Pagination, Recorder,
};

use recordkit_core::{projection, Error, FieldValue, Record, Result, Row};
use recordkit_sql::Select;

/// Every row of the table, one recorder per row.
pub fn list<R: Record>(
    rec: &Recorder<R>,
    pagination: Option<&Pagination>,
) -> Result<Vec<Recorder<R>>> {
    list_where(rec, pagination, |select| select)
}

/// The rows of the table selected by `f`, one recorder per row.
///
/// Each row is scanned into a fresh record bound to the same table. `f`
/// should leave the column list alone.
pub fn list_where<R, F>(
    rec: &Recorder<R>,
    pagination: Option<&Pagination>,
    f: F,
) -> Result<Vec<Recorder<R>>>
where
    R: Record,
    F: FnOnce(Select) -> Select,
{
    let mut select = f(Select::new(rec.all_columns()).from(rec.table_name()));
    if let Some(pagination) = pagination {
        select = pagination.apply(select);
    }

    let mut list = Vec::new();
    db::query(rec.db(), rec.flavor(), select.into(), &mut |row| {
        let mut item = rec.bind(rec.table_name(), R::default());
        let refs = projection::field_references(item.record_mut(), true, false)?;
        projection::scan(refs, row)?;
        list.push(item);
        Ok(())
    })?;

    Ok(list)
}

/// The `id` column of the rows selected by `f`.
pub fn list_ids<D, F>(rec: &D, f: F) -> Result<Vec<i64>>
where
    D: Describe + ?Sized,
    F: FnOnce(Select) -> Select,
{
    let select = f(Select::new(["id"]).from(rec.table_name()));

    let mut ids = Vec::new();
    db::query(rec.db(), rec.db().flavor(), select.into(), &mut |row| {
        ids.push(scalar::<i64>(row)?);
        Ok(())
    })?;

    Ok(ids)
}

/// `COUNT(*)` of the rows selected by `f`.
pub fn count<D, F>(rec: &D, f: F) -> Result<i64>
where
    D: Describe + ?Sized,
    F: FnOnce(Select) -> Select,
{
    let select = f(Select::new(["COUNT(*)"]).from(rec.table_name()));
    first_scalar(rec.db(), rec.table_name(), select)
}

/// `column` of the first row selected by `f`, as text.
pub fn query_one<D, F>(rec: &D, column: &str, f: F) -> Result<String>
where
    D: Describe + ?Sized,
    F: FnOnce(Select) -> Select,
{
    let select = f(Select::new([column]).from(rec.table_name())).limit(1);
    first_scalar(rec.db(), rec.table_name(), select)
}

fn first_scalar<T>(db: &Db, table: &str, select: Select) -> Result<T>
where
    T: FieldValue + Default,
{
    match db::query_row(db, db.flavor(), select.into())? {
        Some(row) => scalar(row),
        None => Err(Error::record_not_found(Some(table))),
    }
}

fn scalar<T>(row: Row) -> Result<T>
where
    T: FieldValue + Default,
{
    let mut value = T::default();
    projection::scan(vec![&mut value as &mut dyn FieldValue], row)?;
    Ok(value)
}

use crate::db::{self, Db};

use indexmap::IndexMap;
use recordkit_core::{
    driver::{ExecResult, Executor, Transaction},
    projection,
    schema::{Descriptors, Field},
    Error, FieldValue, Flavor, Record, Result, Value,
};
use recordkit_sql::{Delete, Insert, Predicate, Select, Update};

/// Table metadata of a bound record, enough to build queries against its
/// table without knowing the record type.
pub trait Describe {
    fn table_name(&self) -> &str;

    fn descriptors(&self) -> &'static Descriptors;

    fn db(&self) -> &Db;

    /// Every mapped column, keys included.
    fn all_columns(&self) -> Vec<&'static str> {
        self.descriptors()
            .fields()
            .iter()
            .map(|field| field.column.as_str())
            .collect()
    }
}

/// A record bound to a table and a database.
///
/// The recorder owns the record. Reads overwrite its fields in place and
/// writes take their values from its current fields.
#[derive(Debug)]
pub struct Recorder<R: Record> {
    table: String,
    descriptors: &'static Descriptors,
    record: R,
    db: Db,
}

impl<R: Record> Recorder<R> {
    pub fn new(db: Db, table: impl Into<String>, record: R) -> Recorder<R> {
        Recorder {
            table: table.into(),
            descriptors: R::descriptors(),
            record,
            db,
        }
    }

    /// Bind another record on the same database.
    pub fn bind<T: Record>(&self, table: impl Into<String>, record: T) -> Recorder<T> {
        Recorder::new(self.db.clone(), table, record)
    }

    /// Refresh the non-key fields from the row matching the current key.
    pub fn load(&mut self) -> Result<()> {
        let filter = self.key_predicate("load")?;
        self.load_by(filter, false)
    }

    /// Refresh every field, keys included, from the first row matching
    /// `filter`.
    pub fn load_where(&mut self, filter: impl Into<Predicate>) -> Result<()> {
        self.load_by(filter.into(), true)
    }

    fn load_by(&mut self, filter: Predicate, with_keys: bool) -> Result<()> {
        let columns = projection::columns(&self.record, with_keys, false);
        let select = Select::new(columns)
            .from(&self.table)
            .filter(filter)
            .limit(1);

        let Some(row) = db::query_row(&self.db, self.flavor(), select.into())? else {
            return Err(Error::record_not_found(Some(self.table.as_str())));
        };

        let refs = projection::field_references(&mut self.record, with_keys, false)?;
        projection::scan(refs, row)
    }

    /// Whether a row with the current key exists.
    pub fn exists(&self) -> Result<bool> {
        let filter = self.key_predicate("exists")?;
        self.exists_by(filter)
    }

    /// Whether any row matches `filter`.
    pub fn exists_where(&self, filter: impl Into<Predicate>) -> Result<bool> {
        self.exists_by(filter.into())
    }

    fn exists_by(&self, filter: Predicate) -> Result<bool> {
        let select = Select::new(["COUNT(*) > 0"])
            .from(&self.table)
            .filter(filter)
            .limit(1);

        let mut exists = false;
        if let Some(row) = db::query_row(&self.db, self.flavor(), select.into())? {
            projection::scan(vec![&mut exists as &mut dyn FieldValue], row)?;
        }
        Ok(exists)
    }

    /// Insert the record, then write the generated id back into its
    /// auto-increment fields.
    pub fn insert(&mut self) -> Result<()> {
        let db = self.db.clone();
        self.insert_with(&db)
    }

    /// [`insert`](Self::insert) inside a caller managed transaction.
    pub fn insert_by_tx(&mut self, tx: &dyn Transaction) -> Result<()> {
        self.insert_with(tx)
    }

    fn insert_with<E: Executor + ?Sized>(&mut self, executor: &E) -> Result<()> {
        let (columns, values) = projection::column_values(&self.record, true, false)?;
        let insert = Insert::new(&self.table).columns(columns).values(values);

        if self.flavor().capability().insert_returning {
            let returning = projection::columns(&self.record, true, false);
            let insert = insert.returning(returning);

            let Some(row) = db::query_row(executor, self.flavor(), insert.into())? else {
                return Err(Error::record_not_found(Some(self.table.as_str())));
            };

            let refs = projection::field_references(&mut self.record, true, false)?;
            return projection::scan(refs, row);
        }

        let result = db::exec(executor, self.flavor(), insert.into())?;
        self.assign_generated_id(result.last_insert_id)
    }

    fn assign_generated_id(&mut self, id: Option<i64>) -> Result<()> {
        for field in self.descriptors.auto() {
            let Some(id) = id else {
                return Err(Error::last_insert_id_unavailable(&field.name));
            };

            let Some(dest) = field_mut(&mut self.record, &field.name) else {
                return Err(Error::field_not_settable(&field.name));
            };

            dest.load(Value::I64(id))
                .map_err(|err| err.context(Error::field_not_settable(&field.name)))?;
        }

        Ok(())
    }

    /// Write the non-key fields to the row with the current key.
    ///
    /// Returns the number of rows changed; no matching row is not an error.
    pub fn update(&self) -> Result<u64> {
        self.update_with(&self.db)
    }

    /// [`update`](Self::update) inside a caller managed transaction.
    pub fn update_by_tx(&self, tx: &dyn Transaction) -> Result<u64> {
        self.update_with(tx)
    }

    fn update_with<E: Executor + ?Sized>(&self, executor: &E) -> Result<u64> {
        let (columns, values) = projection::column_values(&self.record, false, true)?;

        let mut update = Update::new(&self.table);
        for (column, value) in columns.into_iter().zip(values) {
            update = update.set(column, value);
        }
        let update = update.filter(self.key_predicate("update")?);

        let ExecResult { rows_affected, .. } = db::exec(executor, self.flavor(), update.into())?;
        Ok(rows_affected)
    }

    /// Delete the row with the current key. The record itself is unchanged.
    pub fn delete(&self) -> Result<u64> {
        self.delete_with(&self.db)
    }

    /// [`delete`](Self::delete) inside a caller managed transaction.
    pub fn delete_by_tx(&self, tx: &dyn Transaction) -> Result<u64> {
        self.delete_with(tx)
    }

    fn delete_with<E: Executor + ?Sized>(&self, executor: &E) -> Result<u64> {
        let delete = Delete::new(&self.table).filter(self.key_predicate("delete")?);

        let ExecResult { rows_affected, .. } = db::exec(executor, self.flavor(), delete.into())?;
        Ok(rows_affected)
    }

    /// Equality on the key columns. With no key this matches every row.
    fn key_predicate(&self, operation: &'static str) -> Result<Predicate> {
        let ids = self.where_ids()?;
        if ids.is_empty() {
            tracing::warn!(
                table = %self.table,
                operation,
                "record has no key; statement applies to every row"
            );
        }
        Ok(Predicate::from(ids))
    }

    pub fn columns(&self, with_keys: bool, omit_null: bool) -> Vec<&'static str> {
        projection::columns(&self.record, with_keys, omit_null)
    }

    /// Scan destinations aligned with [`columns`](Self::columns).
    pub fn field_references(
        &mut self,
        with_keys: bool,
        omit_null: bool,
    ) -> Result<Vec<&mut dyn FieldValue>> {
        projection::field_references(&mut self.record, with_keys, omit_null)
    }

    pub fn column_values(
        &self,
        with_keys: bool,
        with_autos: bool,
    ) -> Result<(Vec<&'static str>, Vec<Value>)> {
        projection::column_values(&self.record, with_keys, with_autos)
    }

    pub fn where_ids(&self) -> Result<IndexMap<&'static str, Value>> {
        projection::where_ids(&self.record)
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Key column names.
    pub fn key(&self) -> Vec<&'static str> {
        self.descriptors
            .key()
            .map(|field| field.column.as_str())
            .collect()
    }

    pub fn fields(&self) -> &'static [Field] {
        self.descriptors.fields()
    }

    pub fn descriptors(&self) -> &'static Descriptors {
        self.descriptors
    }

    pub fn flavor(&self) -> Flavor {
        self.db.flavor()
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    pub fn into_record(self) -> R {
        self.record
    }

    /// `CREATE TABLE` statement for the bound table, always MySQL flavored.
    pub fn schema(&self) -> String {
        self.descriptors.create_table(&self.table)
    }
}

impl<R: Record> Describe for Recorder<R> {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn descriptors(&self) -> &'static Descriptors {
        self.descriptors
    }

    fn db(&self) -> &Db {
        &self.db
    }
}

impl<R: Record> std::ops::Deref for Recorder<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R: Record> std::ops::DerefMut for Recorder<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}

fn field_mut<'a, R: Record>(record: &'a mut R, name: &str) -> Option<&'a mut dyn FieldValue> {
    record
        .fields_mut()
        .into_iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| value)
}

//! Turn a bound record into the column and value lists of a statement.
//!
//! Every list is produced in descriptor order, so the columns and the
//! references (or values) returned by a single call line up position by
//! position. Scanning result column `i` into reference `i` relies on that.

use crate::{bail, FieldValue, Record, Result, Row, Value};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Column names, optionally without keys and without absent optional fields.
pub fn columns<R: Record>(record: &R, with_keys: bool, omit_null: bool) -> Vec<&'static str> {
    R::descriptors()
        .fields()
        .iter()
        .filter(|field| with_keys || !field.is_key)
        .filter(|field| {
            !omit_null
                || !record
                    .field(&field.name)
                    .is_some_and(|value| value.is_null())
        })
        .map(|field| field.column.as_str())
        .collect()
}

/// Scan destinations for each column returned by [`columns`] with the same
/// flags. Absent optional fields get a zero value allocated first.
pub fn field_references<R: Record>(
    record: &mut R,
    with_keys: bool,
    omit_null: bool,
) -> Result<Vec<&mut dyn FieldValue>> {
    Ok(projection(record, with_keys, omit_null)?.1)
}

/// Columns and their scan destinations, from one pass over the descriptors.
pub fn projection<R: Record>(
    record: &mut R,
    with_keys: bool,
    omit_null: bool,
) -> Result<(Vec<&'static str>, Vec<&mut dyn FieldValue>)> {
    let descriptors = R::descriptors();
    let mut by_name = fields_by_name(record);

    let mut columns = Vec::with_capacity(descriptors.len());
    let mut refs = Vec::with_capacity(descriptors.len());

    for field in descriptors.fields() {
        if !with_keys && field.is_key {
            continue;
        }

        let Some(value) = by_name.remove(field.name.as_str()) else {
            bail!("record has no accessor for mapped field `{}`", field.name);
        };

        if omit_null && value.is_null() {
            continue;
        }

        value.prepare();
        columns.push(field.column.as_str());
        refs.push(value);
    }

    Ok((columns, refs))
}

/// Parallel column and value lists for INSERT and UPDATE.
///
/// Keys are skipped unless `with_keys`, auto-increment fields unless
/// `with_autos`. Absent optional fields are left out entirely rather than
/// written as NULL.
pub fn column_values<R: Record>(
    record: &R,
    with_keys: bool,
    with_autos: bool,
) -> Result<(Vec<&'static str>, Vec<Value>)> {
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for field in R::descriptors().fields() {
        if !with_keys && field.is_key {
            continue;
        }
        if !with_autos && field.is_auto {
            continue;
        }

        let Some(value) = record.field(&field.name) else {
            bail!("record has no accessor for mapped field `{}`", field.name);
        };

        if value.is_null() {
            continue;
        }

        values.push(value.to_value()?);
        columns.push(field.column.as_str());
    }

    Ok((columns, values))
}

/// Key columns mapped to their current values.
pub fn where_ids<R: Record>(record: &R) -> Result<IndexMap<&'static str, Value>> {
    let mut clause = IndexMap::new();

    for field in R::descriptors().key() {
        let Some(value) = record.field(&field.name) else {
            bail!("record has no accessor for key field `{}`", field.name);
        };
        clause.insert(field.column.as_str(), value.to_value()?);
    }

    Ok(clause)
}

/// Load a result row into aligned scan destinations.
pub fn scan(refs: Vec<&mut dyn FieldValue>, row: Row) -> Result<()> {
    if refs.len() != row.len() {
        bail!(
            "expected {} destination arguments in scan, got {}",
            row.len(),
            refs.len()
        );
    }

    for (dest, value) in refs.into_iter().zip(row) {
        dest.load(value)?;
    }

    Ok(())
}

fn fields_by_name<R: Record>(record: &mut R) -> HashMap<&'static str, &mut dyn FieldValue> {
    let mut by_name = HashMap::new();
    for (name, value) in record.fields_mut() {
        by_name.entry(name).or_insert(value);
    }
    by_name
}

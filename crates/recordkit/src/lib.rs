// `#[derive(Record)]` refers to `recordkit`, including inside this crate.
extern crate self as recordkit;

pub mod db;
pub use db::Db;

mod model;
pub use model::Model;

pub mod pagination;
pub use pagination::{PageDefaults, Pagination};

pub mod query;

mod recorder;
pub use recorder::{Describe, Recorder};

pub use recordkit_core::{
    bail, driver, err, projection, schema, types, Error, FieldValue, Flavor, Record, Result, Row,
    Value,
};

pub use recordkit_macros::Record;

/// Statement builders, for predicates and for transforming list queries.
pub mod stmt {
    pub use recordkit_sql::{Delete, Insert, Predicate, Select, Serializer, Sql, Statement, Update};
}

#[doc(hidden)]
pub mod codegen_support {
    pub use recordkit_core::{Descriptors, FieldDef, FieldValue, Member, Record};
}

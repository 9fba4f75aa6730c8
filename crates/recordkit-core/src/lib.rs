mod error;
pub use error::Error;

pub mod driver;
pub use driver::{Driver, Executor, Flavor, Transaction};

mod field_value;
pub use field_value::FieldValue;

pub mod projection;

mod record;
pub use record::{Member, Record};

pub mod schema;
pub use schema::{Descriptors, Field, FieldDef, Kind};

pub mod types;

mod value;
pub use value::{Row, Value};

/// A Result type alias that uses recordkit's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

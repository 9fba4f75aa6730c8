mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldTy};

mod orm_attr;
pub(crate) use orm_attr::OrmAttr;

mod record;
pub(crate) use record::Record;

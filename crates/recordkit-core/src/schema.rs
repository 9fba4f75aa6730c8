mod column_type;
pub use column_type::column_type;

mod create_table;

mod descriptors;
pub use descriptors::{Descriptors, Diagnostic};

mod field;
pub use field::{Field, FieldDef};

mod kind;
pub use kind::Kind;

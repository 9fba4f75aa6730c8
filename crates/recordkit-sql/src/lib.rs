pub mod serializer;
pub use serializer::{Serializer, Sql};

pub mod stmt;
pub use stmt::{Delete, Insert, Predicate, Select, Statement, Update};

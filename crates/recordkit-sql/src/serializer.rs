#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Comma;

mod params;
use params::Placeholder;

// Fragment serializers
mod predicate;
mod statement;

use crate::stmt::Statement;

use recordkit_core::{driver::Capability, Flavor, Result, Value};

/// Rendered SQL text and its positional parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

/// Serialize a statement to a SQL string
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut Vec<Value>,
}

impl Serializer {
    pub fn new(flavor: Flavor) -> Serializer {
        Serializer { flavor }
    }

    pub fn mysql() -> Serializer {
        Serializer::new(Flavor::Mysql)
    }

    pub fn postgresql() -> Serializer {
        Serializer::new(Flavor::Postgresql)
    }

    pub fn sqlite() -> Serializer {
        Serializer::new(Flavor::Sqlite)
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Render `stmt`, numbering placeholders across the whole statement.
    pub fn serialize(&self, stmt: &Statement) -> Result<Sql> {
        let mut sql = Sql::default();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut sql.text,
            params: &mut sql.params,
        };

        stmt.to_sql(&mut fmt)?;

        Ok(sql)
    }

    fn capability(&self) -> &'static Capability {
        self.flavor.capability()
    }
}

impl Formatter<'_> {
    /// Record a parameter and return the placeholder that refers to it.
    fn param(&mut self, value: &Value) -> Placeholder {
        self.params.push(value.clone());
        Placeholder(self.params.len())
    }
}

use super::Value;

use indexmap::IndexMap;

/// A WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value` for every entry, joined with `AND`. A NULL value
    /// renders as `column IS NULL`.
    Eq(IndexMap<String, Value>),

    /// Raw SQL with `?` markers, one per argument. `??` is a literal `?`.
    Sql { sql: String, args: Vec<Value> },

    /// Every predicate must hold.
    And(Vec<Predicate>),
}

impl Predicate {
    /// A single equality test.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Predicate {
        let mut map = IndexMap::new();
        map.insert(column.into(), value.into());
        Predicate::Eq(map)
    }

    pub fn sql(sql: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Predicate {
        Predicate::Sql {
            sql: sql.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Combine with another predicate, flattening nested conjunctions.
    pub fn and(self, other: impl Into<Predicate>) -> Predicate {
        let other = other.into();
        match self {
            Predicate::And(mut preds) => {
                match other {
                    Predicate::And(rest) => preds.extend(rest),
                    other => preds.push(other),
                }
                Predicate::And(preds)
            }
            lhs => match other {
                Predicate::And(mut rest) => {
                    rest.insert(0, lhs);
                    Predicate::And(rest)
                }
                rhs => Predicate::And(vec![lhs, rhs]),
            },
        }
    }

    /// True when the predicate restricts nothing and no WHERE clause should
    /// be written.
    pub fn is_empty(&self) -> bool {
        match self {
            Predicate::Eq(map) => map.is_empty(),
            Predicate::Sql { sql, .. } => sql.trim().is_empty(),
            Predicate::And(preds) => preds.iter().all(Predicate::is_empty),
        }
    }
}

impl<K: Into<String>> From<IndexMap<K, Value>> for Predicate {
    fn from(value: IndexMap<K, Value>) -> Self {
        Predicate::Eq(value.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Predicate {
    fn from(value: &str) -> Self {
        Predicate::sql(value, Vec::new())
    }
}

impl From<String> for Predicate {
    fn from(value: String) -> Self {
        Predicate::sql(value, Vec::new())
    }
}

use super::{Predicate, Value};

/// An `UPDATE` statement. At least one column must be set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Update {
    pub table: String,
    pub assignments: Vec<(String, Value)>,
    pub filter: Option<Predicate>,
}

impl Update {
    pub fn new(table: impl Into<String>) -> Update {
        Update {
            table: table.into(),
            ..Update::default()
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Update {
        self.assignments.push((column.into(), value.into()));
        self
    }

    pub fn filter(mut self, pred: impl Into<Predicate>) -> Update {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(pred),
            None => pred.into(),
        });
        self
    }
}

use super::Predicate;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delete {
    pub table: String,
    pub filter: Option<Predicate>,
}

impl Delete {
    pub fn new(table: impl Into<String>) -> Delete {
        Delete {
            table: table.into(),
            filter: None,
        }
    }

    pub fn filter(mut self, pred: impl Into<Predicate>) -> Delete {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(pred),
            None => pred.into(),
        });
        self
    }
}

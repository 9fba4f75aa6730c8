use super::Predicate;

/// A `SELECT` query.
///
/// Built by chaining: `Select::new(["id", "name"]).from("users").filter(..)`.
/// Successive `filter` calls are combined with `AND`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    pub columns: Vec<String>,
    pub from: Option<String>,

    /// Raw join clauses, e.g. `LEFT JOIN teams ON teams.id = users.team_id`
    pub joins: Vec<String>,

    pub filter: Option<Predicate>,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,

    /// Appended verbatim, e.g. `FOR UPDATE`
    pub suffix: Option<String>,
}

impl Select {
    pub fn new<I>(columns: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Select {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Select::default()
        }
    }

    pub fn from(mut self, table: impl Into<String>) -> Select {
        self.from = Some(table.into());
        self
    }

    pub fn join(mut self, clause: impl Into<String>) -> Select {
        self.joins.push(clause.into());
        self
    }

    pub fn filter(mut self, pred: impl Into<Predicate>) -> Select {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(pred),
            None => pred.into(),
        });
        self
    }

    pub fn group_by(mut self, expr: impl Into<String>) -> Select {
        self.group_by.push(expr.into());
        self
    }

    pub fn order_by(mut self, expr: impl Into<String>) -> Select {
        self.order_by.push(expr.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Select {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Select {
        self.offset = Some(offset);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Select {
        self.suffix = Some(suffix.into());
        self
    }
}

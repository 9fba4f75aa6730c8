use super::Value;

/// An `INSERT` statement with one or more rows of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,

    /// One entry per row, each aligned with `columns`
    pub rows: Vec<Vec<Value>>,

    /// Columns to return from the stored row
    pub returning: Vec<String>,
}

impl Insert {
    pub fn new(table: impl Into<String>) -> Insert {
        Insert {
            table: table.into(),
            ..Insert::default()
        }
    }

    pub fn columns<I>(mut self, columns: I) -> Insert
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add a row of values.
    pub fn values(mut self, values: impl IntoIterator<Item = Value>) -> Insert {
        self.rows.push(values.into_iter().collect());
        self
    }

    pub fn returning<I>(mut self, columns: I) -> Insert
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }
}

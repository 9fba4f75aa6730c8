use super::{predicate::Where, Comma, Formatter, ToSql};
use crate::stmt::{Delete, Insert, Select, Statement, Update};

use recordkit_core::{Error, Result};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::invalid_statement("SELECT has no columns"));
        }

        fmt!(f, "SELECT ", Comma(&self.columns));

        if let Some(from) = &self.from {
            fmt!(f, " FROM ", from);
        }

        for join in &self.joins {
            fmt!(f, " ", join);
        }

        fmt!(f, Where(&self.filter));

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(&self.group_by));
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY ", Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT ", limit);
        }

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET ", offset);
        }

        if let Some(suffix) = &self.suffix {
            fmt!(f, " ", suffix);
        }

        Ok(())
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, "INSERT INTO ", &self.table);

        if self.columns.is_empty() {
            if self.rows.iter().any(|row| !row.is_empty()) {
                return Err(Error::invalid_statement("INSERT has values but no columns"));
            }

            if f.serializer.capability().default_values {
                fmt!(f, " DEFAULT VALUES");
            } else {
                fmt!(f, " () VALUES ()");
            }
        } else {
            if self.rows.is_empty() {
                return Err(Error::invalid_statement("INSERT has columns but no values"));
            }

            fmt!(f, " (", Comma(&self.columns), ") VALUES ");

            let mut s = "";
            for row in &self.rows {
                if row.len() != self.columns.len() {
                    return Err(Error::invalid_statement(format!(
                        "INSERT into `{}` has {} columns but a row of {} values",
                        self.table,
                        self.columns.len(),
                        row.len()
                    )));
                }

                fmt!(f, s, "(", Comma(row), ")");
                s = ", ";
            }
        }

        if !self.returning.is_empty() {
            fmt!(f, " RETURNING ", Comma(&self.returning));
        }

        Ok(())
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        if self.assignments.is_empty() {
            return Err(Error::invalid_statement(format!(
                "UPDATE of `{}` sets no columns",
                self.table
            )));
        }

        fmt!(f, "UPDATE ", &self.table, " SET ");

        let mut s = "";
        for (column, value) in &self.assignments {
            fmt!(f, s, column, " = ", value);
            s = ", ";
        }

        fmt!(f, Where(&self.filter));
        Ok(())
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, "DELETE FROM ", &self.table, Where(&self.filter));
        Ok(())
    }
}

use super::{Formatter, ToSql};

use recordkit_core::{driver::Placeholder as Style, Result, Value};

/// 1-based position of a parameter in the statement.
pub(super) struct Placeholder(pub(super) usize);

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match f.serializer.capability().placeholder {
            Style::Question => f.dst.push('?'),
            Style::Dollar => {
                f.dst.push('$');
                f.dst.push_str(&self.0.to_string());
            }
        }
        Ok(())
    }
}

impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let placeholder = f.param(self);
        placeholder.to_sql(f)
    }
}

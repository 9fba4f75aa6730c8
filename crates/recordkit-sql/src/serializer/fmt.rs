use super::Formatter;

use recordkit_core::Result;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr ),* $(,)?) => {{
        $(
            $fragments.to_sql($f)?;
        )*
    }};
}

pub(super) trait ToSql {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()>;
}

impl ToSql for &str {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push_str(self);
        Ok(())
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        self.as_str().to_sql(f)
    }
}

impl ToSql for u64 {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push_str(&self.to_string());
        Ok(())
    }
}

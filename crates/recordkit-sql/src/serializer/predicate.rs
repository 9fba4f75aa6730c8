use super::{Formatter, ToSql};
use crate::stmt::Predicate;

use recordkit_core::{Error, Result, Value};

/// ` WHERE <predicate>`, or nothing when the predicate is absent or empty.
pub(super) struct Where<'a>(pub(super) &'a Option<Predicate>);

impl ToSql for Where<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self.0 {
            Some(pred) if !pred.is_empty() => {
                fmt!(f, " WHERE ", pred);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl ToSql for &Predicate {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Predicate::Eq(map) => {
                let mut s = "";
                for (column, value) in map {
                    fmt!(f, s, column);
                    if value.is_null() {
                        fmt!(f, " IS NULL");
                    } else {
                        fmt!(f, " = ", value);
                    }
                    s = " AND ";
                }
            }
            Predicate::Sql { sql, args } => raw(f, sql, args)?,
            Predicate::And(preds) => {
                let parts: Vec<_> = preds.iter().filter(|pred| !pred.is_empty()).collect();
                let wrap = parts.len() > 1;

                let mut s = "";
                for pred in parts {
                    fmt!(f, s);
                    if wrap && matches!(pred, Predicate::Sql { .. }) {
                        fmt!(f, "(", pred, ")");
                    } else {
                        fmt!(f, pred);
                    }
                    s = " AND ";
                }
            }
        }
        Ok(())
    }
}

/// Copy raw SQL, replacing each `?` with the flavor's placeholder for the
/// next argument.
fn raw(f: &mut Formatter<'_>, sql: &str, args: &[Value]) -> Result<()> {
    let mut args = args.iter();
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '?' {
            f.dst.push(ch);
            continue;
        }

        if chars.peek() == Some(&'?') {
            chars.next();
            f.dst.push('?');
            continue;
        }

        let Some(arg) = args.next() else {
            return Err(Error::invalid_statement(format!(
                "more `?` markers than arguments in `{sql}`"
            )));
        };
        fmt!(f, arg);
    }

    if args.next().is_some() {
        return Err(Error::invalid_statement(format!(
            "more arguments than `?` markers in `{sql}`"
        )));
    }

    Ok(())
}

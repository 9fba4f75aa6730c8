use crate::{schema::Kind, Error, Result, Value};

use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Serialize};

/// A struct field that can be stored in a column.
///
/// Implementations convert the field to a [`Value`] for writes and load a
/// scanned [`Value`] back into the field for reads. Loading is lenient in the
/// same way a driver scan is: integers load into booleans, numbers into
/// strings, and text into timestamps or JSON lists.
pub trait FieldValue {
    /// Semantic kind of the field, used to derive its column type.
    fn kind() -> Kind
    where
        Self: Sized;

    /// The value written for this field by INSERT, UPDATE and key predicates.
    fn to_value(&self) -> Result<Value>;

    /// Overwrite the field with a scanned value.
    fn load(&mut self, value: Value) -> Result<()>;

    /// True when this is an optional field that currently holds nothing.
    ///
    /// Such fields are left out of INSERT and UPDATE column lists.
    fn is_null(&self) -> bool {
        false
    }

    /// Make sure a scan destination exists.
    ///
    /// Optional fields allocate their zero value here.
    fn prepare(&mut self) {}
}

macro_rules! impl_integer {
    ($kind:ident => $($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> Kind {
                    Kind::$kind
                }

                #[allow(clippy::useless_conversion)]
                fn to_value(&self) -> Result<Value> {
                    i64::try_from(*self)
                        .map(Value::I64)
                        .map_err(|_| Error::type_conversion(Value::String(self.to_string()), "i64"))
                }

                fn load(&mut self, value: Value) -> Result<()> {
                    *self = match value {
                        Value::I64(v) => <$ty>::try_from(v)
                            .map_err(|_| Error::type_conversion(value, stringify!($ty)))?,
                        Value::Bool(v) => v as $ty,
                        Value::String(ref v) => match v.trim().parse::<$ty>() {
                            Ok(v) => v,
                            Err(_) => return Err(Error::type_conversion(value, stringify!($ty))),
                        },
                        value => return Err(Error::type_conversion(value, stringify!($ty))),
                    };
                    Ok(())
                }
            }
        )*
    };
}

impl_integer!(Int => i8, i16, i32, u8, u16, u32, isize, usize);
impl_integer!(BigInt => i64);

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> Kind {
                    Kind::Float
                }

                fn to_value(&self) -> Result<Value> {
                    Ok(Value::F64(*self as f64))
                }

                fn load(&mut self, value: Value) -> Result<()> {
                    *self = match value {
                        Value::F64(v) => v as $ty,
                        Value::I64(v) => v as $ty,
                        Value::String(ref v) => match v.trim().parse::<$ty>() {
                            Ok(v) => v,
                            Err(_) => return Err(Error::type_conversion(value, stringify!($ty))),
                        },
                        value => return Err(Error::type_conversion(value, stringify!($ty))),
                    };
                    Ok(())
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl FieldValue for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    fn load(&mut self, value: Value) -> Result<()> {
        *self = match value {
            Value::Bool(v) => v,
            Value::I64(v) => v != 0,
            Value::String(ref v) => match v.as_str() {
                "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
                "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
                _ => return Err(Error::type_conversion(value, "bool")),
            },
            value => return Err(Error::type_conversion(value, "bool")),
        };
        Ok(())
    }
}

impl FieldValue for String {
    fn kind() -> Kind {
        Kind::Text
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn load(&mut self, value: Value) -> Result<()> {
        *self = match value {
            Value::String(v) => v,
            Value::Bytes(v) => match String::from_utf8(v) {
                Ok(v) => v,
                Err(err) => {
                    return Err(Error::type_conversion(
                        Value::Bytes(err.into_bytes()),
                        "String",
                    ))
                }
            },
            Value::I64(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Timestamp(v) => v.format(crate::types::DATETIME_LAYOUT).to_string(),
            Value::Json(v) => v.to_string(),
            value => return Err(Error::type_conversion(value, "String")),
        };
        Ok(())
    }
}

impl FieldValue for NaiveDateTime {
    fn kind() -> Kind {
        Kind::Timestamp
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::Timestamp(*self))
    }

    fn load(&mut self, value: Value) -> Result<()> {
        *self = match value {
            Value::Timestamp(v) => v,
            Value::String(v) => parse_timestamp(&v)?,
            value => return Err(Error::type_conversion(value, "NaiveDateTime")),
        };
        Ok(())
    }
}

/// Sequences are stored as a JSON array in a single column.
impl<T> FieldValue for Vec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn to_value(&self) -> Result<Value> {
        Ok(Value::Json(serde_json::to_value(self)?))
    }

    fn load(&mut self, value: Value) -> Result<()> {
        *self = load_json_list(value)?;
        Ok(())
    }
}

/// Optional fields behave like nullable pointers: absent values are skipped
/// on write and allocated before a scan.
impl<T> FieldValue for Option<T>
where
    T: FieldValue + Default,
{
    fn kind() -> Kind {
        T::kind()
    }

    fn to_value(&self) -> Result<Value> {
        match self {
            Some(value) => value.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn load(&mut self, value: Value) -> Result<()> {
        if value.is_null() {
            *self = None;
            return Ok(());
        }

        self.get_or_insert_with(T::default).load(value)
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn prepare(&mut self) {
        self.get_or_insert_with(T::default);
    }
}

/// Decode a JSON list column; NULL decodes as an empty list.
pub(crate) fn load_json_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Json(v) => serde_json::from_value(v)?,
        Value::String(v) => serde_json::from_str(&v)?,
        Value::Bytes(v) => serde_json::from_slice(&v)?,
        value => return Err(Error::type_conversion(value, "json list")),
    })
}

/// Parse a timestamp as written by the drivers or by hand.
pub(crate) fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    for layout in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(ts);
        }
    }

    let date = chrono::NaiveDate::parse_from_str(text, crate::types::DATE_LAYOUT)?;
    Ok(date.and_time(chrono::NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_layouts() {
        let ts = parse_timestamp("2024-03-05 10:11:12").unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 10:11:12");

        let ts = parse_timestamp("2024-03-05 10:11:12.250").unwrap();
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);

        let ts = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 00:00:00");

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn unsigned_values_beyond_i64_are_rejected() {
        assert_eq!(42usize.to_value().unwrap(), Value::I64(42));
        assert_eq!(u32::MAX.to_value().unwrap(), Value::I64(u32::MAX as i64));

        let err = usize::MAX.to_value().unwrap_err();
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert string value to i64");
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres::{
    types::{private::BytesMut, to_sql_checked, IsNull, ToSql, Type},
    Row,
};
use recordkit_core::{err, Error, Result, Value as CoreValue};
use rust_decimal::{prelude::ToPrimitive, Decimal};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Decodes column `index` of `row` according to the column's type.
    pub fn from_sql(row: &Row, index: usize) -> Result<Self> {
        let ty = row.columns()[index].type_().clone();

        fn get<'a, T>(row: &'a Row, index: usize) -> Result<Option<T>>
        where
            T: postgres::types::FromSql<'a>,
        {
            row.try_get(index).map_err(Error::driver_operation_failed)
        }

        let core_value = match ty {
            Type::BOOL => get::<bool>(row, index)?.map(CoreValue::Bool),
            Type::INT2 => get::<i16>(row, index)?.map(CoreValue::from),
            Type::INT4 => get::<i32>(row, index)?.map(CoreValue::from),
            Type::INT8 => get::<i64>(row, index)?.map(CoreValue::I64),
            Type::FLOAT4 => get::<f32>(row, index)?.map(CoreValue::from),
            Type::FLOAT8 => get::<f64>(row, index)?.map(CoreValue::F64),
            Type::NUMERIC => match get::<Decimal>(row, index)? {
                Some(value) => Some(CoreValue::F64(value.to_f64().ok_or_else(|| {
                    err!("numeric value {value} does not fit in f64")
                })?)),
                None => None,
            },
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                get::<String>(row, index)?.map(CoreValue::String)
            }
            Type::BYTEA => get::<Vec<u8>>(row, index)?.map(CoreValue::Bytes),
            Type::TIMESTAMP => get::<NaiveDateTime>(row, index)?.map(CoreValue::Timestamp),
            Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, index)?
                .map(|value| CoreValue::Timestamp(value.naive_utc())),
            Type::DATE => get::<NaiveDate>(row, index)?
                .map(|value| CoreValue::Timestamp(value.and_time(NaiveTime::MIN))),
            Type::JSON | Type::JSONB => get::<serde_json::Value>(row, index)?.map(CoreValue::Json),
            ty => {
                return Err(err!(
                    "unsupported column type `{ty}` for column `{}`",
                    row.columns()[index].name()
                ))
            }
        };

        Ok(Value(core_value.unwrap_or(CoreValue::Null)))
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => match *ty {
                Type::INT2 | Type::INT4 | Type::INT8 => {
                    Value(CoreValue::I64(*value as i64)).to_sql(ty, out)
                }
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::I64(value) => match *ty {
                Type::BOOL => (*value != 0).to_sql(ty, out),
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::String(value) => match *ty {
                Type::JSON | Type::JSONB => {
                    serde_json::from_str::<serde_json::Value>(value)?.to_sql(ty, out)
                }
                _ => value.to_sql(ty, out),
            },
            CoreValue::Bytes(value) => value.to_sql(ty, out),
            CoreValue::Timestamp(value) => match *ty {
                Type::TIMESTAMPTZ => value.and_utc().to_sql(ty, out),
                Type::DATE => value.date().to_sql(ty, out),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value
                    .format(recordkit_core::types::DATETIME_LAYOUT)
                    .to_string()
                    .to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
            CoreValue::Json(value) => match *ty {
                Type::TEXT | Type::VARCHAR | Type::BPCHAR => value.to_string().to_sql(ty, out),
                _ => value.to_sql(ty, out),
            },
        }
    }

    /// The target column type decides the encoding; mismatches are reported
    /// by `to_sql`.
    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

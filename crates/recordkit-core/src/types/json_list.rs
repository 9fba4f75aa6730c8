use crate::{field_value::load_json_list, schema::Kind, FieldValue, Result, Value};

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

macro_rules! json_list {
    ($(#[$meta:meta])* $name:ident($item:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec<$item>);

        impl FieldValue for $name {
            fn kind() -> Kind {
                Kind::Sequence
            }

            fn to_value(&self) -> Result<Value> {
                Ok(Value::Json(serde_json::to_value(&self.0)?))
            }

            fn load(&mut self, value: Value) -> Result<()> {
                self.0 = load_json_list(value)?;
                Ok(())
            }
        }

        impl Deref for $name {
            type Target = Vec<$item>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                $name(items)
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self {
                $name(iter.into_iter().collect())
            }
        }
    };
}

json_list! {
    /// A list of strings stored as a JSON array.
    Strings(String)
}

json_list! {
    /// A list of 64-bit integers stored as a JSON array.
    Int64s(i64)
}

use crate::{
    types::{NullTime, Time},
    Record,
};

use serde::{Deserialize, Serialize};

/// Standard audit columns, embedded into a record with a `model: Model`
/// field.
///
/// ```
/// use recordkit::{Model, Record};
///
/// #[derive(Debug, Default, Record)]
/// struct User {
///     model: Model,
///
///     #[orm("name", length = 50)]
///     name: String,
/// }
///
/// let columns: Vec<_> = User::descriptors()
///     .fields()
///     .iter()
///     .map(|field| field.column.as_str())
///     .collect();
/// assert_eq!(columns, ["id", "created_at", "updated_at", "deleted", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Record, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[orm("id,PRIMARY_KEY,AUTO_INCREMENT")]
    pub id: i64,

    #[orm("created_at", comment = "creation time")]
    pub created_at: Time,

    #[orm("updated_at,NULL", comment = "last update time")]
    pub updated_at: Time,

    #[serde(skip)]
    #[orm("deleted", comment = "soft deleted")]
    pub deleted: bool,

    /// Not mapped to a column
    #[serde(skip)]
    pub deleted_at: NullTime,
}

use super::Kind;

/// Column type used for text fields with no explicit default.
const DEFAULT_TEXT_SUFFIX: &str = "default '' not null";

/// Map a field kind to its column type fragment.
///
/// `length` and `default` only apply to text columns; `is_null` only to
/// timestamps.
pub fn column_type(kind: Kind, length: Option<&str>, default: Option<&str>, is_null: bool) -> String {
    match kind {
        Kind::Int => "int default 0".to_string(),
        Kind::BigInt => "bigint default 0".to_string(),
        Kind::Float => "decimal(12,4) default 0.00".to_string(),
        Kind::Text => {
            let length = length.filter(|l| !l.is_empty()).unwrap_or("255");
            let default = default.filter(|d| !d.is_empty()).unwrap_or(DEFAULT_TEXT_SUFFIX);
            format!("varchar({length}) {default}")
        }
        Kind::Sequence => "json".to_string(),
        Kind::Bool => "boolean default false not null".to_string(),
        Kind::Timestamp if is_null => "datetime null".to_string(),
        Kind::Timestamp => "datetime default now()".to_string(),
        Kind::Other => "varchar(255)".to_string(),
    }
}

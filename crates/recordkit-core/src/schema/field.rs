use super::{column_type, Diagnostic, Kind};

use heck::ToSnakeCase;

/// Raw declaration of one mapped field, as written on the struct.
///
/// `#[derive(Record)]` emits one of these per field; hand-written `Record`
/// impls build them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Struct field name
    pub name: &'static str,

    /// Semantic kind of the field's type
    pub kind: Kind,

    /// Comma separated annotation: `column[,PRIMARY_KEY][,AUTO_INCREMENT][,UNIQUE][,NULL]`
    pub tag: &'static str,

    /// Verbatim column type, bypassing the type mapper
    pub column_definition: Option<&'static str>,

    /// Display length for text columns
    pub length: Option<&'static str>,

    /// Default-value fragment for text columns
    pub default: Option<&'static str>,

    /// Human readable column comment
    pub comment: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: Kind) -> FieldDef {
        FieldDef {
            name,
            kind,
            tag: "",
            column_definition: None,
            length: None,
            default: None,
            comment: None,
        }
    }

    pub const fn tag(mut self, tag: &'static str) -> FieldDef {
        self.tag = tag;
        self
    }

    pub const fn column_definition(mut self, definition: &'static str) -> FieldDef {
        self.column_definition = Some(definition);
        self
    }

    pub const fn length(mut self, length: &'static str) -> FieldDef {
        self.length = Some(length);
        self
    }

    pub const fn default_value(mut self, default: &'static str) -> FieldDef {
        self.default = Some(default);
        self
    }

    pub const fn comment(mut self, comment: &'static str) -> FieldDef {
        self.comment = Some(comment);
        self
    }
}

/// A mapped field and the column it is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Struct field name
    pub name: String,

    /// Table column name
    pub column: String,

    /// Full column type fragment, e.g. `varchar(255) default '' not null`
    pub column_type: String,

    pub length: Option<String>,
    pub comment: String,
    pub default_val: Option<String>,

    pub kind: Kind,

    /// Part of the primary key
    pub is_key: bool,

    /// Value generated by the database on insert
    pub is_auto: bool,

    pub is_unique: bool,

    /// Column accepts NULL
    pub is_null: bool,
}

impl Field {
    /// Parse a field declaration.
    ///
    /// Never fails: an empty column name falls back to the snake-cased field
    /// name and unknown tokens are ignored. Each fallback is pushed onto
    /// `diagnostics`.
    pub fn from_def(def: &FieldDef, diagnostics: &mut Vec<Diagnostic>) -> Field {
        let mut parts = def.tag.split(',').map(str::trim);

        let mut field = Field {
            name: def.name.to_string(),
            column: String::new(),
            column_type: String::new(),
            length: def.length.map(str::to_string),
            comment: def.comment.unwrap_or_default().to_string(),
            default_val: def.default.map(str::to_string),
            kind: def.kind,
            is_key: false,
            is_auto: false,
            is_unique: false,
            is_null: false,
        };

        match parts.next() {
            Some(column) if !column.is_empty() => field.column = column.to_string(),
            _ => {
                field.column = default_column_name(def.name);
                if !def.tag.trim().is_empty() {
                    diagnostics.push(Diagnostic::new(
                        def.name,
                        format!(
                            "annotation `{}` has no column name; using `{}`",
                            def.tag, field.column
                        ),
                    ));
                }
            }
        }

        for part in parts {
            match part {
                "PRIMARY_KEY" | "PRIMARY KEY" => field.is_key = true,
                "AUTO_INCREMENT" | "SERIAL" | "AUTO INCREMENT" => field.is_auto = true,
                "UNIQUE" => field.is_unique = true,
                "NULL" => field.is_null = true,
                "" => {}
                token => diagnostics.push(Diagnostic::new(
                    def.name,
                    format!("unrecognized annotation token `{token}` ignored"),
                )),
            }
        }

        field.column_type = match def.column_definition {
            Some(definition) if !definition.is_empty() => definition.to_string(),
            _ => column_type(def.kind, def.length, def.default, field.is_null),
        };

        field
    }
}

/// Column name used when the annotation does not name one.
pub(crate) fn default_column_name(field_name: &str) -> String {
    field_name.trim_start_matches("r#").to_snake_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_column_name_is_snake_case() {
        assert_eq!(default_column_name("CreatedAt"), "created_at");
        assert_eq!(default_column_name("user_name"), "user_name");
        assert_eq!(default_column_name("r#type"), "type");
    }
}

use super::Descriptors;

/// Column definition used for the surrogate id column.
const ID_COLUMN: &str = "id bigint unique auto_increment primary key";

const ENGINE_CHARSET: &str = "ENGINE = InnoDB DEFAULT CHARSET = utf8mb4;";

impl Descriptors {
    /// Render a best-effort `CREATE TABLE` statement for these fields.
    ///
    /// The output is MySQL flavored whatever database the record is used
    /// with. A field named `id`, or any auto-increment key, is rendered as a
    /// 64-bit auto-increment primary key.
    pub fn create_table(&self, table: &str) -> String {
        let columns: Vec<String> = self
            .fields()
            .iter()
            .filter(|field| !field.column.is_empty())
            .map(|field| {
                if field.name.eq_ignore_ascii_case("id") || (field.is_key && field.is_auto) {
                    ID_COLUMN.to_string()
                } else {
                    let unique = if field.is_unique { " UNIQUE" } else { "" };
                    format!(
                        "{} {}{} comment '{}'",
                        field.column, field.column_type, unique, field.comment
                    )
                }
            })
            .collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({}) {}",
            table,
            columns.join(",\n"),
            ENGINE_CHARSET
        )
    }
}

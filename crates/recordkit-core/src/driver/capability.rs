/// What a SQL dialect supports, consulted when rendering and running
/// statements.
#[derive(Debug)]
pub struct Capability {
    /// How positional parameters are written.
    pub placeholder: Placeholder,

    /// INSERT can return the stored row with `RETURNING`. When set, inserts
    /// refresh every field from the returned row in the same round trip.
    pub insert_returning: bool,

    /// The driver reports the id generated by the last INSERT.
    pub last_insert_id: bool,

    /// An INSERT without columns is written `DEFAULT VALUES`.
    pub default_values: bool,
}

/// Placeholder style for positional parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`
    Question,

    /// `$1`, `$2`, ...
    Dollar,
}

impl Capability {
    /// MySQL capabilities.
    pub const MYSQL: Self = Self {
        placeholder: Placeholder::Question,
        insert_returning: false,
        last_insert_id: true,
        default_values: false,
    };

    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        default_values: true,
        ..Self::MYSQL
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        placeholder: Placeholder::Dollar,
        insert_returning: true,
        last_insert_id: false,
        default_values: true,
    };
}

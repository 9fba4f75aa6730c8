use super::Capability;

/// SQL dialect of the connected database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    Mysql,
    Postgresql,
    Sqlite,
}

impl Flavor {
    /// Parse a dialect name.
    ///
    /// `postgres` and `postgresql` select Postgres, `sqlite` selects SQLite,
    /// and anything else falls back to MySQL.
    pub fn from_name(name: &str) -> Flavor {
        match name.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Flavor::Postgresql,
            "sqlite" | "sqlite3" => Flavor::Sqlite,
            _ => Flavor::Mysql,
        }
    }

    pub fn capability(self) -> &'static Capability {
        match self {
            Flavor::Mysql => &Capability::MYSQL,
            Flavor::Postgresql => &Capability::POSTGRESQL,
            Flavor::Sqlite => &Capability::SQLITE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Flavor::Mysql => "mysql",
            Flavor::Postgresql => "postgresql",
            Flavor::Sqlite => "sqlite",
        }
    }
}

impl core::fmt::Display for Flavor {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

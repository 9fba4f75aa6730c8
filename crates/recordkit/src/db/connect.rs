use super::Db;
use crate::{Error, Result};

use url::Url;

pub(super) fn connect(url: &str) -> Result<Db> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "postgresql" | "postgres" => connect_postgresql(url),
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "postgresql")]
fn connect_postgresql(url: &str) -> Result<Db> {
    let driver = recordkit_driver_postgresql::PostgreSql::connect(url)?;
    Ok(Db::new(driver))
}

#[cfg(not(feature = "postgresql"))]
fn connect_postgresql(_url: &str) -> Result<Db> {
    Err(Error::invalid_connection_url(
        "`postgresql` feature not enabled",
    ))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Db> {
    let driver = recordkit_driver_sqlite::Sqlite::new(url)?;
    Ok(Db::new(driver))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Db> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}

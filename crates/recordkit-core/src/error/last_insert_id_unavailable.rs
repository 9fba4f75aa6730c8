use super::Error;

/// Error when the driver did not report the id generated by an INSERT.
///
/// This usually means the configured flavor does not match the database:
/// a Postgres connection used with the last-insert-id strategy, for example.
#[derive(Debug)]
pub(super) struct LastInsertIdUnavailable {
    field: Box<str>,
}

impl std::error::Error for LastInsertIdUnavailable {}

impl core::fmt::Display for LastInsertIdUnavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "could not get last insert id for `{}`; is the database flavor set correctly?",
            self.field
        )
    }
}

impl Error {
    pub fn last_insert_id_unavailable(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::LastInsertIdUnavailable(
            LastInsertIdUnavailable {
                field: field.into().into(),
            },
        ))
    }

    pub fn is_last_insert_id_unavailable(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::LastInsertIdUnavailable(_))
    }
}

use super::Error;

/// Error when a single-row query returns no rows.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    pub(super) context: Option<Box<str>>,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no rows in result set")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    pub fn record_not_found(context: Option<&str>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            context: context.map(Into::into),
        }))
    }

    /// Returns `true` if a single-row load matched nothing.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotFound(_))
    }
}

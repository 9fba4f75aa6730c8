use super::Error;

/// Error when a generated identifier cannot be written back into a field.
#[derive(Debug)]
pub(super) struct FieldNotSettable {
    field: Box<str>,
}

impl std::error::Error for FieldNotSettable {}

impl core::fmt::Display for FieldNotSettable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "could not set field `{}` to the generated value",
            self.field
        )
    }
}

impl Error {
    /// Creates an error naming the field that refused an auto-increment value.
    pub fn field_not_settable(field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::FieldNotSettable(FieldNotSettable {
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a field-not-settable error.
    pub fn is_field_not_settable(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FieldNotSettable(_))
    }
}

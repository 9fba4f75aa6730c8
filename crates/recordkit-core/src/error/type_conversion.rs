use super::Error;
use crate::Value;

/// Error when a scanned value cannot be converted to the field's type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    pub(super) value: Value,
    pub(super) to_type: &'static str,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot convert {} value to {}",
            self.value.type_name(),
            self.to_type
        )
    }
}

impl Error {
    pub fn type_conversion(value: Value, to_type: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type,
        }))
    }

    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }
}

use super::Error;

/// Error when class-level metadata is invalid: an unknown strategy token, a
/// version field that does not exist, conflicting storage modes.
#[derive(Debug)]
pub(super) struct InvalidMetaData {
    class: Box<str>,
    message: Box<str>,
}

impl InvalidMetaData {
    pub(super) fn class(&self) -> &str {
        &self.class
    }
}

impl std::error::Error for InvalidMetaData {}

impl core::fmt::Display for InvalidMetaData {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid metadata for class `{}`: {}",
            self.class, self.message
        )
    }
}

impl Error {
    /// Creates an invalid metadata error attributed to `class`.
    pub fn invalid_metadata(class: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMetaData(InvalidMetaData {
            class: class.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a class-level invalid metadata error.
    pub fn is_invalid_metadata(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidMetaData(_))
    }
}

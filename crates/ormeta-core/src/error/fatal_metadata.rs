use super::Error;

/// Error when the shape of the descriptor tree itself is wrong, such as a
/// `key` or `value` block on a member that has no `map` block.
#[derive(Debug)]
pub(super) struct FatalMetaData {
    class: Box<str>,
    member: Box<str>,
    message: Box<str>,
}

impl FatalMetaData {
    pub(super) fn class(&self) -> &str {
        &self.class
    }

    pub(super) fn member(&self) -> &str {
        &self.member
    }
}

impl std::error::Error for FatalMetaData {}

impl core::fmt::Display for FatalMetaData {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "fatal metadata error for member `{}.{}`: {}",
            self.class, self.member, self.message
        )
    }
}

impl Error {
    /// Creates a fatal metadata error attributed to `class.member`.
    pub fn fatal_metadata(
        class: impl Into<String>,
        member: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::FatalMetaData(FatalMetaData {
            class: class.into().into(),
            member: member.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a fatal metadata error.
    pub fn is_fatal_metadata(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::FatalMetaData(_))
    }
}

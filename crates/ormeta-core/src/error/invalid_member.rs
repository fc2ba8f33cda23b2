use super::Error;

/// Error when the descriptors declared for one member of a class cannot be
/// made consistent.
///
/// This occurs when:
/// - A container element, key or value type cannot be resolved
/// - An element type lists several candidates without choosing implementations
/// - An embedded definition targets an interface or the top type
/// - An ordering clause names a missing field or an unknown direction
/// - A member-level join names a table
///
/// A class with one invalid member is wholly invalid.
#[derive(Debug)]
pub(super) struct InvalidMember {
    class: Box<str>,
    member: Box<str>,
    message: Box<str>,
}

impl InvalidMember {
    pub(super) fn class(&self) -> &str {
        &self.class
    }

    pub(super) fn member(&self) -> &str {
        &self.member
    }
}

impl std::error::Error for InvalidMember {}

impl core::fmt::Display for InvalidMember {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid metadata for member `{}.{}`: {}",
            self.class, self.member, self.message
        )
    }
}

impl Error {
    /// Creates an invalid member metadata error attributed to `class.member`.
    pub fn invalid_member(
        class: impl Into<String>,
        member: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidMember(InvalidMember {
            class: class.into().into(),
            member: member.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid member metadata error.
    pub fn is_invalid_member(&self) -> bool {
        matches!(self.root().kind(), super::ErrorKind::InvalidMember(_))
    }
}

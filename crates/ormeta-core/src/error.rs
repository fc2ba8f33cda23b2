mod adhoc;
mod fatal_metadata;
mod invalid_member;
mod invalid_metadata;

use adhoc::AdhocError;
use fatal_metadata::FatalMetaData;
use invalid_member::InvalidMember;
use invalid_metadata::InvalidMetaData;
use std::sync::Arc;

/// Returns early with an ad-hoc [`Error`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while populating or initialising mapping descriptors.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn root(&self) -> &Error {
        self.chain().last().unwrap()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }

    /// Returns `true` if the root cause is structural, i.e. the declared
    /// descriptors cannot be made consistent.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.root().kind(),
            ErrorKind::InvalidMember(_) | ErrorKind::InvalidMetaData(_) | ErrorKind::FatalMetaData(_)
        )
    }

    /// The class the root cause is attributed to, if any.
    pub fn class_name(&self) -> Option<&str> {
        match self.root().kind() {
            ErrorKind::InvalidMember(err) => Some(err.class()),
            ErrorKind::InvalidMetaData(err) => Some(err.class()),
            ErrorKind::FatalMetaData(err) => Some(err.class()),
            _ => None,
        }
    }

    /// The member the root cause is attributed to, if any.
    pub fn member_name(&self) -> Option<&str> {
        match self.root().kind() {
            ErrorKind::InvalidMember(err) => Some(err.member()),
            ErrorKind::FatalMetaData(err) => Some(err.member()),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidMember(InvalidMember),
    InvalidMetaData(InvalidMetaData),
    FatalMetaData(FatalMetaData),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidMember(err) => core::fmt::Display::fmt(err, f),
            InvalidMetaData(err) => core::fmt::Display::fmt(err, f),
            FatalMetaData(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown ormeta error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_chain_display() {
        let root = Error::invalid_member("shop.Order", "items", "element type is ambiguous");
        let top = err!("failed to populate class `shop.Order`");

        let chained = root.context(top);
        assert_eq!(
            chained.to_string(),
            "failed to populate class `shop.Order`: invalid metadata for member `shop.Order.items`: element type is ambiguous"
        );
        assert!(chained.is_structural());
        assert_eq!(chained.class_name(), Some("shop.Order"));
        assert_eq!(chained.member_name(), Some("items"));
    }

    #[test]
    fn invalid_metadata_has_no_member() {
        let err = Error::invalid_metadata("shop.Order", "unknown version strategy `sometimes`");
        assert_eq!(
            err.to_string(),
            "invalid metadata for class `shop.Order`: unknown version strategy `sometimes`"
        );
        assert!(err.is_invalid_metadata());
        assert_eq!(err.member_name(), None);
    }

    #[test]
    fn fatal_metadata_display() {
        let err = Error::fatal_metadata("shop.Order", "lines", "`value` block requires a `map` block");
        assert!(err.is_fatal_metadata());
        assert_eq!(
            err.to_string(),
            "fatal metadata error for member `shop.Order.lines`: `value` block requires a `map` block"
        );
    }

    #[test]
    fn anyhow_bridge() {
        let our_err: Error = anyhow::anyhow!("scanner failed").into();
        assert_eq!(our_err.to_string(), "scanner failed");
        assert!(!our_err.is_structural());
    }
}

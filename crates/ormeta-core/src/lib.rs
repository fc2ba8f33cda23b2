mod error;
pub use error::{Error, IntoError};

pub mod meta;
pub use meta::{Builder, ClassMetaData, MemberMetaData};

/// A Result type alias that uses ormeta's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

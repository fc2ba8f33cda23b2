use crate::{Error, Result};

use std::fmt;

/// A strategy that is either one of a closed vocabulary or a custom,
/// plugin-provided name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy<K> {
    Known(K),
    Custom(String),
}

/// A closed set of strategy tokens.
pub trait Vocabulary: Copy + PartialEq + fmt::Debug + 'static {
    /// Used in diagnostics: "unknown `WHAT` strategy".
    const WHAT: &'static str;

    /// Every member with its canonical token.
    const TOKENS: &'static [(&'static str, Self)];

    fn token(self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, value)| *value == self)
            .map(|(token, _)| *token)
            .unwrap_or("?")
    }
}

impl<K: Vocabulary> Strategy<K> {
    /// Parses a known token. Case is ignored and `_` matches `-`.
    pub fn parse(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_lowercase().replace('_', "-");
        K::TOKENS
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, value)| Strategy::Known(*value))
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Strategy::Custom(name.into())
    }

    pub fn known(&self) -> Option<K> {
        match self {
            Strategy::Known(value) => Some(*value),
            Strategy::Custom(_) => None,
        }
    }

    pub fn is(&self, value: K) -> bool {
        self.known() == Some(value)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Strategy::Custom(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Strategy::Known(value) => value.token(),
            Strategy::Custom(name) => name,
        }
    }
}

impl<K> From<K> for Strategy<K> {
    fn from(value: K) -> Self {
        Strategy::Known(value)
    }
}

impl<K: Vocabulary> fmt::Display for Strategy<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strategy slot on a descriptor.
///
/// Raw input may carry a token outside the vocabulary; it is remembered and
/// reported, with the owning class, when the descriptor is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StrategyField<K> {
    value: Option<Strategy<K>>,
    unknown: Option<String>,
}

impl<K> Default for StrategyField<K> {
    fn default() -> Self {
        Self {
            value: None,
            unknown: None,
        }
    }
}

impl<K: Vocabulary> StrategyField<K> {
    pub(crate) fn get(&self) -> Option<&Strategy<K>> {
        self.value.as_ref()
    }

    pub(crate) fn set(&mut self, value: Option<Strategy<K>>) {
        self.value = value;
        self.unknown = None;
    }

    pub(crate) fn set_name(&mut self, token: &str) {
        match std_util::str::non_blank(token) {
            None => self.set(None),
            Some(token) => match Strategy::parse(token) {
                Some(value) => self.set(Some(value)),
                None => {
                    self.value = None;
                    self.unknown = Some(token.to_string());
                }
            },
        }
    }

    pub(crate) fn check(&self, class: &str) -> Result<()> {
        match &self.unknown {
            Some(token) => Err(Error::invalid_metadata(
                class,
                format!("unknown {} strategy `{token}`", K::WHAT),
            )),
            None => Ok(()),
        }
    }
}

/// How identity values are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdentityStrategy {
    Native,
    Sequence,
    Identity,
    Increment,
    UuidString,
    UuidHex,
    Auid,
    Uuid,
}

impl Vocabulary for IdentityStrategy {
    const WHAT: &'static str = "identity";
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("native", Self::Native),
        ("sequence", Self::Sequence),
        ("identity", Self::Identity),
        ("increment", Self::Increment),
        ("uuid-string", Self::UuidString),
        ("uuid-hex", Self::UuidHex),
        ("auid", Self::Auid),
        ("uuid", Self::Uuid),
    ];
}

/// How the version of an object is tracked for optimistic checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VersionStrategy {
    None,
    StateImage,
    VersionNumber,
    DateTime,
}

impl Vocabulary for VersionStrategy {
    const WHAT: &'static str = "version";
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("none", Self::None),
        ("state-image", Self::StateImage),
        ("version-number", Self::VersionNumber),
        ("date-time", Self::DateTime),
    ];
}

/// How a row's discriminator value maps to a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscriminatorStrategy {
    None,
    ValueMap,
    ClassName,
    ValueMapEntityName,
}

impl Vocabulary for DiscriminatorStrategy {
    const WHAT: &'static str = "discriminator";
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("none", Self::None),
        ("value-map", Self::ValueMap),
        ("class-name", Self::ClassName),
        ("value-map-entity-name", Self::ValueMapEntityName),
    ];
}

/// Where the members of a class in an inheritance tree are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InheritanceStrategy {
    NewTable,
    SubclassTable,
    SuperclassTable,
    CompleteTable,
}

impl Vocabulary for InheritanceStrategy {
    const WHAT: &'static str = "inheritance";
    const TOKENS: &'static [(&'static str, Self)] = &[
        ("new-table", Self::NewTable),
        ("subclass-table", Self::SubclassTable),
        ("superclass-table", Self::SuperclassTable),
        ("complete-table", Self::CompleteTable),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_separator() {
        assert_eq!(
            Strategy::parse("VERSION_NUMBER"),
            Some(Strategy::Known(VersionStrategy::VersionNumber))
        );
        assert_eq!(
            Strategy::parse("value-map-entity-name"),
            Some(Strategy::Known(DiscriminatorStrategy::ValueMapEntityName))
        );
        assert_eq!(Strategy::<IdentityStrategy>::parse("sometimes"), None);
    }

    #[test]
    fn custom_strategy_keeps_its_name() {
        let strategy = Strategy::<IdentityStrategy>::custom("snowflake");
        assert!(strategy.is_custom());
        assert_eq!(strategy.known(), None);
        assert_eq!(strategy.to_string(), "snowflake");
        assert_eq!(Strategy::from(IdentityStrategy::UuidHex).to_string(), "uuid-hex");
    }

    #[test]
    fn unknown_token_reported_with_class() {
        let mut field = StrategyField::<VersionStrategy>::default();
        field.set_name("sometimes");
        assert_eq!(field.get(), None);

        let err = field.check("shop.Order").unwrap_err();
        assert!(err.is_invalid_metadata());
        assert!(err.to_string().contains("unknown version strategy `sometimes`"));

        field.set_name("date-time");
        assert!(field.check("shop.Order").is_ok());
        assert!(field.get().unwrap().is(VersionStrategy::DateTime));
    }
}

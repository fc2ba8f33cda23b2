use super::ConstraintMetaData;

use std::ops::{Deref, DerefMut};

/// An index over members or columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexMetaData {
    pub constraint: ConstraintMetaData,

    /// When `true`, indexed entries are unique
    pub unique: bool,
}

/// The `indexed` attribute found on columns-bearing descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexedValue {
    True,
    False,
    Unique,
}

impl IndexMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index over exactly `columns`.
    pub fn over_columns(columns: impl IntoIterator<Item = String>, unique: bool) -> Self {
        let mut index = Self {
            unique,
            ..Self::default()
        };
        for column in columns {
            index.constraint.add_column(column);
        }
        index
    }
}

impl IndexedValue {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "unique" => Some(Self::Unique),
            _ => None,
        }
    }

    pub fn is_indexed(self) -> bool {
        !matches!(self, Self::False)
    }

    /// Builds the index this flag asks for, if any.
    pub fn index_for(self, columns: Vec<String>) -> Option<IndexMetaData> {
        self.is_indexed()
            .then(|| IndexMetaData::over_columns(columns, self == Self::Unique))
    }
}

impl From<bool> for IndexedValue {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Deref for IndexMetaData {
    type Target = ConstraintMetaData;

    fn deref(&self) -> &ConstraintMetaData {
        &self.constraint
    }
}

impl DerefMut for IndexMetaData {
    fn deref_mut(&mut self) -> &mut ConstraintMetaData {
        &mut self.constraint
    }
}

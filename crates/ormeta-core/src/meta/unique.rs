use super::ConstraintMetaData;

use std::ops::{Deref, DerefMut};

/// A unique constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueMetaData {
    pub constraint: ConstraintMetaData,

    /// Checked at commit rather than per statement
    pub deferred: bool,
}

impl UniqueMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn over_columns(columns: impl IntoIterator<Item = String>) -> Self {
        let mut unique = Self::default();
        for column in columns {
            unique.constraint.add_column(column);
        }
        unique
    }
}

impl Deref for UniqueMetaData {
    type Target = ConstraintMetaData;

    fn deref(&self) -> &ConstraintMetaData {
        &self.constraint
    }
}

impl DerefMut for UniqueMetaData {
    fn deref_mut(&mut self) -> &mut ConstraintMetaData {
        &mut self.constraint
    }
}

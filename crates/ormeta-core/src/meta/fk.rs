use super::{ColumnMetaData, ConstraintMetaData};

use std::ops::{Deref, DerefMut};
use std_util::str;
use tracing::debug;

/// A foreign key.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKeyMetaData {
    pub constraint: ConstraintMetaData,

    /// Source columns. Each may name the `target` column it references.
    columns: Vec<ColumnMetaData>,

    pub unique: bool,

    pub deferred: bool,

    delete_action: Option<ForeignKeyAction>,

    update_action: Option<ForeignKeyAction>,

    /// Raw vendor DDL that replaces the generated constraint.
    fk_definition: Option<String>,
}

/// Referential action applied when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForeignKeyAction {
    Cascade,
    Restrict,
    Nullify,
    Default,
    None,
}

impl ForeignKeyMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: ColumnMetaData) -> &mut Self {
        if let Some(name) = &column.name {
            self.constraint.add_column(name.clone());
        }
        self.columns.push(column);
        self
    }

    pub fn columns(&self) -> &[ColumnMetaData] {
        &self.columns
    }

    pub fn delete_action(&self) -> Option<ForeignKeyAction> {
        self.delete_action
    }

    /// Ignored while a raw definition is set.
    pub fn set_delete_action(&mut self, action: Option<ForeignKeyAction>) -> &mut Self {
        if self.defers_to_definition(action) {
            return self;
        }
        self.delete_action = action;
        self
    }

    pub fn update_action(&self) -> Option<ForeignKeyAction> {
        self.update_action
    }

    /// Ignored while a raw definition is set.
    pub fn set_update_action(&mut self, action: Option<ForeignKeyAction>) -> &mut Self {
        if self.defers_to_definition(action) {
            return self;
        }
        self.update_action = action;
        self
    }

    fn defers_to_definition(&self, action: Option<ForeignKeyAction>) -> bool {
        match (&self.fk_definition, action) {
            (Some(definition), Some(action)) => {
                debug!(?action, definition = %definition, "foreign key has a raw definition; ignoring action");
                true
            }
            _ => false,
        }
    }

    pub fn fk_definition(&self) -> Option<&str> {
        self.fk_definition.as_deref()
    }

    /// Sets raw DDL for the constraint. A definition clears both actions,
    /// since it states them itself.
    pub fn set_fk_definition(&mut self, definition: &str) -> &mut Self {
        self.fk_definition = str::non_blank(definition).map(String::from);
        if self.fk_definition.is_some() {
            self.delete_action = None;
            self.update_action = None;
        }
        self
    }
}

impl ForeignKeyAction {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cascade" => Some(Self::Cascade),
            "restrict" => Some(Self::Restrict),
            "null" | "nullify" => Some(Self::Nullify),
            "default" => Some(Self::Default),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl Deref for ForeignKeyMetaData {
    type Target = ConstraintMetaData;

    fn deref(&self) -> &ConstraintMetaData {
        &self.constraint
    }
}

impl DerefMut for ForeignKeyMetaData {
    fn deref_mut(&mut self) -> &mut ConstraintMetaData {
        &mut self.constraint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_clears_actions() {
        let mut fk = ForeignKeyMetaData::new();
        fk.set_delete_action(Some(ForeignKeyAction::Cascade))
            .set_update_action(Some(ForeignKeyAction::Restrict));

        fk.set_fk_definition("FOREIGN KEY (CUSTOMER_ID) REFERENCES CUSTOMER (ID) ON DELETE SET NULL");
        assert_eq!(fk.delete_action(), None);
        assert_eq!(fk.update_action(), None);
        assert!(fk.fk_definition().unwrap().starts_with("FOREIGN KEY"));
    }

    #[test]
    fn actions_ignored_after_definition() {
        let mut fk = ForeignKeyMetaData::new();
        fk.set_fk_definition("FOREIGN KEY (CLUB_ID) REFERENCES CLUB (ID) ON DELETE CASCADE");
        fk.set_delete_action(Some(ForeignKeyAction::Restrict))
            .set_update_action(Some(ForeignKeyAction::Nullify));

        assert_eq!(fk.delete_action(), None);
        assert_eq!(fk.update_action(), None);

        // Clearing is still allowed.
        fk.set_delete_action(None);
        assert_eq!(fk.delete_action(), None);
    }

    #[test]
    fn blank_definition_keeps_actions() {
        let mut fk = ForeignKeyMetaData::new();
        fk.set_delete_action(Some(ForeignKeyAction::Nullify));
        fk.set_fk_definition("   ");
        assert_eq!(fk.fk_definition(), None);
        assert_eq!(fk.delete_action(), Some(ForeignKeyAction::Nullify));
    }

    #[test]
    fn columns_feed_constraint_names() {
        let mut fk = ForeignKeyMetaData::new();
        let mut column = ColumnMetaData::named("CUSTOMER_ID");
        column.target = Some("ID".to_string());
        fk.add_column(column).add_column(ColumnMetaData::new());

        assert_eq!(fk.columns().len(), 2);
        assert_eq!(fk.column_names(), ["CUSTOMER_ID"]);
        assert_eq!(ForeignKeyAction::parse("null"), Some(ForeignKeyAction::Nullify));
    }
}

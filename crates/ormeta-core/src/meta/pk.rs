use super::{ColumnList, ColumnMetaData};

/// Explicit primary key definition for a class or join table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryKeyMetaData {
    /// Constraint name
    pub name: Option<String>,

    columns: ColumnList,
}

impl PrimaryKeyMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_name(&self) -> Option<&str> {
        self.columns.column_name()
    }

    /// Renames the sole column, or creates it when there is none.
    pub fn set_column_name(&mut self, name: &str) -> &mut Self {
        self.columns.set_column_name(name);
        self
    }

    pub fn add_column(&mut self, column: ColumnMetaData) -> &mut Self {
        self.columns.add_column(column);
        self
    }

    pub fn columns(&self) -> &[ColumnMetaData] {
        self.columns.columns()
    }
}

/// Shared shape of table-level constraints: a name, a table, and the
/// members and/or columns the constraint covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintMetaData {
    pub name: Option<String>,

    /// Table the constraint applies to. Unset means the owner's table.
    pub table: Option<String>,

    member_names: Vec<String>,

    column_names: Vec<String>,
}

impl ConstraintMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, name: impl Into<String>) -> &mut Self {
        self.member_names.push(name.into());
        self
    }

    pub fn add_column(&mut self, name: impl Into<String>) -> &mut Self {
        self.column_names.push(name.into());
        self
    }

    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn number_of_members(&self) -> usize {
        self.member_names.len()
    }

    pub fn number_of_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Sets the table if none was given.
    pub(crate) fn default_table(&mut self, table: Option<&str>) {
        if self.table.is_none() {
            self.table = table.map(str::to_string);
        }
    }
}

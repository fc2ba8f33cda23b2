use super::{
    member::MemberScope, ColumnList, ColumnMetaData, ForeignKeyAction, ForeignKeyMetaData,
    IndexMetaData, IndexedValue, Node, PrimaryKeyMetaData, UniqueMetaData,
};
use crate::Result;

/// A join to another table, either from a member (the join table of a
/// collection or map) or from a class (secondary table, or the table of a
/// subclass stored in its own table).
#[derive(Debug, Clone, Default)]
pub struct JoinMetaData {
    node: Node,

    /// Only valid on class-level joins
    pub table: Option<String>,

    columns: ColumnList,

    /// Use an outer join when reading
    pub outer: bool,

    pub delete_action: Option<ForeignKeyAction>,

    pub indexed: Option<IndexedValue>,

    pub unique: bool,

    pub foreign_key: Option<ForeignKeyMetaData>,

    pub primary_key: Option<PrimaryKeyMetaData>,

    index: Option<IndexMetaData>,

    unique_constraint: Option<UniqueMetaData>,
}

impl_descriptor!(JoinMetaData);

impl JoinMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    pub fn column_name(&self) -> Option<&str> {
        self.columns.column_name()
    }

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

    pub fn index(&self) -> Option<&IndexMetaData> {
        self.index.as_ref()
    }

    pub fn unique_constraint(&self) -> Option<&UniqueMetaData> {
        self.unique_constraint.as_ref()
    }

    pub(crate) fn attach(&mut self, parent: super::Parent) {
        self.node.attach(parent);
    }

    /// Member-level joins take their table from the member.
    pub(crate) fn populate_for_member(&mut self, scope: &MemberScope<'_>) -> Result<()> {
        self.node.begin_populate(&format!("join of `{}`", scope.member));
        debug_assert!(matches!(self.node.parent(), None | Some(super::Parent::Member(_))));

        if let Some(table) = &self.table {
            return Err(scope.invalid(format!(
                "join names table `{table}`; a member's join table is set on the member"
            )));
        }

        self.node.finish_populate();
        Ok(())
    }

    pub(crate) fn populate_for_class(&mut self, class: &str) -> Result<()> {
        self.node.begin_populate(&format!("join of `{class}`"));

        if self.table.is_none() && self.columns.is_empty() {
            tracing::debug!(class, "class join without table or columns");
        }

        self.node.finish_populate();
        Ok(())
    }

    /// `table` is the table the join belongs to when it does not name one.
    pub(crate) fn initialise(&mut self, table: Option<&str>) {
        self.node.begin_initialise("join", true);

        let table = self.table.as_deref().or(table);
        let columns = self.columns.column_names();

        self.index = self
            .indexed
            .and_then(|indexed| indexed.index_for(columns.clone()))
            .map(|mut index| {
                index.default_table(table);
                index
            });

        if self.unique {
            let mut unique = UniqueMetaData::over_columns(columns);
            unique.default_table(table);
            self.unique_constraint = Some(unique);
        }

        if self.foreign_key.is_none() && self.delete_action.is_some() {
            let mut fk = ForeignKeyMetaData::new();
            for column in self.columns.columns() {
                fk.add_column(column.clone());
            }
            fk.set_delete_action(self.delete_action);
            self.foreign_key = Some(fk);
        }
        if let Some(fk) = &mut self.foreign_key {
            fk.default_table(table);
        }

        self.node.finish_initialise();
    }
}

use super::{ColumnList, ColumnMetaData, IndexMetaData, IndexedValue, JdbcType, Node};

/// Marks rows deleted through a flag column instead of removing them.
#[derive(Debug, Clone, Default)]
pub struct SoftDeleteMetaData {
    node: Node,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    index: Option<IndexMetaData>,
}

impl_descriptor!(SoftDeleteMetaData);

impl SoftDeleteMetaData {
    pub fn new() -> Self {
        Self::default()
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

    pub(crate) fn attach(&mut self, parent: super::Parent) {
        self.node.attach(parent);
    }

    /// Soft delete has no populate step. The flag column is created if
    /// missing and typed boolean unless a type was given.
    pub(crate) fn initialise(&mut self, table: Option<&str>) {
        self.node.begin_initialise("soft delete", false);

        if self.columns.is_empty() {
            self.columns.add_column(ColumnMetaData::new());
        }
        for column in self.columns.columns_mut() {
            if column.jdbc_type.is_none() && column.sql_type.is_none() {
                column.jdbc_type = Some(JdbcType::Boolean);
            }
        }

        self.index = self
            .indexed
            .and_then(|indexed| indexed.index_for(self.columns.column_names()))
            .map(|mut index| {
                index.default_table(table);
                index
            });

        self.node.finish_initialise();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_column_defaults_to_boolean() {
        let mut soft_delete = SoftDeleteMetaData::new();
        soft_delete.initialise(Some("ORDERS"));

        assert_eq!(soft_delete.columns().len(), 1);
        assert_eq!(soft_delete.columns()[0].jdbc_type, Some(JdbcType::Boolean));
        assert!(soft_delete.index().is_none());
    }

    #[test]
    fn declared_type_is_kept_and_index_built() {
        let mut column = ColumnMetaData::named("DELETED");
        column.jdbc_type = Some(JdbcType::Char);

        let mut soft_delete = SoftDeleteMetaData::new();
        soft_delete.add_column(column);
        soft_delete.indexed = Some(IndexedValue::True);
        soft_delete.initialise(Some("ORDERS"));

        assert_eq!(soft_delete.columns()[0].jdbc_type, Some(JdbcType::Char));
        let index = soft_delete.index().unwrap();
        assert_eq!(index.column_names(), ["DELETED"]);
        assert_eq!(index.table.as_deref(), Some("ORDERS"));
    }
}

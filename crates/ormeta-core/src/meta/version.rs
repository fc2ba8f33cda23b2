use super::{
    strategy::StrategyField, ColumnList, ColumnMetaData, Cx, IndexMetaData, IndexedValue,
    MemberMetaData, Node, Strategy, VersionStrategy,
};
use crate::{Error, Result};

/// Optimistic versioning of a class.
///
/// The version is stored either in a surrogate column or in an existing
/// member named by `field_name`, never both.
#[derive(Debug, Clone, Default)]
pub struct VersionMetaData {
    node: Node,

    strategy: StrategyField<VersionStrategy>,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    /// Member storing the version value
    field_name: Option<String>,

    index: Option<IndexMetaData>,
}

impl_descriptor!(VersionMetaData);

impl VersionMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(&self) -> Option<&Strategy<VersionStrategy>> {
        self.strategy.get()
    }

    pub fn set_strategy(&mut self, strategy: impl Into<Strategy<VersionStrategy>>) -> &mut Self {
        self.strategy.set(Some(strategy.into()));
        self
    }

    /// Sets the strategy from a raw token. Unknown tokens are reported when
    /// the class is populated.
    pub fn set_strategy_name(&mut self, token: &str) -> &mut Self {
        self.strategy.set_name(token);
        self
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn set_field_name(&mut self, name: &str) -> &mut Self {
        self.field_name = std_util::str::non_blank(name).map(str::to_string);
        self
    }

    pub fn uses_field(&self) -> bool {
        self.field_name.is_some()
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

    /// Runs after the class's members are populated, so the type of the
    /// version field is known.
    pub(crate) fn populate(
        &mut self,
        cx: &Cx<'_>,
        class: &str,
        members: &[MemberMetaData],
    ) -> Result<()> {
        self.node.begin_populate(&format!("version of `{class}`"));
        self.strategy.check(class)?;

        if let Some(field_name) = &self.field_name {
            if !self.columns.is_empty() {
                return Err(Error::invalid_metadata(
                    class,
                    format!("version is stored in field `{field_name}` and also declares a column"),
                ));
            }

            let Some(member) = members.iter().find(|member| member.name == *field_name) else {
                return Err(Error::invalid_metadata(
                    class,
                    format!("version field `{field_name}` is not a member"),
                ));
            };

            let date_time = member
                .resolved_type()
                .is_some_and(|ty| cx.resolver.is_date_time_type(ty));
            if date_time && self.strategy.get().is_none() {
                self.strategy.set(Some(VersionStrategy::DateTime.into()));
            }
        }

        self.node.finish_populate();
        Ok(())
    }

    pub(crate) fn initialise(&mut self, table: Option<&str>) {
        self.node.begin_initialise("version", true);

        if !self.uses_field() {
            self.index = self
                .indexed
                .and_then(|indexed| indexed.index_for(self.columns.column_names()))
                .map(|mut index| {
                    index.default_table(table);
                    index
                });
        }

        self.node.finish_initialise();
    }
}

use super::{
    strategy::StrategyField, ColumnList, ColumnMetaData, DiscriminatorStrategy, IndexMetaData,
    IndexedValue, Node, Strategy,
};
use crate::Result;

use std_util::str;

/// How the concrete type of a row is recorded in an inheritance tree.
#[derive(Debug, Clone, Default)]
pub struct DiscriminatorMetaData {
    node: Node,

    strategy: StrategyField<DiscriminatorStrategy>,

    /// Value stored for the owning class under a value-map strategy
    value: Option<String>,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    index: Option<IndexMetaData>,
}

impl_descriptor!(DiscriminatorMetaData);

impl DiscriminatorMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(&self) -> Option<&Strategy<DiscriminatorStrategy>> {
        self.strategy.get()
    }

    pub fn set_strategy(
        &mut self,
        strategy: impl Into<Strategy<DiscriminatorStrategy>>,
    ) -> &mut Self {
        self.strategy.set(Some(strategy.into()));
        self
    }

    pub fn set_strategy_name(&mut self, token: &str) -> &mut Self {
        self.strategy.set_name(token);
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        self.value = str::non_blank(value).map(String::from);
        self
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

    /// The value stored for rows of `class`, whose entity name is `entity`.
    pub fn value_for(&self, class: &str, entity: Option<&str>) -> Option<String> {
        match self.strategy.get()?.known()? {
            DiscriminatorStrategy::None => None,
            DiscriminatorStrategy::ValueMap => self.value.clone(),
            DiscriminatorStrategy::ClassName => Some(class.to_string()),
            DiscriminatorStrategy::ValueMapEntityName => Some(
                self.value
                    .clone()
                    .or_else(|| entity.map(String::from))
                    .unwrap_or_else(|| str::simple_name(class).to_string()),
            ),
        }
    }

    /// Discriminators have no populate step.
    pub(crate) fn initialise(&mut self, class: &str, table: Option<&str>) -> Result<()> {
        self.node
            .begin_initialise(&format!("discriminator of `{class}`"), false);
        self.strategy.check(class)?;

        if self.value.is_some() && self.strategy.get().is_none() {
            self.strategy
                .set(Some(DiscriminatorStrategy::ValueMap.into()));
        }

        self.index = self
            .indexed
            .and_then(|indexed| indexed.index_for(self.columns.column_names()))
            .map(|mut index| {
                index.default_table(table);
                index
            });

        self.node.finish_initialise();
        Ok(())
    }
}

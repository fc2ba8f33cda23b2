use super::{
    strategy::StrategyField, DiscriminatorMetaData, ForeignKeyMetaData, InheritanceStrategy,
    JoinMetaData, Node, Parent, Strategy,
};
use crate::Result;

/// Where a class in an inheritance tree stores its members, and how rows
/// are told apart.
#[derive(Debug, Clone, Default)]
pub struct InheritanceMetaData {
    node: Node,

    strategy: StrategyField<InheritanceStrategy>,

    join: Option<JoinMetaData>,

    pub foreign_key: Option<ForeignKeyMetaData>,

    discriminator: Option<DiscriminatorMetaData>,
}

impl_descriptor!(InheritanceMetaData);

impl InheritanceMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(&self) -> Option<&Strategy<InheritanceStrategy>> {
        self.strategy.get()
    }

    pub fn set_strategy(&mut self, strategy: impl Into<Strategy<InheritanceStrategy>>) -> &mut Self {
        self.strategy.set(Some(strategy.into()));
        self
    }

    pub fn set_strategy_name(&mut self, token: &str) -> &mut Self {
        self.strategy.set_name(token);
        self
    }

    pub fn join(&self) -> Option<&JoinMetaData> {
        self.join.as_ref()
    }

    pub fn set_join(&mut self, mut join: JoinMetaData) -> &mut Self {
        if let Some(parent) = self.node.parent() {
            join.attach(parent);
        }
        self.join = Some(join);
        self
    }

    pub fn discriminator(&self) -> Option<&DiscriminatorMetaData> {
        self.discriminator.as_ref()
    }

    pub fn set_discriminator(&mut self, mut discriminator: DiscriminatorMetaData) -> &mut Self {
        if let Some(parent) = self.node.parent() {
            discriminator.attach(parent);
        }
        self.discriminator = Some(discriminator);
        self
    }

    pub(crate) fn attach(&mut self, parent: Parent) {
        self.node.attach(parent);
        if let Some(join) = &mut self.join {
            join.attach(parent);
        }
        if let Some(discriminator) = &mut self.discriminator {
            discriminator.attach(parent);
        }
    }

    pub(crate) fn populate(&mut self, class: &str) -> Result<()> {
        self.node
            .begin_populate(&format!("inheritance of `{class}`"));
        self.strategy.check(class)?;

        if let Some(join) = &mut self.join {
            join.populate_for_class(class)?;
        }

        self.node.finish_populate();
        Ok(())
    }

    pub(crate) fn initialise(&mut self, class: &str, table: Option<&str>) -> Result<()> {
        self.node
            .begin_initialise(&format!("inheritance of `{class}`"), true);

        if let Some(discriminator) = &mut self.discriminator {
            discriminator.initialise(class, table)?;
        }
        if let Some(join) = &mut self.join {
            join.initialise(table);
        }
        if let Some(fk) = &mut self.foreign_key {
            fk.default_table(table);
        }

        self.node.finish_initialise();
        Ok(())
    }
}

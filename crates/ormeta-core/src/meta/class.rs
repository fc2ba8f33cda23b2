use super::{
    strategy::StrategyField, Cx, ForeignKeyMetaData, IdentityStrategy, IndexMetaData,
    InheritanceMetaData, JoinMetaData, MemberId, MemberMetaData, Node, Parent,
    PrimaryKeyMetaData, SoftDeleteMetaData, Strategy, UniqueMetaData, VersionMetaData,
};
use crate::Result;

use std::fmt;
use std_util::str;

/// Mapping of one persistable class. Root of a descriptor tree.
#[derive(Debug, Clone)]
pub struct ClassMetaData {
    node: Node,

    /// Uniquely identifies the class within a unit of work
    pub id: ClassId,

    /// Simple name
    pub name: String,

    pub package: Option<String>,

    /// Name used by queries. Defaults to the simple name.
    pub entity_name: Option<String>,

    pub table: Option<String>,

    /// Instances are only ever stored embedded in an owner
    pub embedded_only: bool,

    identity: StrategyField<IdentityStrategy>,

    members: Vec<MemberMetaData>,

    primary_key: Option<PrimaryKeyMetaData>,

    version: Option<VersionMetaData>,

    soft_delete: Option<SoftDeleteMetaData>,

    inheritance: Option<InheritanceMetaData>,

    /// Secondary tables
    joins: Vec<JoinMetaData>,

    pub indexes: Vec<IndexMetaData>,

    pub uniques: Vec<UniqueMetaData>,

    pub foreign_keys: Vec<ForeignKeyMetaData>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClassId(pub usize);

impl_descriptor!(ClassMetaData);

impl ClassMetaData {
    /// A class named by its qualified name.
    pub fn new(qualified_name: &str) -> Self {
        let name = qualified_name.trim();
        Self {
            node: Node::default(),
            id: ClassId::placeholder(),
            name: str::simple_name(name).to_string(),
            package: str::package_of(name).map(String::from),
            entity_name: None,
            table: None,
            embedded_only: false,
            identity: StrategyField::default(),
            members: vec![],
            primary_key: None,
            version: None,
            soft_delete: None,
            inheritance: None,
            joins: vec![],
            indexes: vec![],
            uniques: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn full_name(&self) -> String {
        match &self.package {
            Some(package) => str::qualify(package, &self.name),
            None => self.name.clone(),
        }
    }

    pub fn members(&self) -> &[MemberMetaData] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberMetaData> {
        self.members.iter().find(|member| member.name == name)
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut MemberMetaData> {
        self.members.iter_mut().find(|member| member.name == name)
    }

    /// Adds a member, assigning its id.
    pub fn add_member(&mut self, mut member: MemberMetaData) -> MemberId {
        let id = self.id.member(self.members.len());
        member.set_id(id);
        self.members.push(member);
        id
    }

    /// Members flagged as primary key, in declaration order.
    pub fn primary_key_members(&self) -> impl Iterator<Item = &MemberMetaData> + '_ {
        self.members.iter().filter(|member| member.primary_key)
    }

    pub fn identity_strategy(&self) -> Option<&Strategy<IdentityStrategy>> {
        self.identity.get()
    }

    pub fn set_identity_strategy(
        &mut self,
        strategy: impl Into<Strategy<IdentityStrategy>>,
    ) -> &mut Self {
        self.identity.set(Some(strategy.into()));
        self
    }

    pub fn set_identity_strategy_name(&mut self, token: &str) -> &mut Self {
        self.identity.set_name(token);
        self
    }

    pub fn primary_key(&self) -> Option<&PrimaryKeyMetaData> {
        self.primary_key.as_ref()
    }

    pub fn set_primary_key(&mut self, primary_key: PrimaryKeyMetaData) -> &mut Self {
        self.primary_key = Some(primary_key);
        self
    }

    pub fn version(&self) -> Option<&VersionMetaData> {
        self.version.as_ref()
    }

    pub fn set_version(&mut self, mut version: VersionMetaData) -> &mut Self {
        version.attach(Parent::Class(self.id));
        self.version = Some(version);
        self
    }

    pub fn soft_delete(&self) -> Option<&SoftDeleteMetaData> {
        self.soft_delete.as_ref()
    }

    pub fn set_soft_delete(&mut self, mut soft_delete: SoftDeleteMetaData) -> &mut Self {
        soft_delete.attach(Parent::Class(self.id));
        self.soft_delete = Some(soft_delete);
        self
    }

    pub fn inheritance(&self) -> Option<&InheritanceMetaData> {
        self.inheritance.as_ref()
    }

    pub fn set_inheritance(&mut self, mut inheritance: InheritanceMetaData) -> &mut Self {
        inheritance.attach(Parent::Class(self.id));
        self.inheritance = Some(inheritance);
        self
    }

    pub fn joins(&self) -> &[JoinMetaData] {
        &self.joins
    }

    pub fn add_join(&mut self, mut join: JoinMetaData) -> &mut Self {
        join.attach(Parent::Class(self.id));
        self.joins.push(join);
        self
    }

    /// The value written to the discriminator column for this class.
    pub fn discriminator_value(&self) -> Option<String> {
        let discriminator = self.inheritance.as_ref()?.discriminator()?;
        discriminator.value_for(&self.full_name(), self.entity_name.as_deref())
    }

    /// Re-attaches every child after the class's id changed.
    pub(crate) fn set_id(&mut self, id: ClassId) {
        self.id = id;
        let parent = Parent::Class(id);
        for (index, member) in self.members.iter_mut().enumerate() {
            member.set_id(id.member(index));
        }
        if let Some(version) = &mut self.version {
            version.attach(parent);
        }
        if let Some(soft_delete) = &mut self.soft_delete {
            soft_delete.attach(parent);
        }
        if let Some(inheritance) = &mut self.inheritance {
            inheritance.attach(parent);
        }
        for join in &mut self.joins {
            join.attach(parent);
        }
    }

    /// Resolves member types and applies every type-dependent default.
    ///
    /// The first invalid member aborts the class.
    pub fn populate(&mut self, cx: &Cx<'_>) -> Result<()> {
        let full_name = self.full_name();
        self.node
            .begin_populate(&format!("class `{full_name}`"));
        let _span = tracing::debug_span!("populate_class", class = %full_name).entered();

        self.identity.check(&full_name)?;

        if self.entity_name.is_none() {
            self.entity_name = Some(self.name.clone());
        }

        let package = self.package.as_deref();
        let table = self.table.as_deref();
        for member in &mut self.members {
            member.populate(cx, &full_name, package, table)?;
        }

        if let Some(version) = &mut self.version {
            version.populate(cx, &full_name, &self.members)?;
        }
        if let Some(inheritance) = &mut self.inheritance {
            inheritance.populate(&full_name)?;
        }
        for join in &mut self.joins {
            join.populate_for_class(&full_name)?;
        }

        self.node.finish_populate();
        Ok(())
    }

    /// Derives indexes, unique constraints and surrogate columns. Every
    /// class of the unit of work must have been populated first.
    pub fn initialise(&mut self, cx: &Cx<'_>) -> Result<()> {
        let full_name = self.full_name();
        self.node
            .begin_initialise(&format!("class `{full_name}`"), true);
        let _span = tracing::debug_span!("initialise_class", class = %full_name).entered();

        let package = self.package.as_deref();
        let table = self.table.as_deref();

        for member in &mut self.members {
            member.initialise(cx, &full_name, package, table);
        }

        if let Some(version) = &mut self.version {
            version.initialise(table);
        }
        if let Some(soft_delete) = &mut self.soft_delete {
            soft_delete.initialise(table);
        }
        if let Some(inheritance) = &mut self.inheritance {
            inheritance.initialise(&full_name, table)?;
        }
        for join in &mut self.joins {
            join.initialise(table);
        }

        for index in &mut self.indexes {
            index.default_table(table);
        }
        for unique in &mut self.uniques {
            unique.default_table(table);
        }
        for fk in &mut self.foreign_keys {
            fk.default_table(table);
        }

        self.node.finish_initialise();
        Ok(())
    }
}

impl ClassId {
    /// Create a `MemberId` for the member at `index` of this class.
    pub const fn member(self, index: usize) -> MemberId {
        MemberId { class: self, index }
    }

    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl From<&ClassMetaData> for ClassId {
    fn from(value: &ClassMetaData) -> Self {
        value.id
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ClassId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Descriptor;

    #[test]
    fn members_are_wired_to_class() {
        let mut class = ClassMetaData::new("shop.Order");
        class.set_id(ClassId(4));
        let id = class.add_member(MemberMetaData::typed("lines", "java.util.List"));

        assert_eq!(id, ClassId(4).member(0));
        assert_eq!(class.member("lines").unwrap().parent(), Some(Parent::Class(ClassId(4))));
        assert_eq!(class.full_name(), "shop.Order");
        assert_eq!(class.package.as_deref(), Some("shop"));
    }

    #[test]
    fn reassigning_id_rewires_members() {
        let mut class = ClassMetaData::new("Order");
        class.add_member(MemberMetaData::new("id"));
        class.set_id(ClassId(1));

        let member = &class.members()[0];
        assert_eq!(member.id, ClassId(1).member(0));
        assert_eq!(member.parent(), Some(Parent::Class(ClassId(1))));
        assert_eq!(class.package, None);
    }
}

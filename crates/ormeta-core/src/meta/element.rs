use super::{
    member::MemberScope, ColumnList, ColumnMetaData, ContainerComponent, ContainerMetaData,
    EmbeddedMetaData, ForeignKeyAction, ForeignKeyMetaData, IndexMetaData, IndexedValue, Node,
    Role, UniqueMetaData,
};
use crate::Result;

use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Mapping of one container role: where its values are stored and which
/// constraints apply to them.
///
/// The value's type and embedding flags live on the [`ContainerComponent`]
/// owned by the member's container.
#[derive(Debug, Clone, Default)]
pub struct ElementBase {
    node: Node,

    /// Table holding the values, when not the join table
    pub table: Option<String>,

    /// Member of the value type that owns the relation
    pub mapped_by: Option<String>,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    pub unique: bool,

    pub delete_action: Option<ForeignKeyAction>,

    pub update_action: Option<ForeignKeyAction>,

    pub foreign_key: Option<ForeignKeyMetaData>,

    pub embedded: Option<EmbeddedMetaData>,

    /// Derived from `indexed` during initialise
    index: Option<IndexMetaData>,

    /// Derived from `unique` during initialise
    unique_constraint: Option<UniqueMetaData>,
}

/// The `element` block of a collection or array member.
#[derive(Debug, Clone, Default)]
pub struct ElementMetaData(ElementBase);

/// The `key` block of a map member.
#[derive(Debug, Clone, Default)]
pub struct KeyMetaData(ElementBase);

/// The `value` block of a map member.
#[derive(Debug, Clone, Default)]
pub struct ValueMetaData(ElementBase);

impl_descriptor!(ElementBase);

impl ElementBase {
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

    fn populate(
        &mut self,
        scope: &MemberScope<'_>,
        role: Role,
        component: &ContainerComponent,
    ) -> Result<()> {
        self.node.begin_populate(&format!("{role} of `{}`", scope.member));

        if self.embedded.is_some() {
            if let Some(resolved) = component.resolved() {
                if scope.is_reference_type(resolved) {
                    return Err(scope.invalid(format!(
                        "{role} of type `{}` cannot carry an embedded definition",
                        resolved.name
                    )));
                }
            }
        }

        if scope.has_join
            && self.embedded.is_none()
            && component.is_embedded()
            && component.is_persistent()
        {
            debug!(
                member = scope.member,
                "{role} embedded in join table without an embedded definition; using defaults"
            );
            self.embedded = Some(EmbeddedMetaData::new());
        }

        self.node.finish_populate();
        Ok(())
    }

    fn initialise(&mut self, scope: &MemberScope<'_>, role: Role) {
        self.node
            .begin_initialise(&format!("{role} of `{}`", scope.member), true);

        let columns = self.columns.column_names();
        let table = self.table.as_deref().or(scope.table);

        self.index = self.indexed.and_then(|indexed| {
            let mut index = indexed.index_for(columns.clone())?;
            if columns.is_empty() {
                index.add_member(scope.member);
            }
            index.default_table(table);
            Some(index)
        });

        if self.unique {
            let mut unique = UniqueMetaData::over_columns(columns.clone());
            if columns.is_empty() {
                unique.add_member(scope.member);
            }
            unique.default_table(table);
            self.unique_constraint = Some(unique);
        }

        if self.foreign_key.is_none()
            && (self.delete_action.is_some() || self.update_action.is_some())
        {
            let mut fk = ForeignKeyMetaData::new();
            for column in self.columns.columns() {
                fk.add_column(column.clone());
            }
            fk.set_delete_action(self.delete_action)
                .set_update_action(self.update_action);
            self.foreign_key = Some(fk);
        }

        if let Some(fk) = &mut self.foreign_key {
            fk.default_table(table);
        }

        self.node.finish_initialise();
    }
}

impl ElementMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn populate(
        &mut self,
        scope: &MemberScope<'_>,
        container: Option<&ContainerMetaData>,
    ) -> Result<()> {
        let unattached = ContainerComponent::default();
        let component = match container {
            Some(ContainerMetaData::Map(_)) => {
                return Err(scope.invalid(
                    "an `element` block is not valid on a map; use `key` and `value`",
                ));
            }
            Some(ContainerMetaData::Collection(collection)) => collection.element(),
            Some(ContainerMetaData::Array(array)) => array.element(),
            None => &unattached,
        };
        self.0.populate(scope, Role::Element, component)
    }

    pub(crate) fn initialise(&mut self, scope: &MemberScope<'_>) {
        self.0.initialise(scope, Role::Element);
    }
}

impl KeyMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn populate(
        &mut self,
        scope: &MemberScope<'_>,
        container: Option<&ContainerMetaData>,
    ) -> Result<()> {
        let Some(ContainerMetaData::Map(map)) = container else {
            return Err(scope.fatal("a `key` block requires a `map` block"));
        };
        self.0.populate(scope, Role::Key, map.key())
    }

    pub(crate) fn initialise(&mut self, scope: &MemberScope<'_>) {
        self.0.initialise(scope, Role::Key);
    }
}

impl ValueMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn populate(
        &mut self,
        scope: &MemberScope<'_>,
        container: Option<&ContainerMetaData>,
    ) -> Result<()> {
        let Some(ContainerMetaData::Map(map)) = container else {
            return Err(scope.fatal("a `value` block requires a `map` block"));
        };
        self.0.populate(scope, Role::Value, map.value())
    }

    pub(crate) fn initialise(&mut self, scope: &MemberScope<'_>) {
        self.0.initialise(scope, Role::Value);
    }
}

macro_rules! role_wrapper {
    ( $($ty:ident),+ ) => {
        $(
            impl Deref for $ty {
                type Target = ElementBase;

                fn deref(&self) -> &ElementBase {
                    &self.0
                }
            }

            impl DerefMut for $ty {
                fn deref_mut(&mut self) -> &mut ElementBase {
                    &mut self.0
                }
            }

            impl super::Descriptor for $ty {
                fn node(&self) -> &Node {
                    &self.0.node
                }
            }
        )+
    };
}

role_wrapper!(ElementMetaData, KeyMetaData, ValueMetaData);

use super::{
    container::default_allow_nulls, member::MemberScope, ClassRef, ContainerComponent, Cx, Node,
    Role,
};
use crate::Result;

/// The `map` block of a member.
///
/// Owns the key and value components. The member's `key` and `value`
/// blocks read them from here.
#[derive(Debug, Clone, Default)]
pub struct MapMetaData {
    pub(super) node: Node,

    key: ContainerComponent,

    value: ContainerComponent,

    allow_nulls: Option<bool>,
}

impl MapMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> &ContainerComponent {
        &self.key
    }

    pub fn key_mut(&mut self) -> &mut ContainerComponent {
        &mut self.key
    }

    pub fn value(&self) -> &ContainerComponent {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ContainerComponent {
        &mut self.value
    }

    pub fn key_type(&self) -> Option<&str> {
        self.key.type_name()
    }

    pub fn set_key_type(&mut self, name: &str) -> &mut Self {
        self.key.set_type_name(name);
        self
    }

    pub fn value_type(&self) -> Option<&str> {
        self.value.type_name()
    }

    pub fn set_value_type(&mut self, name: &str) -> &mut Self {
        self.value.set_type_name(name);
        self
    }

    pub fn key_class_metadata(&self) -> Option<&ClassRef> {
        self.key.class_metadata()
    }

    pub fn value_class_metadata(&self) -> Option<&ClassRef> {
        self.value.class_metadata()
    }

    pub fn is_embedded_key(&self) -> bool {
        self.key.is_embedded()
    }

    pub fn is_embedded_value(&self) -> bool {
        self.value.is_embedded()
    }

    pub fn is_dependent_key(&self) -> bool {
        self.key.is_dependent()
    }

    pub fn is_dependent_value(&self) -> bool {
        self.value.is_dependent()
    }

    pub fn allow_nulls(&self) -> Option<bool> {
        self.allow_nulls
    }

    pub fn set_allow_nulls(&mut self, allow_nulls: bool) -> &mut Self {
        self.allow_nulls = Some(allow_nulls);
        self
    }

    pub(super) fn populate(&mut self, cx: &Cx<'_>, scope: &MemberScope<'_>) -> Result<()> {
        self.node.begin_populate(&format!("map of `{}`", scope.member));

        self.key.default_type_name(|| scope.default_type(cx, Role::Key));
        self.value.default_type_name(|| scope.default_type(cx, Role::Value));

        if self.allow_nulls.is_none() {
            self.allow_nulls = default_allow_nulls(scope.declared);
        }

        self.key
            .populate(cx, scope, Role::Key, scope.has_embedded_block(Role::Key))?;
        self.value
            .populate(cx, scope, Role::Value, scope.has_embedded_block(Role::Value))?;

        self.node.finish_populate();
        Ok(())
    }
}

use super::{
    container::default_allow_nulls, member::MemberScope, ClassRef, ContainerComponent, Cx, Node,
    Role,
};
use crate::Result;

/// The `array` block of a member.
#[derive(Debug, Clone, Default)]
pub struct ArrayMetaData {
    pub(super) node: Node,

    element: ContainerComponent,

    allow_nulls: Option<bool>,
}

impl ArrayMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self) -> &ContainerComponent {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut ContainerComponent {
        &mut self.element
    }

    pub fn element_type(&self) -> Option<&str> {
        self.element.type_name()
    }

    pub fn set_element_type(&mut self, name: &str) -> &mut Self {
        self.element.set_type_name(name);
        self
    }

    pub fn element_class_metadata(&self) -> Option<&ClassRef> {
        self.element.class_metadata()
    }

    pub fn is_embedded_element(&self) -> bool {
        self.element.is_embedded()
    }

    pub fn is_serialized_element(&self) -> bool {
        self.element.is_serialized()
    }

    pub fn is_dependent_element(&self) -> bool {
        self.element.is_dependent()
    }

    pub fn allow_nulls(&self) -> Option<bool> {
        self.allow_nulls
    }

    pub fn set_allow_nulls(&mut self, allow_nulls: bool) -> &mut Self {
        self.allow_nulls = Some(allow_nulls);
        self
    }

    pub(super) fn populate(&mut self, cx: &Cx<'_>, scope: &MemberScope<'_>) -> Result<()> {
        self.node.begin_populate(&format!("array of `{}`", scope.member));

        // The declared array type names its element type.
        let element_type = scope
            .declared
            .and_then(|declared| declared.as_array_element())
            .map(|element| element.name.clone());
        self.element.default_type_name(|| {
            element_type.unwrap_or_else(|| scope.default_type(cx, Role::Element))
        });

        if self.allow_nulls.is_none() {
            self.allow_nulls = default_allow_nulls(scope.declared);
        }

        self.element.populate(
            cx,
            scope,
            Role::Element,
            scope.has_embedded_block(Role::Element),
        )?;

        self.node.finish_populate();
        Ok(())
    }
}

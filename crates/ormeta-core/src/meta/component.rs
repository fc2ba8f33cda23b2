use super::{member::MemberScope, ClassRef, Cx, ResolvedType};
use crate::Result;

use std::fmt;
use std_util::str;
use tracing::{debug, warn};

/// A value stored inside a container: a collection or array element, a map
/// key, or a map value.
///
/// The component is owned by its container. The element, key and value
/// descriptors of the member read it from there rather than holding a copy.
#[derive(Debug, Clone, Default)]
pub struct ContainerComponent {
    pub embedded: Option<bool>,

    pub serialized: Option<bool>,

    /// Deleting the owner deletes the referenced value
    pub dependent: Option<bool>,

    /// Declared type name. Qualified in place during populate.
    type_name: Option<String>,

    /// Set during populate
    resolved: Option<ResolvedType>,

    /// Metadata of the component type, when that type is mapped itself.
    class_meta: Option<ClassRef>,

    /// Concrete types accepted for an interface or abstract component type.
    implementation_types: Vec<String>,
}

/// Which part of a container a component plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Element,
    Key,
    Value,
}

impl Role {
    /// Member extension listing implementations for this role.
    pub fn implementation_extension(self) -> &'static str {
        match self {
            Role::Element => "implementation-classes",
            Role::Key => "key-implementation-classes",
            Role::Value => "value-implementation-classes",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Element => "element",
            Role::Key => "key",
            Role::Value => "value",
        })
    }
}

impl ContainerComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            type_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn set_type_name(&mut self, name: &str) -> &mut Self {
        self.type_name = str::non_blank(name).map(String::from);
        self
    }

    pub fn resolved(&self) -> Option<&ResolvedType> {
        self.resolved.as_ref()
    }

    pub fn class_metadata(&self) -> Option<&ClassRef> {
        self.class_meta.as_ref()
    }

    pub fn implementation_types(&self) -> &[String] {
        &self.implementation_types
    }

    pub fn is_embedded(&self) -> bool {
        self.embedded == Some(true)
    }

    pub fn is_serialized(&self) -> bool {
        self.serialized == Some(true)
    }

    pub fn is_dependent(&self) -> bool {
        self.dependent == Some(true)
    }

    /// Whether the type is stored by reference to a mapped class.
    pub fn is_persistent(&self) -> bool {
        self.class_meta.is_some()
    }

    pub(crate) fn default_type_name(&mut self, name: impl FnOnce() -> String) {
        if self.type_name.is_none() {
            self.type_name = Some(name());
        }
    }

    /// Resolves the component type and applies the defaults that depend on
    /// it. `sibling_embedded` is set when the member's element, key or value
    /// block for this role carries an embedded definition.
    pub(crate) fn populate(
        &mut self,
        cx: &Cx<'_>,
        scope: &MemberScope<'_>,
        role: Role,
        sibling_embedded: bool,
    ) -> Result<()> {
        let declared = self
            .type_name
            .clone()
            .unwrap_or_else(|| cx.options.top_type.clone());

        let declared = if declared.contains(',') {
            self.choose_declared_type(scope, role, &declared)?
        } else {
            declared
        };

        let Some(resolved) = cx.resolve_type(&declared, scope.package) else {
            return Err(scope.invalid(format!(
                "{role} type `{declared}` cannot be resolved"
            )));
        };

        if resolved.name != declared {
            debug!(
                member = scope.member,
                from = %declared,
                to = %resolved.name,
                "qualified {role} type"
            );
        }
        self.type_name = Some(resolved.name.clone());

        self.class_meta = cx.class_for(&resolved);

        let reference_type = cx.resolver.is_interface_or_top_type(&resolved);

        match self.embedded {
            None => {
                let embedded = if cx.resolver.is_default_embedded_type(&resolved) {
                    true
                } else if let Some(class_meta) = &self.class_meta {
                    class_meta.embedded_only
                } else if reference_type {
                    false
                } else {
                    debug!(
                        member = scope.member,
                        ty = %resolved.name,
                        "{role} type is neither mapped nor a reference type; storing it embedded"
                    );
                    true
                };
                self.embedded = Some(embedded);
            }
            Some(false) if self.class_meta.is_none() && !reference_type => {
                warn!(
                    class = scope.class,
                    member = scope.member,
                    ty = %resolved.name,
                    "{role} declared as not embedded but its type is not mapped; storing it embedded"
                );
                self.embedded = Some(true);
            }
            Some(_) => {}
        }

        if sibling_embedded {
            self.embedded = Some(true);
        }

        if self.dependent == Some(true) && self.class_meta.is_none() && !reference_type {
            warn!(
                class = scope.class,
                member = scope.member,
                ty = %resolved.name,
                "{role} declared dependent but its type is not mapped; ignoring"
            );
            self.dependent = Some(false);
        }

        self.resolved = Some(resolved);

        self.implementation_types.clear();
        if let Some(list) = scope.extension(role.implementation_extension()) {
            for entry in str::split_list(list) {
                let Some(implementation) = cx.qualify_type(entry, scope.package) else {
                    return Err(scope.invalid(format!(
                        "implementation type `{entry}` for {role} cannot be resolved"
                    )));
                };
                self.implementation_types.push(implementation.name);
            }
        }

        Ok(())
    }

    /// A declared type listing several candidates is only accepted when
    /// implementations are chosen for the role, in which case the member's
    /// own generic argument is used.
    fn choose_declared_type(
        &self,
        scope: &MemberScope<'_>,
        role: Role,
        declared: &str,
    ) -> Result<String> {
        let chosen = scope
            .extension(role.implementation_extension())
            .and(scope.generic_arg(role))
            .filter(|generic| !generic.contains(','));

        match chosen {
            Some(generic) => Ok(generic.to_string()),
            None => Err(scope.invalid(format!(
                "{role} type `{declared}` names several types; choose one with the `{}` extension",
                role.implementation_extension()
            ))),
        }
    }
}

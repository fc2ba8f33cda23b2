use super::{ClassRef, MetaDataRegistry, Options, Privileged, ResolvedType, TypeResolver};

use std_util::str;

/// Collaborators and options shared by one populate/initialise pass.
#[derive(Clone, Copy)]
pub struct Cx<'a> {
    pub resolver: &'a dyn TypeResolver,
    pub registry: &'a dyn MetaDataRegistry,
    pub options: &'a Options,
}

impl<'a> Cx<'a> {
    pub fn new(
        resolver: &'a dyn TypeResolver,
        registry: &'a dyn MetaDataRegistry,
        options: &'a Options,
    ) -> Self {
        Self {
            resolver,
            registry,
            options,
        }
    }

    fn resolve_exact(&self, name: &str) -> Option<ResolvedType> {
        self.resolver
            .resolve(name, self.options.class_loader_hint.as_deref())
    }

    /// Resolves a declared type name. Names given without a package are
    /// retried against `package`, then against the built-in package.
    pub fn resolve_type(&self, name: &str, package: Option<&str>) -> Option<ResolvedType> {
        self.resolve_exact(name)
            .or_else(|| self.qualify_unqualified(name, package))
    }

    /// Resolves a name that is expected to be qualified, qualifying bare
    /// names against `package` first and the built-in package second.
    pub fn qualify_type(&self, name: &str, package: Option<&str>) -> Option<ResolvedType> {
        if str::is_qualified(name) {
            self.resolve_exact(name)
        } else {
            self.qualify_unqualified(name, package)
        }
    }

    fn qualify_unqualified(&self, name: &str, package: Option<&str>) -> Option<ResolvedType> {
        if str::is_qualified(name) {
            return None;
        }

        package
            .and_then(|package| self.resolve_exact(&str::qualify(package, name)))
            .or_else(|| self.resolve_exact(&str::qualify(&self.options.builtin_package, name)))
    }

    /// Class metadata for a resolved type: the registered entry if there is
    /// one, otherwise whatever discovery finds for a persistable type.
    pub fn class_for(&self, ty: &ResolvedType) -> Option<ClassRef> {
        if let Some(found) = self.registry.metadata_for_type(&ty.name) {
            return Some(found);
        }

        if !self.resolver.is_persistable(ty) {
            return None;
        }

        let scope = Privileged::acquire(self.registry);
        match self.registry.discover_metadata_for_type(&ty.name, &scope) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(ty = %ty.name, error = %err, "metadata discovery failed");
                None
            }
        }
    }
}

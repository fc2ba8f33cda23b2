use super::ClassMetaData;

use std::sync::Arc;

/// Shared handle to another type's class metadata.
///
/// Components hold this as a lookup: the registry owns the metadata, the
/// component only reads it.
pub type ClassRef = Arc<ClassMetaData>;

/// A type name resolved to a concrete host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Fully qualified name
    pub name: String,

    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A primitive value type
    Primitive,

    /// The universal top type every reference type derives from
    Top,

    Interface,

    /// Any other concrete or abstract class
    Class,

    /// A date, time or timestamp class
    DateTime,

    /// An array of the given element type
    Array(Box<ResolvedType>),

    /// A built-in collection type
    Collection(ContainerImpl),

    /// A built-in map type
    Map(ContainerImpl),
}

/// Shape of a built-in container implementation, as far as null handling and
/// cardinality are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerImpl {
    /// An interface or abstract container: the implementation is chosen later
    Abstract,

    /// `ArrayList`, `LinkedList`, `Vector`
    ListLike,

    /// `HashSet`
    HashSetLike,

    /// `LinkedHashSet`
    LinkedHashSetLike,

    /// `HashMap`, `LinkedHashMap`
    HashMapLike,

    /// `Hashtable`, `Properties`
    HashtableLike,

    /// `TreeSet`, `TreeMap`
    Sorted,

    /// A container of at most one element
    Optional,
}

impl ContainerImpl {
    /// Whether the implementation accepts null entries, when that is known
    /// from the implementation alone.
    pub fn allows_nulls(self) -> Option<bool> {
        match self {
            Self::ListLike | Self::HashSetLike | Self::LinkedHashSetLike | Self::HashMapLike => {
                Some(true)
            }
            Self::HashtableLike => Some(false),
            Self::Abstract | Self::Sorted | Self::Optional => None,
        }
    }
}

impl ResolvedType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive)
    }

    pub fn as_array_element(&self) -> Option<&ResolvedType> {
        match &self.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn container_impl(&self) -> Option<ContainerImpl> {
        match self.kind {
            TypeKind::Collection(shape) | TypeKind::Map(shape) => Some(shape),
            _ => None,
        }
    }
}

/// Maps type names to concrete types and classifies them.
pub trait TypeResolver {
    /// Resolves `name`, returning `None` when no such type exists.
    fn resolve(&self, name: &str, hint: Option<&str>) -> Option<ResolvedType>;

    /// Whether the type is persistence-capable in its own right.
    fn is_persistable(&self, ty: &ResolvedType) -> bool;

    /// Whether values of the type are always stored inline.
    fn is_default_embedded_type(&self, ty: &ResolvedType) -> bool;

    fn is_interface_or_top_type(&self, ty: &ResolvedType) -> bool {
        matches!(ty.kind, TypeKind::Interface | TypeKind::Top)
    }

    fn is_date_time_type(&self, ty: &ResolvedType) -> bool {
        matches!(ty.kind, TypeKind::DateTime)
    }
}

/// Lookup of class metadata for mapped types.
pub trait MetaDataRegistry {
    /// Metadata already known to the registry. Never triggers discovery.
    fn metadata_for_type(&self, name: &str) -> Option<ClassRef>;

    /// Loads metadata for a type not yet registered. This may initialise
    /// foreign code, so it is only callable inside a [`Privileged`] scope.
    fn discover_metadata_for_type(
        &self,
        name: &str,
        scope: &Privileged<'_>,
    ) -> anyhow::Result<Option<ClassRef>>;

    fn enter_privileged(&self) {}

    fn exit_privileged(&self) {}
}

/// Elevated execution scope, held for exactly the duration of a discovery.
pub struct Privileged<'a> {
    registry: &'a dyn MetaDataRegistry,
}

impl<'a> Privileged<'a> {
    pub fn acquire(registry: &'a dyn MetaDataRegistry) -> Self {
        registry.enter_privileged();
        Self { registry }
    }
}

impl Drop for Privileged<'_> {
    fn drop(&mut self) {
        self.registry.exit_privileged();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handling_by_shape() {
        assert_eq!(ContainerImpl::ListLike.allows_nulls(), Some(true));
        assert_eq!(ContainerImpl::LinkedHashSetLike.allows_nulls(), Some(true));
        assert_eq!(ContainerImpl::HashtableLike.allows_nulls(), Some(false));
        assert_eq!(ContainerImpl::Abstract.allows_nulls(), None);
    }
}

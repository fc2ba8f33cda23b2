use super::{
    member::MemberScope, ArrayMetaData, CollectionMetaData, Cx, Descriptor, MapMetaData, Node,
    Parent, ResolvedType, TypeKind,
};
use crate::Result;

/// The container block of a member.
#[derive(Debug, Clone)]
pub enum ContainerMetaData {
    Collection(CollectionMetaData),
    Map(MapMetaData),
    Array(ArrayMetaData),
}

impl ContainerMetaData {
    /// An empty container block matching the shape of `ty`, if `ty` is a
    /// container at all.
    pub fn for_type(ty: &ResolvedType) -> Option<Self> {
        match ty.kind {
            TypeKind::Array(_) => Some(Self::Array(ArrayMetaData::new())),
            TypeKind::Collection(_) => Some(Self::Collection(CollectionMetaData::new())),
            TypeKind::Map(_) => Some(Self::Map(MapMetaData::new())),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn as_collection(&self) -> Option<&CollectionMetaData> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapMetaData> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayMetaData> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn allow_nulls(&self) -> Option<bool> {
        match self {
            Self::Collection(collection) => collection.allow_nulls(),
            Self::Map(map) => map.allow_nulls(),
            Self::Array(array) => array.allow_nulls(),
        }
    }

    /// The component whose class metadata decides relation cardinality: the
    /// element of a collection or array, the value of a map.
    pub fn target_component(&self) -> &super::ContainerComponent {
        match self {
            Self::Collection(collection) => collection.element(),
            Self::Map(map) => map.value(),
            Self::Array(array) => array.element(),
        }
    }

    pub(crate) fn attach(&mut self, parent: Parent) {
        match self {
            Self::Collection(collection) => collection.node.attach(parent),
            Self::Map(map) => map.node.attach(parent),
            Self::Array(array) => array.node.attach(parent),
        }
    }

    pub(crate) fn populate(&mut self, cx: &Cx<'_>, scope: &MemberScope<'_>) -> Result<()> {
        match self {
            Self::Collection(collection) => collection.populate(cx, scope),
            Self::Map(map) => map.populate(cx, scope),
            Self::Array(array) => array.populate(cx, scope),
        }
    }

    pub(crate) fn initialise(&mut self, scope: &MemberScope<'_>) {
        let node = match self {
            Self::Collection(collection) => &mut collection.node,
            Self::Map(map) => &mut map.node,
            Self::Array(array) => &mut array.node,
        };
        let what = format!("container of `{}`", scope.member);
        node.begin_initialise(&what, true);
        node.finish_initialise();
    }
}

impl Descriptor for ContainerMetaData {
    fn node(&self) -> &Node {
        match self {
            Self::Collection(collection) => &collection.node,
            Self::Map(map) => &map.node,
            Self::Array(array) => &array.node,
        }
    }
}

/// Null handling implied by the member's declared container type.
pub(crate) fn default_allow_nulls(declared: Option<&ResolvedType>) -> Option<bool> {
    let declared = declared?;
    match &declared.kind {
        TypeKind::Array(element) => Some(!element.is_primitive()),
        TypeKind::Collection(shape) | TypeKind::Map(shape) => shape.allows_nulls(),
        _ => None,
    }
}

impl From<CollectionMetaData> for ContainerMetaData {
    fn from(value: CollectionMetaData) -> Self {
        Self::Collection(value)
    }
}

impl From<MapMetaData> for ContainerMetaData {
    fn from(value: MapMetaData) -> Self {
        Self::Map(value)
    }
}

impl From<ArrayMetaData> for ContainerMetaData {
    fn from(value: ArrayMetaData) -> Self {
        Self::Array(value)
    }
}

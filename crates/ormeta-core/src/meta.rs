//! Mapping descriptors and the populate/initialise pipeline.
//!
//! Descriptors form a strictly owned tree rooted at [`ClassMetaData`]. Each
//! node with a lifecycle moves `Raw -> Populated -> Initialised`: populate
//! resolves types through a [`TypeResolver`] and applies defaults that depend
//! on them, initialise derives structural sub-descriptors (indexes, unique
//! constraints, surrogate columns) once every sibling has been populated.

#[macro_use]
mod lifecycle;
pub use lifecycle::{Descriptor, Node, Parent, Phase};

mod array;
pub use array::ArrayMetaData;

mod builder;
pub use builder::{Builder, Options};

mod class;
pub use class::{ClassId, ClassMetaData};

mod collection;
pub use collection::CollectionMetaData;

mod column;
pub use column::{ColumnList, ColumnMetaData};

mod component;
pub use component::{ContainerComponent, Role};

mod constraint;
pub use constraint::ConstraintMetaData;

mod container;
pub use container::ContainerMetaData;

mod cx;
pub use cx::Cx;

mod discriminator;
pub use discriminator::DiscriminatorMetaData;

mod element;
pub use element::{ElementBase, ElementMetaData, KeyMetaData, ValueMetaData};

mod embedded;
pub use embedded::{EmbeddedMember, EmbeddedMetaData};

mod fk;
pub use fk::{ForeignKeyAction, ForeignKeyMetaData};

mod index;
pub use index::{IndexMetaData, IndexedValue};

mod inheritance;
pub use inheritance::InheritanceMetaData;

mod jdbc_type;
pub use jdbc_type::JdbcType;

mod join;
pub use join::JoinMetaData;

mod map;
pub use map::MapMetaData;

mod member;
pub use member::{MemberId, MemberMetaData};

mod order;
pub use order::{Direction, FieldOrder, OrderMetaData};

mod pk;
pub use pk::PrimaryKeyMetaData;

mod relation;
pub use relation::RelationType;

mod resolve;
pub use resolve::{
    ClassRef, ContainerImpl, MetaDataRegistry, Privileged, ResolvedType, TypeKind, TypeResolver,
};

mod soft_delete;
pub use soft_delete::SoftDeleteMetaData;

mod strategy;
pub use strategy::{
    DiscriminatorStrategy, IdentityStrategy, InheritanceStrategy, Strategy, VersionStrategy,
    Vocabulary,
};

mod unique;
pub use unique::UniqueMetaData;

mod version;
pub use version::VersionMetaData;

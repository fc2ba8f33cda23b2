use super::{
    ClassId, ClassRef, ColumnList, ColumnMetaData, ContainerMetaData, Cx, ElementMetaData,
    ForeignKeyMetaData, IndexMetaData, IndexedValue, JoinMetaData, KeyMetaData, Node,
    OrderMetaData, Parent, RelationType, ResolvedType, Role, TypeKind, TypeResolver,
    UniqueMetaData, ValueMetaData,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;
use std_util::str;

/// One field or property of a class.
#[derive(Debug, Clone)]
pub struct MemberMetaData {
    node: Node,

    /// Uniquely identifies the member within its class
    pub id: MemberId,

    pub name: String,

    /// Declared type name. Qualified in place during populate.
    type_name: Option<String>,

    /// Declared generic arguments: the element type of a collection, the key
    /// and value types of a map.
    generic_args: Vec<String>,

    /// Set during populate
    resolved: Option<ResolvedType>,

    /// Metadata of the declared type, when that type is mapped.
    type_class: Option<ClassRef>,

    pub primary_key: bool,

    /// Member on the other side of the relation that owns it
    pub mapped_by: Option<String>,

    /// Join table of a container member
    pub table: Option<String>,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    pub unique: bool,

    pub foreign_key: Option<ForeignKeyMetaData>,

    /// Vendor extensions, in declaration order
    extensions: IndexMap<String, String>,

    container: Option<ContainerMetaData>,

    element: Option<ElementMetaData>,

    key: Option<KeyMetaData>,

    value: Option<ValueMetaData>,

    join: Option<JoinMetaData>,

    order: Option<OrderMetaData>,

    /// Set during initialise
    relation_type: RelationType,

    index: Option<IndexMetaData>,

    unique_constraint: Option<UniqueMetaData>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MemberId {
    pub class: ClassId,
    pub index: usize,
}

/// What the sub-descriptors of a member see of it while it is processed.
pub(crate) struct MemberScope<'a> {
    pub(crate) class: &'a str,
    pub(crate) package: Option<&'a str>,
    pub(crate) member: &'a str,

    /// Resolved declared type of the member
    pub(crate) declared: Option<&'a ResolvedType>,

    /// The member has a join block
    pub(crate) has_join: bool,

    /// Table constraints under the member default to: the member's join
    /// table, else the class table
    pub(crate) table: Option<&'a str>,

    resolver: &'a dyn TypeResolver,
    generic_args: &'a [String],
    extensions: &'a IndexMap<String, String>,

    /// Element, key and value blocks carrying an embedded definition
    embedded_blocks: [bool; 3],
}

impl_descriptor!(MemberMetaData);

impl MemberMetaData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: Node::default(),
            id: MemberId::placeholder(),
            name: name.into(),
            type_name: None,
            generic_args: vec![],
            resolved: None,
            type_class: None,
            primary_key: false,
            mapped_by: None,
            table: None,
            columns: ColumnList::new(),
            indexed: None,
            unique: false,
            foreign_key: None,
            extensions: IndexMap::new(),
            container: None,
            element: None,
            key: None,
            value: None,
            join: None,
            order: None,
            relation_type: RelationType::None,
            index: None,
            unique_constraint: None,
        }
    }

    /// A member declared with type `type_name`.
    pub fn typed(name: impl Into<String>, type_name: &str) -> Self {
        let mut member = Self::new(name);
        member.set_type_name(type_name);
        member
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn set_type_name(&mut self, name: &str) -> &mut Self {
        self.type_name = str::non_blank(name).map(String::from);
        self
    }

    pub fn generic_args(&self) -> &[String] {
        &self.generic_args
    }

    pub fn add_generic_arg(&mut self, name: &str) -> &mut Self {
        self.generic_args.push(name.trim().to_string());
        self
    }

    pub fn resolved_type(&self) -> Option<&ResolvedType> {
        self.resolved.as_ref()
    }

    pub fn type_class_metadata(&self) -> Option<&ClassRef> {
        self.type_class.as_ref()
    }

    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    pub fn set_extension(&mut self, key: &str, value: &str) -> &mut Self {
        self.extensions.insert(key.to_string(), value.to_string());
        self
    }

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

    pub fn container(&self) -> Option<&ContainerMetaData> {
        self.container.as_ref()
    }

    pub fn set_container(&mut self, container: impl Into<ContainerMetaData>) -> &mut Self {
        let mut container = container.into();
        container.attach(Parent::Member(self.id));
        self.container = Some(container);
        self
    }

    pub fn collection(&self) -> Option<&super::CollectionMetaData> {
        self.container.as_ref()?.as_collection()
    }

    pub fn map(&self) -> Option<&super::MapMetaData> {
        self.container.as_ref()?.as_map()
    }

    pub fn array(&self) -> Option<&super::ArrayMetaData> {
        self.container.as_ref()?.as_array()
    }

    pub fn element(&self) -> Option<&ElementMetaData> {
        self.element.as_ref()
    }

    pub fn set_element(&mut self, mut element: ElementMetaData) -> &mut Self {
        element.attach(Parent::Member(self.id));
        self.element = Some(element);
        self
    }

    pub fn key(&self) -> Option<&KeyMetaData> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, mut key: KeyMetaData) -> &mut Self {
        key.attach(Parent::Member(self.id));
        self.key = Some(key);
        self
    }

    pub fn value(&self) -> Option<&ValueMetaData> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, mut value: ValueMetaData) -> &mut Self {
        value.attach(Parent::Member(self.id));
        self.value = Some(value);
        self
    }

    pub fn join(&self) -> Option<&JoinMetaData> {
        self.join.as_ref()
    }

    pub fn set_join(&mut self, mut join: JoinMetaData) -> &mut Self {
        join.attach(Parent::Member(self.id));
        self.join = Some(join);
        self
    }

    pub fn order(&self) -> Option<&OrderMetaData> {
        self.order.as_ref()
    }

    pub fn set_order(&mut self, mut order: OrderMetaData) -> &mut Self {
        order.attach(Parent::Member(self.id));
        self.order = Some(order);
        self
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    pub fn index(&self) -> Option<&IndexMetaData> {
        self.index.as_ref()
    }

    pub fn unique_constraint(&self) -> Option<&UniqueMetaData> {
        self.unique_constraint.as_ref()
    }

    /// Holds several values: has a container block or a container type.
    pub fn is_multi_valued(&self) -> bool {
        self.container.is_some()
            || self
                .resolved
                .as_ref()
                .is_some_and(|ty| ContainerMetaData::for_type(ty).is_some())
    }

    /// Re-attaches every child after the member's id changed.
    pub(crate) fn set_id(&mut self, id: MemberId) {
        self.id = id;
        let parent = Parent::Member(id);
        self.node.attach(Parent::Class(id.class));
        if let Some(container) = &mut self.container {
            container.attach(parent);
        }
        if let Some(element) = &mut self.element {
            element.attach(parent);
        }
        if let Some(key) = &mut self.key {
            key.attach(parent);
        }
        if let Some(value) = &mut self.value {
            value.attach(parent);
        }
        if let Some(join) = &mut self.join {
            join.attach(parent);
        }
        if let Some(order) = &mut self.order {
            order.attach(parent);
        }
    }

    pub(crate) fn populate(
        &mut self,
        cx: &Cx<'_>,
        class: &str,
        package: Option<&str>,
        table: Option<&str>,
    ) -> Result<()> {
        self.node
            .begin_populate(&format!("member `{class}.{}`", self.name));
        let _span = tracing::debug_span!("populate_member", class, member = %self.name).entered();

        if let Some(type_name) = self.type_name.clone() {
            let Some(resolved) = cx.resolve_type(&type_name, package) else {
                return Err(Error::invalid_member(
                    class,
                    &self.name,
                    format!("type `{type_name}` cannot be resolved"),
                ));
            };
            self.type_name = Some(resolved.name.clone());
            self.type_class = match resolved.kind {
                TypeKind::Class | TypeKind::Interface => cx.class_for(&resolved),
                _ => None,
            };
            self.resolved = Some(resolved);
        }

        if self.container.is_none() {
            let synthesized = self.resolved.as_ref().and_then(ContainerMetaData::for_type);
            if let Some(mut container) = synthesized {
                container.attach(Parent::Member(self.id));
                self.container = Some(container);
            }
        }

        let Self {
            ref name,
            ref generic_args,
            ref extensions,
            ref resolved,
            table: ref join_table,
            ref mut container,
            ref mut element,
            ref mut key,
            ref mut value,
            ref mut join,
            ref mut order,
            ..
        } = *self;

        let has_embedded = |base: Option<&super::ElementBase>| {
            base.is_some_and(|base| base.embedded.is_some())
        };
        let scope = MemberScope {
            class,
            package,
            member: name,
            declared: resolved.as_ref(),
            has_join: join.is_some(),
            table: join_table.as_deref().or(table),
            resolver: cx.resolver,
            generic_args,
            extensions,
            embedded_blocks: [
                has_embedded(element.as_deref()),
                has_embedded(key.as_deref()),
                has_embedded(value.as_deref()),
            ],
        };

        if let Some(container) = container.as_mut() {
            container.populate(cx, &scope)?;
        }
        if let Some(element) = element.as_mut() {
            element.populate(&scope, container.as_ref())?;
        }
        if let Some(key) = key.as_mut() {
            key.populate(&scope, container.as_ref())?;
        }
        if let Some(value) = value.as_mut() {
            value.populate(&scope, container.as_ref())?;
        }
        if let Some(order) = order.as_mut() {
            let element_class = container
                .as_ref()
                .and_then(|container| container.target_component().class_metadata());
            order.populate(&scope, element_class.map(|class| &**class))?;
        }
        if let Some(join) = join.as_mut() {
            join.populate_for_member(&scope)?;
        }

        self.node.finish_populate();
        Ok(())
    }

    pub(crate) fn initialise(
        &mut self,
        cx: &Cx<'_>,
        class: &str,
        package: Option<&str>,
        table: Option<&str>,
    ) {
        self.node
            .begin_initialise(&format!("member `{class}.{}`", self.name), true);

        let Self {
            ref name,
            ref generic_args,
            ref extensions,
            ref resolved,
            table: ref join_table,
            ref columns,
            ref mut container,
            ref mut element,
            ref mut key,
            ref mut value,
            ref mut join,
            ref mut order,
            ref mut foreign_key,
            indexed,
            unique,
            ref mut index,
            ref mut unique_constraint,
            ..
        } = *self;

        let scope = MemberScope {
            class,
            package,
            member: name,
            declared: resolved.as_ref(),
            has_join: join.is_some(),
            table: join_table.as_deref().or(table),
            resolver: cx.resolver,
            generic_args,
            extensions,
            embedded_blocks: [false; 3],
        };

        if let Some(container) = container.as_mut() {
            container.initialise(&scope);
        }
        if let Some(element) = element.as_mut() {
            element.initialise(&scope);
        }
        if let Some(key) = key.as_mut() {
            key.initialise(&scope);
        }
        if let Some(value) = value.as_mut() {
            value.initialise(&scope);
        }
        if let Some(order) = order.as_mut() {
            order.initialise(&scope);
        }
        if let Some(join) = join.as_mut() {
            join.initialise(table);
        }

        let column_names = columns.column_names();
        *index = indexed.and_then(|indexed| {
            let mut built = indexed.index_for(column_names.clone())?;
            if column_names.is_empty() {
                built.add_member(name.as_str());
            }
            built.default_table(table);
            Some(built)
        });

        if unique {
            let mut constraint = UniqueMetaData::over_columns(column_names.clone());
            if column_names.is_empty() {
                constraint.add_member(name.as_str());
            }
            constraint.default_table(table);
            *unique_constraint = Some(constraint);
        }

        if let Some(fk) = foreign_key.as_mut() {
            fk.default_table(table);
        }

        self.relation_type = self.derive_relation_type(cx, class);

        self.node.finish_initialise();
    }

    /// The other side is a registry lookup and may still be raw: it is read
    /// through its declared types only.
    fn derive_relation_type(&self, cx: &Cx<'_>, class: &str) -> RelationType {
        if let Some(container) = &self.container {
            let Some(target) = container.target_component().class_metadata() else {
                return RelationType::None;
            };
            return match &self.mapped_by {
                None => RelationType::OneToManyUni,
                Some(mapped_by) => match target.member(mapped_by) {
                    Some(other) if other.holds_several(cx, target.package.as_deref()) => {
                        RelationType::ManyToManyBi
                    }
                    _ => RelationType::OneToManyBi,
                },
            };
        }

        let Some(target) = &self.type_class else {
            return RelationType::None;
        };

        if self.mapped_by.is_some() {
            return RelationType::OneToOneBi;
        }

        // The other side may own the relation as a collection of this class.
        let package = target.package.as_deref();
        let owned_by_collection = target.members().iter().any(|other| {
            other.mapped_by.as_deref() == Some(self.name.as_str())
                && other.collection_element_type(cx, package).as_deref() == Some(class)
        });

        if owned_by_collection {
            RelationType::ManyToOneBi
        } else if self.join.is_some() {
            RelationType::ManyToOneUni
        } else {
            RelationType::OneToOneUni
        }
    }

    /// The member's declared type, resolved now if populate has not run.
    fn declared_type(&self, cx: &Cx<'_>, package: Option<&str>) -> Option<ResolvedType> {
        match &self.resolved {
            Some(resolved) => Some(resolved.clone()),
            None => cx.resolve_type(self.type_name.as_deref()?, package),
        }
    }

    fn holds_several(&self, cx: &Cx<'_>, package: Option<&str>) -> bool {
        self.container.is_some()
            || self
                .declared_type(cx, package)
                .is_some_and(|ty| ContainerMetaData::for_type(&ty).is_some())
    }

    /// Qualified element type of a collection member, taken from its
    /// collection block or else its first generic argument.
    fn collection_element_type(&self, cx: &Cx<'_>, package: Option<&str>) -> Option<String> {
        let declared = match &self.container {
            Some(ContainerMetaData::Collection(collection)) => collection
                .element_type()
                .or_else(|| self.generic_args.first().map(String::as_str))?,
            Some(_) => return None,
            None => {
                let ty = self.declared_type(cx, package)?;
                if !matches!(ty.kind, TypeKind::Collection(_)) {
                    return None;
                }
                self.generic_args.first()?.as_str()
            }
        };

        if let Some(resolved) = cx.resolve_type(declared, package) {
            return Some(resolved.name);
        }
        Some(match package {
            Some(package) if !str::is_qualified(declared) => str::qualify(package, declared),
            _ => declared.to_string(),
        })
    }
}

impl MemberScope<'_> {
    pub(crate) fn invalid(&self, message: impl Into<String>) -> Error {
        Error::invalid_member(self.class, self.member, message)
    }

    pub(crate) fn fatal(&self, message: impl Into<String>) -> Error {
        Error::fatal_metadata(self.class, self.member, message)
    }

    pub(crate) fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    /// The declared generic argument for `role`, if the member has one.
    pub(crate) fn generic_arg(&self, role: Role) -> Option<&str> {
        let index = match role {
            Role::Element | Role::Key => 0,
            Role::Value => 1,
        };
        self.generic_args.get(index).map(String::as_str)
    }

    /// Type assumed for a role whose block names none.
    pub(crate) fn default_type(&self, cx: &Cx<'_>, role: Role) -> String {
        self.generic_arg(role)
            .map(String::from)
            .unwrap_or_else(|| cx.options.top_type.clone())
    }

    pub(crate) fn has_embedded_block(&self, role: Role) -> bool {
        match role {
            Role::Element => self.embedded_blocks[0],
            Role::Key => self.embedded_blocks[1],
            Role::Value => self.embedded_blocks[2],
        }
    }

    /// Interfaces and the top type are stored by reference only.
    pub(crate) fn is_reference_type(&self, ty: &ResolvedType) -> bool {
        self.resolver.is_interface_or_top_type(ty)
    }
}

impl MemberId {
    pub(crate) const fn placeholder() -> Self {
        Self {
            class: ClassId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl From<&MemberMetaData> for MemberId {
    fn from(value: &MemberMetaData) -> Self {
        value.id
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "MemberId({}/{})", self.class.0, self.index)
    }
}

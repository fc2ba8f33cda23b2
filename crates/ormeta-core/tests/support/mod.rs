#![allow(dead_code)]

use ormeta_core::meta::*;
use ormeta_core::Result;

use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::sync::Arc;

/// An in-memory type universe acting as both resolver and registry.
pub struct World {
    types: IndexMap<String, ResolvedType>,
    persistable: HashSet<String>,
    default_embedded: HashSet<String>,

    /// Metadata known without discovery
    registered: IndexMap<String, ClassRef>,

    /// Metadata only found through discovery
    discoverable: IndexMap<String, ClassRef>,

    /// Discovery of these types fails
    broken: HashSet<String>,

    depth: Cell<usize>,

    /// Every class-loader hint passed to `resolve`
    pub hints: RefCell<Vec<Option<String>>>,

    pub entered: Cell<usize>,
    pub exited: Cell<usize>,
    pub discoveries: Cell<usize>,
}

impl World {
    /// Built-in types plus a small `shop` model.
    pub fn new() -> World {
        init_tracing();

        let mut world = World {
            types: IndexMap::new(),
            persistable: HashSet::new(),
            default_embedded: HashSet::new(),
            registered: IndexMap::new(),
            discoverable: IndexMap::new(),
            broken: HashSet::new(),
            depth: Cell::new(0),
            hints: RefCell::new(vec![]),
            entered: Cell::new(0),
            exited: Cell::new(0),
            discoveries: Cell::new(0),
        };

        world.add("java.lang.Object", TypeKind::Top);
        world.add("java.lang.String", TypeKind::Class);
        world.add("java.lang.Integer", TypeKind::Class);
        world.add("java.lang.Long", TypeKind::Class);
        world.add("int", TypeKind::Primitive);
        world.add("long", TypeKind::Primitive);
        world.add("java.util.Date", TypeKind::DateTime);
        for name in ["java.lang.String", "java.lang.Integer", "java.lang.Long", "int", "long"] {
            world.default_embedded.insert(name.to_string());
        }

        world.add("java.util.Collection", TypeKind::Collection(ContainerImpl::Abstract));
        world.add("java.util.List", TypeKind::Collection(ContainerImpl::Abstract));
        world.add("java.util.Set", TypeKind::Collection(ContainerImpl::Abstract));
        world.add("java.util.ArrayList", TypeKind::Collection(ContainerImpl::ListLike));
        world.add("java.util.HashSet", TypeKind::Collection(ContainerImpl::HashSetLike));
        world.add("java.util.LinkedHashSet", TypeKind::Collection(ContainerImpl::LinkedHashSetLike));
        world.add("java.util.TreeSet", TypeKind::Collection(ContainerImpl::Sorted));
        world.add("java.util.Optional", TypeKind::Collection(ContainerImpl::Optional));
        world.add("java.util.Map", TypeKind::Map(ContainerImpl::Abstract));
        world.add("java.util.HashMap", TypeKind::Map(ContainerImpl::HashMapLike));
        world.add("java.util.Hashtable", TypeKind::Map(ContainerImpl::HashtableLike));

        world.add_array("int");
        world.add_array("java.lang.String");

        // Interface implemented by the shape classes
        world.add("shop.Shape", TypeKind::Interface);
        world.add("shop.Circle", TypeKind::Class);
        world.add("shop.Square", TypeKind::Class);
        world.persistable.insert("shop.Circle".to_string());
        world.persistable.insert("shop.Square".to_string());

        // Concrete value type that is not mapped
        world.add("shop.Money", TypeKind::Class);

        let mut address = ClassMetaData::new("shop.Address");
        address.embedded_only = true;
        address.add_member(MemberMetaData::typed("street", "java.lang.String"));
        address.add_member(MemberMetaData::typed("city", "java.lang.String"));
        world.register(address);

        let mut person = ClassMetaData::new("shop.Person");
        let mut surname = MemberMetaData::typed("surname", "java.lang.String");
        surname.primary_key = true;
        let mut given = MemberMetaData::typed("given", "java.lang.String");
        given.primary_key = true;
        person.add_member(MemberMetaData::typed("name", "java.lang.String"));
        person.add_member(surname);
        person.add_member(MemberMetaData::typed("age", "int"));
        person.add_member(given);
        world.register(person);

        let mut customer = ClassMetaData::new("shop.Customer");
        let mut id = MemberMetaData::typed("id", "long");
        id.primary_key = true;
        customer.add_member(id);
        customer.add_member(MemberMetaData::typed("name", "java.lang.String"));
        world.discoverable_class(customer);

        world
    }

    pub fn add(&mut self, name: &str, kind: TypeKind) {
        self.types
            .insert(name.to_string(), ResolvedType::new(name, kind));
    }

    pub fn add_array(&mut self, element: &str) {
        let element = self.types[element].clone();
        let name = format!("{}[]", element.name);
        self.add(&name, TypeKind::Array(Box::new(element)));
    }

    /// Adds a mapped class the registry already knows.
    pub fn register(&mut self, class: ClassMetaData) -> ClassRef {
        let name = class.full_name();
        self.add(&name, TypeKind::Class);
        self.persistable.insert(name.clone());
        let class = Arc::new(class);
        self.registered.insert(name, class.clone());
        class
    }

    /// Adds a mapped class that is only found through discovery.
    pub fn discoverable_class(&mut self, class: ClassMetaData) {
        let name = class.full_name();
        self.add(&name, TypeKind::Class);
        self.persistable.insert(name.clone());
        self.discoverable.insert(name, Arc::new(class));
    }

    /// Adds a persistable type whose discovery fails.
    pub fn broken_class(&mut self, name: &str) {
        self.add(name, TypeKind::Class);
        self.persistable.insert(name.to_string());
        self.broken.insert(name.to_string());
    }

    pub fn build(&self, classes: Vec<ClassMetaData>) -> Result<Vec<ClassMetaData>> {
        Builder::new().build(classes, self, self)
    }

    /// Builds a single class and returns it.
    pub fn build_one(&self, class: ClassMetaData) -> Result<ClassMetaData> {
        let mut classes = self.build(vec![class])?;
        Ok(classes.remove(0))
    }
}

impl TypeResolver for World {
    fn resolve(&self, name: &str, hint: Option<&str>) -> Option<ResolvedType> {
        self.hints.borrow_mut().push(hint.map(String::from));
        self.types.get(name).cloned()
    }

    fn is_persistable(&self, ty: &ResolvedType) -> bool {
        self.persistable.contains(&ty.name)
    }

    fn is_default_embedded_type(&self, ty: &ResolvedType) -> bool {
        self.default_embedded.contains(&ty.name)
    }
}

impl MetaDataRegistry for World {
    fn metadata_for_type(&self, name: &str) -> Option<ClassRef> {
        self.registered.get(name).cloned()
    }

    fn discover_metadata_for_type(
        &self,
        name: &str,
        _scope: &Privileged<'_>,
    ) -> anyhow::Result<Option<ClassRef>> {
        assert_eq!(self.depth.get(), 1, "discovery outside a privileged scope");
        self.discoveries.set(self.discoveries.get() + 1);

        if self.broken.contains(name) {
            anyhow::bail!("failed to load `{name}`");
        }
        Ok(self.discoverable.get(name).cloned())
    }

    fn enter_privileged(&self) {
        self.depth.set(self.depth.get() + 1);
        self.entered.set(self.entered.get() + 1);
    }

    fn exit_privileged(&self) {
        self.depth.set(self.depth.get() - 1);
        self.exited.set(self.exited.get() + 1);
    }
}

/// A class `shop.Order` with the given members.
pub fn order_with(members: impl IntoIterator<Item = MemberMetaData>) -> ClassMetaData {
    let mut class = ClassMetaData::new("shop.Order");
    class.table = Some("ORDERS".to_string());
    let mut id = MemberMetaData::typed("id", "long");
    id.primary_key = true;
    class.add_member(id);
    for member in members {
        class.add_member(member);
    }
    class
}

/// A member declared as `container<args...>`.
pub fn container_member(name: &str, container: &str, args: &[&str]) -> MemberMetaData {
    let mut member = MemberMetaData::typed(name, container);
    for arg in args {
        member.add_generic_arg(arg);
    }
    member
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

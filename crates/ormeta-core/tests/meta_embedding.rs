mod support;

use ormeta_core::meta::*;
use pretty_assertions::assert_eq;
use std_util::prelude::*;
use support::*;

fn lines_of(world: &World, member: MemberMetaData) -> MemberMetaData {
    let class = assert_ok!(world.build_one(order_with([member])));
    class.member("lines").unwrap().clone()
}

/// `lines` declared as a list with an explicit collection block.
fn list_with(element: &str, embedded: Option<bool>, dependent: Option<bool>) -> MemberMetaData {
    let mut collection = CollectionMetaData::new();
    collection.set_element_type(element);
    collection.element_mut().embedded = embedded;
    collection.element_mut().dependent = dependent;

    let mut member = MemberMetaData::typed("lines", "java.util.List");
    member.set_container(collection);
    member
}

#[test]
fn embedding_defaults_follow_element_type() {
    let world = World::new();

    for (element, expected) in [
        // mapped, not embedded-only
        ("shop.Person", false),
        // mapped, embedded-only
        ("shop.Address", true),
        // interface
        ("shop.Shape", false),
        // concrete and unmapped
        ("shop.Money", true),
    ] {
        let member = lines_of(&world, container_member("lines", "java.util.List", &[element]));
        let collection = member.collection().unwrap();
        assert_eq!(collection.is_embedded_element(), expected, "element `{element}`");
    }
}

#[test]
fn list_of_value_type_end_to_end() {
    let world = World::new();

    let mut member = container_member("payments", "java.util.List", &["Money"]);
    member.set_element(ElementMetaData::new());

    let class = assert_ok!(world.build_one(order_with([member])));
    let member = class.member("payments").unwrap();
    let collection = member.collection().unwrap();

    assert!(collection.is_embedded_element());
    assert_eq!(collection.element_type(), Some("shop.Money"));
    assert!(collection.element_class_metadata().is_none());

    let element = member.element().unwrap();
    assert!(element.is_initialised());
    assert!(element.columns().is_empty());
    assert_eq!(element.column_name(), None);
    assert_eq!(member.relation_type(), RelationType::None);
}

#[test]
fn not_embedded_unmapped_element_is_corrected() {
    let world = World::new();

    let member = lines_of(&world, list_with("shop.Money", Some(false), None));
    assert!(member.collection().unwrap().is_embedded_element());

    let member = lines_of(&world, list_with("shop.Person", Some(false), None));
    assert!(!member.collection().unwrap().is_embedded_element());
}

#[test]
fn dependent_only_kept_for_relations() {
    let world = World::new();

    let member = lines_of(&world, list_with("java.lang.String", None, Some(true)));
    assert!(!member.collection().unwrap().is_dependent_element());

    let member = lines_of(&world, list_with("shop.Person", None, Some(true)));
    assert!(member.collection().unwrap().is_dependent_element());

    let member = lines_of(&world, list_with("shop.Shape", None, Some(true)));
    assert!(member.collection().unwrap().is_dependent_element());
}

#[test]
fn embedded_definition_forces_embedding() {
    let world = World::new();

    let mut element = ElementMetaData::new();
    element.embedded = Some(EmbeddedMetaData::new());

    let mut member = container_member("lines", "java.util.List", &["shop.Person"]);
    member.set_element(element);

    let member = lines_of(&world, member);
    assert!(member.collection().unwrap().is_embedded_element());
}

#[test]
fn embedded_definition_on_interface_is_rejected() {
    let world = World::new();

    let mut element = ElementMetaData::new();
    element.embedded = Some(EmbeddedMetaData::new());

    let mut member = container_member("lines", "java.util.List", &["shop.Shape"]);
    member.set_element(element);

    let err = assert_err!(
        world.build_one(order_with([member])),
        contains = ["shop.Order.lines", "shop.Shape", "embedded"]
    );
    assert!(err.is_invalid_member());
}

#[test]
fn join_table_element_gets_placeholder_embedding() {
    let world = World::new();

    let mut member = container_member("lines", "java.util.List", &["shop.Address"]);
    member.set_join(JoinMetaData::new());
    member.set_element(ElementMetaData::new());

    let class = assert_ok!(world.build_one(order_with([member])));
    let member = class.member("lines").unwrap();
    let element = member.element().unwrap();
    let embedded = element.embedded.as_ref().unwrap();
    assert!(embedded.is_placeholder());
    assert!(member.join().unwrap().is_initialised());
}

#[test]
fn no_placeholder_for_unmapped_join_element() {
    let world = World::new();

    let mut member = container_member("lines", "java.util.List", &["shop.Money"]);
    member.set_join(JoinMetaData::new());
    member.set_element(ElementMetaData::new());

    let member = lines_of(&world, member);
    assert!(member.element().unwrap().embedded.is_none());
}

#[test]
fn discovery_runs_in_privileged_scope() {
    let world = World::new();

    let member = lines_of(
        &world,
        container_member("lines", "java.util.List", &["shop.Customer"]),
    );
    let collection = member.collection().unwrap();

    assert_eq!(world.discoveries.get(), 1);
    assert_eq!(world.entered.get(), 1);
    assert_eq!(world.exited.get(), 1);
    assert_eq!(
        collection.element_class_metadata().unwrap().full_name(),
        "shop.Customer"
    );
    assert!(!collection.is_embedded_element());
    assert_eq!(member.relation_type(), RelationType::OneToManyUni);
}

#[test]
fn registered_types_skip_discovery() {
    let world = World::new();

    lines_of(
        &world,
        container_member("lines", "java.util.List", &["shop.Person"]),
    );
    assert_eq!(world.discoveries.get(), 0);
    assert_eq!(world.entered.get(), 0);
}

#[test]
fn failed_discovery_treated_as_unmapped() {
    let mut world = World::new();
    world.broken_class("shop.Legacy");

    let member = lines_of(
        &world,
        container_member("lines", "java.util.List", &["shop.Legacy"]),
    );
    let collection = member.collection().unwrap();

    assert_eq!(world.discoveries.get(), 1);
    assert_eq!(world.exited.get(), 1);
    assert!(collection.element_class_metadata().is_none());
    assert!(collection.is_embedded_element());
}

mod support;

use ormeta_core::meta::*;
use pretty_assertions::assert_eq;
use std_util::prelude::*;
use support::*;

#[test]
fn shorthand_synthesizes_one_column() {
    let mut element = ElementMetaData::new();
    element.set_column_name("LINE_ID");

    assert_eq!(element.columns().len(), 1);
    assert_eq!(element.columns()[0].name(), Some("LINE_ID"));
    assert_eq!(element.column_name(), Some("LINE_ID"));
}

#[test]
fn shorthand_renames_sole_column() {
    let mut column = ColumnMetaData::named("ID");
    column.set_length(20);

    let mut key = KeyMetaData::new();
    key.add_column(column);
    key.set_column_name("CODE");

    assert_eq!(key.columns().len(), 1);
    assert_eq!(key.columns()[0].name(), Some("CODE"));
    assert_eq!(key.columns()[0].length(), Some(20));
}

#[test]
fn shorthand_reads_first_column() {
    let mut value = ValueMetaData::new();
    value
        .add_column(ColumnMetaData::named("A"))
        .add_column(ColumnMetaData::named("B"));
    assert_eq!(value.column_name(), Some("A"));
}

#[test]
fn shorthand_leaves_multi_column_block_alone() {
    let mut element = ElementMetaData::new();
    element
        .add_column(ColumnMetaData::named("A"))
        .add_column(ColumnMetaData::named("B"));
    element.set_column_name("C");

    // The two representations diverge.
    assert_eq!(element.column_name(), Some("C"));
    let names: Vec<_> = element.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, [Some("A"), Some("B")]);
}

#[test]
fn non_positive_sizes_are_dropped() {
    let mut column = ColumnMetaData::new();
    column.set_length(0).set_scale(-2);
    assert_eq!(column.length(), None);
    assert_eq!(column.scale(), None);

    column.set_length(12).set_scale(2);
    assert_eq!(column.length(), Some(12));
    assert_eq!(column.scale(), Some(2));
}

#[test]
fn unknown_jdbc_type_is_ignored() {
    init_tracing();

    let mut column = ColumnMetaData::new();
    column.set_jdbc_type_name("varchar");
    assert_eq!(column.jdbc_type, Some(JdbcType::VarChar));

    column.set_jdbc_type_name("GEOMETRY");
    assert_eq!(column.jdbc_type, Some(JdbcType::VarChar));
}

#[test]
fn fk_definition_clears_actions() {
    let mut fk = ForeignKeyMetaData::new();
    fk.set_delete_action(Some(ForeignKeyAction::Cascade))
        .set_update_action(Some(ForeignKeyAction::Restrict));
    fk.set_fk_definition("FOREIGN KEY (ORDER_ID) REFERENCES ORDERS (ID)");

    assert_eq!(fk.delete_action(), None);
    assert_eq!(fk.update_action(), None);
    assert_eq!(
        fk.fk_definition(),
        Some("FOREIGN KEY (ORDER_ID) REFERENCES ORDERS (ID)")
    );
}

#[test]
fn element_flags_become_constraints() {
    let world = World::new();

    let mut element = ElementMetaData::new();
    element.set_column_name("PERSON_ID");
    element.indexed = Some(IndexedValue::Unique);
    element.unique = true;
    element.delete_action = Some(ForeignKeyAction::Nullify);
    element.table = Some("ORDER_PEOPLE".to_string());

    let mut member = container_member("people", "java.util.List", &["shop.Person"]);
    member.set_element(element);

    let class = assert_ok!(world.build_one(order_with([member])));
    let element = class.member("people").unwrap().element().unwrap();

    let index = element.index().unwrap();
    assert!(index.unique);
    assert_eq!(index.column_names(), ["PERSON_ID"]);
    assert_eq!(index.table.as_deref(), Some("ORDER_PEOPLE"));

    let unique = element.unique_constraint().unwrap();
    assert_eq!(unique.column_names(), ["PERSON_ID"]);
    assert_eq!(unique.table.as_deref(), Some("ORDER_PEOPLE"));

    let fk = element.foreign_key.as_ref().unwrap();
    assert_eq!(fk.delete_action(), Some(ForeignKeyAction::Nullify));
    assert_eq!(fk.update_action(), None);
    assert_eq!(fk.columns()[0].name(), Some("PERSON_ID"));
    assert_eq!(fk.table.as_deref(), Some("ORDER_PEOPLE"));
}

#[test]
fn constraints_under_a_member_default_to_its_tables() {
    let world = World::new();

    let flagged = || {
        let mut element = ElementMetaData::new();
        element.indexed = Some(IndexedValue::True);
        element.unique = true;
        element.delete_action = Some(ForeignKeyAction::Cascade);

        let mut order = OrderMetaData::new();
        order.indexed = Some(IndexedValue::True);

        let mut member = container_member("people", "java.util.List", &["shop.Person"]);
        member.set_element(element);
        member.set_order(order);
        member
    };

    // The join table wins over the class table.
    let mut joined = flagged();
    joined.table = Some("ORDER_PEOPLE".to_string());
    let class = assert_ok!(world.build_one(order_with([joined])));
    let member = class.member("people").unwrap();
    let element = member.element().unwrap();
    assert_eq!(element.index().unwrap().table.as_deref(), Some("ORDER_PEOPLE"));
    assert_eq!(
        element.unique_constraint().unwrap().table.as_deref(),
        Some("ORDER_PEOPLE")
    );
    assert_eq!(
        element.foreign_key.as_ref().unwrap().table.as_deref(),
        Some("ORDER_PEOPLE")
    );
    assert_eq!(
        member.order().unwrap().index().unwrap().table.as_deref(),
        Some("ORDER_PEOPLE")
    );

    // Without a join table, the class table.
    let class = assert_ok!(world.build_one(order_with([flagged()])));
    let member = class.member("people").unwrap();
    let element = member.element().unwrap();
    assert_eq!(element.index().unwrap().table.as_deref(), Some("ORDERS"));
    assert_eq!(
        element.unique_constraint().unwrap().table.as_deref(),
        Some("ORDERS")
    );
    assert_eq!(
        member.order().unwrap().index().unwrap().table.as_deref(),
        Some("ORDERS")
    );
}

#[test]
fn explicit_fk_is_kept() {
    let world = World::new();

    let mut fk = ForeignKeyMetaData::new();
    fk.set_fk_definition("FOREIGN KEY (PERSON_ID) REFERENCES PERSON (ID) ON DELETE CASCADE");

    let mut element = ElementMetaData::new();
    element.foreign_key = Some(fk);
    element.delete_action = Some(ForeignKeyAction::Restrict);

    let mut member = container_member("people", "java.util.List", &["shop.Person"]);
    member.set_element(element);

    let class = assert_ok!(world.build_one(order_with([member])));
    let fk = class
        .member("people")
        .unwrap()
        .element()
        .unwrap()
        .foreign_key
        .as_ref()
        .unwrap();
    assert_eq!(fk.delete_action(), None);
    assert!(fk.fk_definition().is_some());
}

#[test]
fn member_flags_become_constraints() {
    let world = World::new();

    let mut reference = MemberMetaData::typed("reference", "java.lang.String");
    reference.unique = true;
    reference.indexed = Some(IndexedValue::True);

    let mut code = MemberMetaData::typed("code", "java.lang.String");
    code.set_column_name("ORDER_CODE");
    code.indexed = Some(IndexedValue::True);

    let class = assert_ok!(world.build_one(order_with([reference, code])));

    let reference = class.member("reference").unwrap();
    let unique = reference.unique_constraint().unwrap();
    assert_eq!(unique.member_names(), ["reference"]);
    assert_eq!(unique.table.as_deref(), Some("ORDERS"));
    assert_eq!(reference.index().unwrap().member_names(), ["reference"]);

    let code = class.member("code").unwrap();
    assert_eq!(code.index().unwrap().column_names(), ["ORDER_CODE"]);
    assert!(code.unique_constraint().is_none());
}

#[test]
fn primary_key_shorthand() {
    let mut pk = PrimaryKeyMetaData::new();
    pk.set_column_name("ORDER_ID");
    assert_eq!(pk.columns().len(), 1);
    assert_eq!(pk.column_name(), Some("ORDER_ID"));

    let mut class = order_with([]);
    class.set_primary_key(pk);
    assert_eq!(class.primary_key().unwrap().column_name(), Some("ORDER_ID"));
    assert_eq!(class.primary_key_members().count(), 1);
}

use super::{
    member::MemberScope, ClassMetaData, ColumnList, ColumnMetaData, IndexMetaData, IndexedValue,
    Node,
};
use crate::Result;

use std_util::str;

/// Ordering of a list member.
///
/// Without an `ordering` clause the list is indexed: positions are kept in a
/// surrogate column. With one, the list is ordered by fields of the element.
#[derive(Debug, Clone, Default)]
pub struct OrderMetaData {
    node: Node,

    /// Comma separated `field [ASC|DESC]` clauses, or `#PK`
    ordering: Option<String>,

    columns: ColumnList,

    pub indexed: Option<IndexedValue>,

    /// Element member holding the position, for relations owned by the other side
    pub mapped_by: Option<String>,

    field_orders: Vec<FieldOrder>,

    /// Derived from `indexed` during initialise
    index: Option<IndexMetaData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOrder {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering by the primary key members of the element class.
const PK_ORDERING: &str = "#PK";

impl_descriptor!(OrderMetaData);

impl OrderMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ordered_by(ordering: &str) -> Self {
        let mut order = Self::default();
        order.set_ordering(ordering);
        order
    }

    pub fn ordering(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    pub fn set_ordering(&mut self, ordering: &str) -> &mut Self {
        self.ordering = str::non_blank(ordering).map(String::from);
        self
    }

    pub fn is_indexed_list(&self) -> bool {
        self.ordering.is_none()
    }

    pub fn field_orders(&self) -> &[FieldOrder] {
        &self.field_orders
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

    pub fn index(&self) -> Option<&IndexMetaData> {
        self.index.as_ref()
    }

    pub(crate) fn attach(&mut self, parent: super::Parent) {
        self.node.attach(parent);
    }

    /// Parses the ordering clause. Field names are checked against
    /// `element_class` when the element type is mapped.
    pub(crate) fn populate(
        &mut self,
        scope: &MemberScope<'_>,
        element_class: Option<&ClassMetaData>,
    ) -> Result<()> {
        self.node
            .begin_populate(&format!("order of `{}`", scope.member));

        self.field_orders.clear();
        if let Some(ordering) = &self.ordering {
            self.field_orders = parse_ordering(ordering, scope, element_class)?;
        }

        self.node.finish_populate();
        Ok(())
    }

    pub(crate) fn initialise(&mut self, scope: &MemberScope<'_>) {
        self.node
            .begin_initialise(&format!("order of `{}`", scope.member), true);

        if self.is_indexed_list() {
            if self.columns.is_empty() && self.mapped_by.is_none() {
                self.columns.add_column(ColumnMetaData::new());
            }

            self.index = self.indexed.and_then(|indexed| {
                let mut index = indexed.index_for(self.columns.column_names())?;
                if index.number_of_columns() == 0 {
                    index.add_member(scope.member);
                }
                index.default_table(scope.table);
                Some(index)
            });
        }

        self.node.finish_initialise();
    }
}

fn parse_ordering(
    ordering: &str,
    scope: &MemberScope<'_>,
    element_class: Option<&ClassMetaData>,
) -> Result<Vec<FieldOrder>> {
    let mut field_orders = vec![];

    for clause in str::split_list(ordering) {
        let mut tokens = clause.split_whitespace();
        let Some(field) = tokens.next() else {
            continue;
        };

        let direction = match tokens.next() {
            None => Direction::Ascending,
            Some(token) => Direction::parse(token).ok_or_else(|| {
                scope.invalid(format!(
                    "unknown ordering direction `{token}` in `{clause}`"
                ))
            })?,
        };

        if let Some(extra) = tokens.next() {
            return Err(scope.invalid(format!(
                "unexpected `{extra}` in ordering clause `{clause}`"
            )));
        }

        if field.eq_ignore_ascii_case(PK_ORDERING) {
            let Some(class) = element_class else {
                return Err(scope.invalid(format!(
                    "`{PK_ORDERING}` ordering requires a mapped element type"
                )));
            };
            field_orders.extend(class.primary_key_members().map(|member| FieldOrder {
                field: member.name.clone(),
                direction,
            }));
            continue;
        }

        if let Some(class) = element_class {
            if class.member(field).is_none() {
                return Err(scope.invalid(format!(
                    "ordering field `{field}` is not a member of `{}`",
                    class.full_name()
                )));
            }
        }

        field_orders.push(FieldOrder {
            field: field.to_string(),
            direction,
        });
    }

    Ok(field_orders)
}

impl Direction {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") || token.eq_ignore_ascii_case("ascending") {
            Some(Self::Ascending)
        } else if token.eq_ignore_ascii_case("desc") || token.eq_ignore_ascii_case("descending") {
            Some(Self::Descending)
        } else {
            None
        }
    }

    pub fn is_forward(self) -> bool {
        self == Self::Ascending
    }
}

impl FieldOrder {
    pub fn is_forward(&self) -> bool {
        self.direction.is_forward()
    }
}

use super::ColumnList;

/// How a value is laid out when stored inline in its owner's table.
///
/// An empty definition is a placeholder: the value is embedded, but every
/// member keeps its default column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMetaData {
    /// Member of the embedded type that points back at the owner.
    pub owner_member: Option<String>,

    /// Column whose null value means "no embedded object".
    pub null_indicator_column: Option<String>,

    pub null_indicator_value: Option<String>,

    /// Per-member column overrides.
    pub members: Vec<EmbeddedMember>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedMember {
    pub name: String,

    pub columns: ColumnList,
}

impl EmbeddedMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }

    pub fn member(&self, name: &str) -> Option<&EmbeddedMember> {
        self.members.iter().find(|member| member.name == name)
    }
}

impl EmbeddedMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: ColumnList::new(),
        }
    }
}

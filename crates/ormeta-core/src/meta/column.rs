use super::JdbcType;

use std_util::str;

/// One physical column.
///
/// Columns are never validated on their own: whether a combination of
/// settings makes sense depends on the descriptor that owns the column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMetaData {
    /// Column name. Unset means the naming layer picks one later.
    pub name: Option<String>,

    /// Column in another table this column matches, for multi-column joins.
    pub target: Option<String>,

    /// Member on the other side this column matches.
    pub target_member: Option<String>,

    pub jdbc_type: Option<JdbcType>,

    /// Vendor type. Takes priority over `jdbc_type` when both are set.
    pub sql_type: Option<String>,

    length: Option<u32>,

    scale: Option<u32>,

    pub allows_null: Option<bool>,

    pub default_value: Option<String>,

    /// Value written on insert when the object supplies none.
    pub insert_value: Option<String>,

    pub insertable: bool,

    pub updateable: bool,

    pub unique: bool,

    /// 0-origin position of the column within its table.
    pub position: Option<u32>,
}

impl Default for ColumnMetaData {
    fn default() -> Self {
        Self {
            name: None,
            target: None,
            target_member: None,
            jdbc_type: None,
            sql_type: None,
            length: None,
            scale: None,
            allows_null: None,
            default_value: None,
            insert_value: None,
            insertable: true,
            updateable: true,
            unique: false,
            position: None,
        }
    }
}

impl ColumnMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Sets the length. Values that are not strictly positive are dropped.
    pub fn set_length(&mut self, length: i64) -> &mut Self {
        self.length = positive(length);
        self
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Sets the scale. Values that are not strictly positive are dropped.
    pub fn set_scale(&mut self, scale: i64) -> &mut Self {
        self.scale = positive(scale);
        self
    }

    /// Sets the jdbc type from a raw token. An unknown token is logged and
    /// leaves the current value untouched.
    pub fn set_jdbc_type_name(&mut self, token: &str) -> &mut Self {
        match str::non_blank(token) {
            None => self.jdbc_type = None,
            Some(token) => match JdbcType::parse(token) {
                Some(ty) => self.jdbc_type = Some(ty),
                None => {
                    tracing::warn!(
                        column = self.name.as_deref().unwrap_or("<unnamed>"),
                        token,
                        "unknown jdbc type; ignoring"
                    );
                }
            },
        }
        self
    }

    /// The type to declare the column with: the vendor type if given,
    /// otherwise the jdbc type name.
    pub fn declared_type(&self) -> Option<&str> {
        self.sql_type
            .as_deref()
            .or_else(|| self.jdbc_type.map(JdbcType::name))
    }

    pub fn is_allows_null(&self) -> bool {
        self.allows_null.unwrap_or(false)
    }
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|value| *value > 0)
}

/// The columns of a descriptor together with the `column` name shorthand.
///
/// Setting the shorthand on an empty list creates one column with that name;
/// on a list of exactly one column it renames that column. A list holding
/// several columns is left alone and the shorthand is kept on its own, so the
/// two may disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnList {
    shorthand: Option<String>,
    columns: Vec<ColumnMetaData>,
}

impl ColumnList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shorthand if one was set, else the name of the first column.
    pub fn column_name(&self) -> Option<&str> {
        self.shorthand
            .as_deref()
            .or_else(|| self.columns.first().and_then(ColumnMetaData::name))
    }

    pub fn set_column_name(&mut self, name: &str) {
        let Some(name) = str::non_blank(name) else {
            self.shorthand = None;
            return;
        };

        match self.columns.len() {
            0 => self.columns.push(ColumnMetaData::named(name)),
            1 => self.columns[0].name = Some(name.to_string()),
            several => {
                tracing::debug!(
                    columns = several,
                    shorthand = name,
                    "column shorthand not applied to a multi-column block"
                );
            }
        }

        self.shorthand = Some(name.to_string());
    }

    pub fn add_column(&mut self, column: ColumnMetaData) {
        self.columns.push(column);
    }

    pub fn columns(&self) -> &[ColumnMetaData] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [ColumnMetaData] {
        &mut self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Names of the columns that have one, in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter_map(|column| column.name.clone())
            .collect()
    }
}

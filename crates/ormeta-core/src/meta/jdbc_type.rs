use std::fmt;

/// Generic SQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JdbcType {
    Array,
    BigInt,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    LongNVarChar,
    LongVarBinary,
    LongVarChar,
    NChar,
    NClob,
    Numeric,
    NVarChar,
    Other,
    Real,
    SmallInt,
    SqlXml,
    Time,
    TimeWithTimezone,
    Timestamp,
    TimestampWithTimezone,
    TinyInt,
    VarBinary,
    VarChar,
}

const NAMES: &[(&str, JdbcType)] = &[
    ("ARRAY", JdbcType::Array),
    ("BIGINT", JdbcType::BigInt),
    ("BINARY", JdbcType::Binary),
    ("BIT", JdbcType::Bit),
    ("BLOB", JdbcType::Blob),
    ("BOOLEAN", JdbcType::Boolean),
    ("CHAR", JdbcType::Char),
    ("CLOB", JdbcType::Clob),
    ("DATE", JdbcType::Date),
    ("DECIMAL", JdbcType::Decimal),
    ("DOUBLE", JdbcType::Double),
    ("FLOAT", JdbcType::Float),
    ("INTEGER", JdbcType::Integer),
    ("LONGNVARCHAR", JdbcType::LongNVarChar),
    ("LONGVARBINARY", JdbcType::LongVarBinary),
    ("LONGVARCHAR", JdbcType::LongVarChar),
    ("NCHAR", JdbcType::NChar),
    ("NCLOB", JdbcType::NClob),
    ("NUMERIC", JdbcType::Numeric),
    ("NVARCHAR", JdbcType::NVarChar),
    ("OTHER", JdbcType::Other),
    ("REAL", JdbcType::Real),
    ("SMALLINT", JdbcType::SmallInt),
    ("SQLXML", JdbcType::SqlXml),
    ("TIME", JdbcType::Time),
    ("TIME_WITH_TIMEZONE", JdbcType::TimeWithTimezone),
    ("TIMESTAMP", JdbcType::Timestamp),
    ("TIMESTAMP_WITH_TIMEZONE", JdbcType::TimestampWithTimezone),
    ("TINYINT", JdbcType::TinyInt),
    ("VARBINARY", JdbcType::VarBinary),
    ("VARCHAR", JdbcType::VarChar),
];

impl JdbcType {
    /// Case-insensitive lookup of a type token.
    pub fn parse(token: &str) -> Option<JdbcType> {
        let token = token.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, ty)| *ty)
    }

    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, ty)| *ty == self)
            .map(|(name, _)| *name)
            .unwrap_or("OTHER")
    }
}

impl fmt::Display for JdbcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_names() {
        assert_eq!(JdbcType::parse("varchar"), Some(JdbcType::VarChar));
        assert_eq!(JdbcType::parse(" Timestamp_With_Timezone "), Some(JdbcType::TimestampWithTimezone));
        assert_eq!(JdbcType::BigInt.to_string(), "BIGINT");
        assert_eq!(JdbcType::parse("VARCHAR2"), None);
    }
}

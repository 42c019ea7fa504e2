use serde::{Deserialize, Serialize};

/// Column type tag as reported by schema introspection.
///
/// Parameterized types such as `varchar(255)` or `decimal(8,2)` are reduced to
/// their base name. Anything unrecognized is kept verbatim in [`SqlType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SqlType {
    String,
    Char,
    Varchar,
    Text,
    MediumText,
    LongText,
    Integer,
    Int,
    SmallInt,
    BigInt,
    Boolean,
    Date,
    DateTime,
    Timestamp,
    Decimal,
    Float,
    Json,
    Array,
    Other(String),
}

impl SqlType {
    /// Parse a type tag, case-insensitively
    pub fn parse(tag: &str) -> Self {
        let lower = tag.trim().to_lowercase();
        let base = lower.split('(').next().unwrap_or_default().trim();
        match base {
            "string" => SqlType::String,
            "char" => SqlType::Char,
            "varchar" => SqlType::Varchar,
            "text" => SqlType::Text,
            "mediumtext" => SqlType::MediumText,
            "longtext" => SqlType::LongText,
            "integer" => SqlType::Integer,
            "int" => SqlType::Int,
            "smallint" => SqlType::SmallInt,
            "bigint" => SqlType::BigInt,
            "boolean" | "bool" => SqlType::Boolean,
            "date" => SqlType::Date,
            "datetime" => SqlType::DateTime,
            "timestamp" => SqlType::Timestamp,
            "decimal" => SqlType::Decimal,
            "float" => SqlType::Float,
            "json" => SqlType::Json,
            "array" => SqlType::Array,
            _ => SqlType::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SqlType::String => "string",
            SqlType::Char => "char",
            SqlType::Varchar => "varchar",
            SqlType::Text => "text",
            SqlType::MediumText => "mediumtext",
            SqlType::LongText => "longtext",
            SqlType::Integer => "integer",
            SqlType::Int => "int",
            SqlType::SmallInt => "smallint",
            SqlType::BigInt => "bigint",
            SqlType::Boolean => "boolean",
            SqlType::Date => "date",
            SqlType::DateTime => "datetime",
            SqlType::Timestamp => "timestamp",
            SqlType::Decimal => "decimal",
            SqlType::Float => "float",
            SqlType::Json => "json",
            SqlType::Array => "array",
            SqlType::Other(tag) => tag,
        }
    }

    /// Types whose values are free text (candidates for `search`)
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            SqlType::String
                | SqlType::Char
                | SqlType::Varchar
                | SqlType::Text
                | SqlType::MediumText
                | SqlType::LongText
        )
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            SqlType::Integer | SqlType::Int | SqlType::SmallInt | SqlType::BigInt
        )
    }

    /// Attribute cast for the model's `$casts` map.
    ///
    /// Only temporal and JSON columns are cast; everything else is left to the ORM.
    pub fn model_cast(&self) -> Option<&'static str> {
        match self {
            SqlType::Date | SqlType::DateTime | SqlType::Timestamp => Some("datetime"),
            SqlType::Json => Some("array"),
            _ => None,
        }
    }

    /// Faker expression used by generated factories
    pub fn faker_expression(&self) -> &'static str {
        match self {
            SqlType::String | SqlType::Char | SqlType::Varchar => "$this->faker->word",
            SqlType::Text | SqlType::MediumText | SqlType::LongText => "$this->faker->paragraph",
            SqlType::Integer | SqlType::Int | SqlType::SmallInt | SqlType::BigInt => {
                "$this->faker->numberBetween(1, 100)"
            }
            SqlType::Boolean => "$this->faker->boolean",
            SqlType::Date => "$this->faker->date()",
            SqlType::DateTime | SqlType::Timestamp => "$this->faker->dateTime()",
            SqlType::Decimal | SqlType::Float => "$this->faker->randomFloat(2, 0, 1000)",
            SqlType::Json | SqlType::Array => "$this->faker->words(3)",
            SqlType::Other(_) => "$this->faker->words(3, true)",
        }
    }

    /// Type-specific validation rules for generated form requests
    pub fn validation_rules(&self) -> &'static [&'static str] {
        match self {
            SqlType::String | SqlType::Char | SqlType::Varchar => &["string", "max:255"],
            SqlType::Text | SqlType::MediumText | SqlType::LongText => &["string"],
            SqlType::Integer | SqlType::Int | SqlType::SmallInt | SqlType::BigInt => &["integer"],
            SqlType::Float | SqlType::Decimal => &["numeric"],
            SqlType::Boolean => &["boolean"],
            SqlType::Date | SqlType::DateTime | SqlType::Timestamp => &["date"],
            SqlType::Json | SqlType::Array => &["array"],
            SqlType::Other(_) => &[],
        }
    }
}

impl From<String> for SqlType {
    fn from(tag: String) -> Self {
        SqlType::parse(&tag)
    }
}

impl From<SqlType> for String {
    fn from(ty: SqlType) -> Self {
        ty.as_str().to_string()
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: SqlType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
        }
    }
}

/// A table and its columns, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.name == column)
    }

    pub fn column(&self, column: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == column)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Point-in-time view of every table in the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub tables: Vec<TableSchema>,
}

impl SchemaSnapshot {
    pub fn new(tables: Vec<TableSchema>) -> Self {
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Read-only access to table metadata.
///
/// The generator only ever asks these four questions of a database; any
/// backend able to answer them can drive generation.
pub trait SchemaIntrospector {
    fn table_exists(&self, table: &str) -> bool;

    /// Column names in declaration order; empty for unknown tables
    fn list_columns(&self, table: &str) -> Vec<String>;

    fn column_type(&self, table: &str, column: &str) -> Option<SqlType>;

    fn list_all_tables(&self) -> Vec<String>;

    /// Materialize the whole schema for pure inference passes
    fn snapshot(&self) -> SchemaSnapshot {
        let tables = self
            .list_all_tables()
            .into_iter()
            .map(|table| {
                let columns = self
                    .list_columns(&table)
                    .into_iter()
                    .map(|column| {
                        let sql_type = self
                            .column_type(&table, &column)
                            .unwrap_or_else(|| SqlType::Other("unknown".to_string()));
                        ColumnDescriptor::new(column, sql_type)
                    })
                    .collect();
                TableSchema::new(table, columns)
            })
            .collect();
        SchemaSnapshot::new(tables)
    }
}

impl SchemaIntrospector for SchemaSnapshot {
    fn table_exists(&self, table: &str) -> bool {
        self.table(table).is_some()
    }

    fn list_columns(&self, table: &str) -> Vec<String> {
        self.table(table)
            .map(TableSchema::column_names)
            .unwrap_or_default()
    }

    fn column_type(&self, table: &str, column: &str) -> Option<SqlType> {
        self.table(table)
            .and_then(|t| t.column(column))
            .map(|c| c.sql_type.clone())
    }

    fn list_all_tables(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    fn snapshot(&self) -> SchemaSnapshot {
        self.clone()
    }
}

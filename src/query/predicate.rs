use serde::Serialize;

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Like,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Like => "LIKE",
        }
    }
}

/// Backend-independent WHERE condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Predicate {
    Compare {
        column: String,
        op: CompareOp,
        value: String,
    },
    In {
        column: String,
        values: Vec<String>,
    },
    NotIn {
        column: String,
        values: Vec<String>,
    },
    /// Inclusive range
    Between {
        column: String,
        low: String,
        high: String,
    },
    IsNull(String),
    NotNull(String),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CompareOp, value: impl Into<String>) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    /// `LIKE %value%`
    pub fn contains(column: impl Into<String>, value: &str) -> Self {
        Self::compare(column, CompareOp::Like, format!("%{value}%"))
    }

    pub fn is_in(column: impl Into<String>, values: Vec<String>) -> Self {
        Predicate::In {
            column: column.into(),
            values,
        }
    }

    pub fn not_in(column: impl Into<String>, values: Vec<String>) -> Self {
        Predicate::NotIn {
            column: column.into(),
            values,
        }
    }

    pub fn between(column: impl Into<String>, low: impl Into<String>, high: impl Into<String>) -> Self {
        Predicate::Between {
            column: column.into(),
            low: low.into(),
            high: high.into(),
        }
    }
}

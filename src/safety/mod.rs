//! Read-only guard for caller-supplied SQL.
//!
//! Parses SQL and classifies statements as safe, mutating, or destructive so
//! that `run_query` can refuse anything but reads.

mod parser;

pub use parser::{classify_sql, ensure_read_only, SqlClassifier};

/// How much damage a statement can do, ordered from least to most dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SafetyLevel {
    /// SELECT, EXPLAIN, SHOW, DESCRIBE.
    Safe,
    /// INSERT, UPDATE, MERGE.
    Mutating,
    /// DELETE, DROP, TRUNCATE, ALTER, CREATE, and anything unclassified.
    Destructive,
}

impl SafetyLevel {
    pub fn is_read_only(&self) -> bool {
        *self == Self::Safe
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    Insert,
    Update,
    Delete,
    Drop,
    Truncate,
    Alter,
    Create,
    Explain,
    Show,
    Merge,
    /// A batch of statements, tagged with its most dangerous member.
    Multiple(Box<StatementType>),
    Unknown,
}

impl StatementType {
    /// SQL keyword naming the statement. A batch is named after its most
    /// dangerous member.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Drop => "DROP",
            Self::Truncate => "TRUNCATE",
            Self::Alter => "ALTER",
            Self::Create => "CREATE",
            Self::Explain => "EXPLAIN",
            Self::Show => "SHOW",
            Self::Merge => "MERGE",
            Self::Multiple(inner) => inner.keyword(),
            Self::Unknown => "Unrecognized",
        }
    }
}

/// Verdict for one piece of SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub level: SafetyLevel,
    pub statement_type: StatementType,
    /// Set when the SQL could not be classified at all.
    pub warning: Option<String>,
}

impl ClassificationResult {
    pub fn new(level: SafetyLevel, statement_type: StatementType) -> Self {
        Self {
            level,
            statement_type,
            warning: None,
        }
    }

    /// SQL that could not be classified, treated as destructive.
    pub fn unclassified(reason: impl Into<String>) -> Self {
        Self {
            level: SafetyLevel::Destructive,
            statement_type: StatementType::Unknown,
            warning: Some(reason.into()),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.level.is_read_only()
    }
}

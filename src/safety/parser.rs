//! Statement classification over the sqlparser AST.
//!
//! Statements are parsed with the DuckDB dialect. Queries are walked through
//! CTEs, set operations and derived tables so a data-modifying statement
//! hidden inside a SELECT still counts against it.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

use crate::error::{BauplanError, Result};

use super::{ClassificationResult, SafetyLevel, StatementType};

type Verdict = (SafetyLevel, StatementType);

const READ: Verdict = (SafetyLevel::Safe, StatementType::Select);

/// Parses SQL and classifies every statement in it.
#[derive(Debug, Default)]
pub struct SqlClassifier {
    dialect: DuckDbDialect,
}

impl SqlClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a SQL string.
    ///
    /// Empty or unparseable input is destructive, with the reason as the
    /// warning.
    pub fn classify(&self, sql: &str) -> ClassificationResult {
        let statements = match Parser::parse_sql(&self.dialect, sql) {
            Ok(statements) => statements,
            Err(e) => {
                return ClassificationResult::unclassified(format!("could not parse SQL: {}", e))
            }
        };

        match statements.as_slice() {
            [] => ClassificationResult::unclassified("empty SQL statement"),
            [statement] => {
                let (level, statement_type) = classify_statement(statement);
                ClassificationResult::new(level, statement_type)
            }
            many => {
                let (level, statement_type) = worst(many.iter().map(classify_statement));
                ClassificationResult::new(level, StatementType::Multiple(Box::new(statement_type)))
            }
        }
    }
}

/// Classifies SQL with a throwaway classifier.
pub fn classify_sql(sql: &str) -> ClassificationResult {
    SqlClassifier::new().classify(sql)
}

/// Fails with [`BauplanError::Rejected`] unless the SQL only reads data.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    let result = classify_sql(sql);
    if result.is_read_only() {
        return Ok(());
    }

    let keyword = result.statement_type.keyword();
    let reason = result
        .warning
        .unwrap_or_else(|| format!("{} statements are not allowed", keyword));
    Err(BauplanError::rejected(format!(
        "{}; only read-only queries (SELECT, EXPLAIN, SHOW, DESCRIBE) can be run",
        reason
    )))
}

/// Picks the most dangerous verdict; ties keep the earliest.
fn worst(verdicts: impl IntoIterator<Item = Verdict>) -> Verdict {
    verdicts
        .into_iter()
        .fold(READ, |acc, next| if next.0 > acc.0 { next } else { acc })
}

fn classify_statement(statement: &Statement) -> Verdict {
    use SafetyLevel::*;

    match statement {
        Statement::Query(query) => classify_query(query),
        // EXPLAIN ANALYZE executes its statement
        Statement::Explain {
            analyze: true,
            statement,
            ..
        } => (classify_statement(statement).0, StatementType::Explain),
        Statement::Explain { .. } => (Safe, StatementType::Explain),
        Statement::ExplainTable { .. }
        | Statement::ShowVariable { .. }
        | Statement::ShowTables { .. }
        | Statement::ShowColumns { .. }
        | Statement::ShowCreate { .. }
        | Statement::ShowFunctions { .. } => (Safe, StatementType::Show),

        Statement::Insert { .. } => (Mutating, StatementType::Insert),
        Statement::Update { .. } => (Mutating, StatementType::Update),
        Statement::Merge { .. } => (Mutating, StatementType::Merge),

        Statement::Delete { .. } => (Destructive, StatementType::Delete),
        Statement::Drop { .. } => (Destructive, StatementType::Drop),
        Statement::Truncate { .. } => (Destructive, StatementType::Truncate),
        Statement::AlterTable { .. } | Statement::AlterView { .. } => {
            (Destructive, StatementType::Alter)
        }
        Statement::CreateTable { .. }
        | Statement::CreateView { .. }
        | Statement::CreateSchema { .. } => (Destructive, StatementType::Create),

        _ => (Destructive, StatementType::Unknown),
    }
}

fn classify_query(query: &Query) -> Verdict {
    let ctes = query
        .with
        .iter()
        .flat_map(|with| with.cte_tables.iter())
        .map(|cte| classify_query(&cte.query));

    worst(ctes.chain(std::iter::once(classify_set_expr(&query.body))))
}

fn classify_set_expr(set_expr: &SetExpr) -> Verdict {
    match set_expr {
        SetExpr::Insert(statement) | SetExpr::Update(statement) => classify_statement(statement),
        SetExpr::Query(query) => classify_query(query),
        SetExpr::Select(select) => classify_select(select),
        SetExpr::SetOperation { left, right, .. } => {
            worst([classify_set_expr(left), classify_set_expr(right)])
        }
        SetExpr::Values(_) | SetExpr::Table(_) => READ,
        #[allow(unreachable_patterns)]
        _ => (SafetyLevel::Destructive, StatementType::Unknown),
    }
}

/// `SELECT ... INTO` creates a table; otherwise only the FROM clause can
/// hide another statement.
fn classify_select(select: &Select) -> Verdict {
    if select.into.is_some() {
        return (SafetyLevel::Destructive, StatementType::Create);
    }
    worst(select.from.iter().map(classify_table_with_joins))
}

fn classify_table_with_joins(twj: &TableWithJoins) -> Verdict {
    let relations = std::iter::once(&twj.relation).chain(twj.joins.iter().map(|j| &j.relation));
    worst(relations.map(classify_table_factor))
}

fn classify_table_factor(factor: &TableFactor) -> Verdict {
    match factor {
        TableFactor::Derived { subquery, .. } => classify_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => classify_table_with_joins(table_with_joins),
        _ => READ,
    }
}

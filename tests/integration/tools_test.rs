//! Tool-level tests: parameters in, JSON envelope out.

use super::helpers::{executor, executor_with, get_envelope, is_error, is_success};
use mcp_bauplan::config::PlatformConfig;
use mcp_bauplan::platform::{ColumnarResult, FailingConnector, MockConnector};
use mcp_bauplan::tools::get_schema::{self, get_schema_sql};
use mcp_bauplan::tools::list_tables::{self, list_tables_sql};
use mcp_bauplan::tools::run_query;
use mcp_bauplan::tools::{GetSchemaParams, ListTablesParams, RunQueryParams};
use pretty_assertions::assert_eq;
use serde_json::json;

fn query(sql: &str) -> RunQueryParams {
    RunQueryParams {
        query: sql.to_string(),
    }
}

#[tokio::test]
async fn test_list_tables_uses_configured_namespace() {
    let tables = ColumnarResult::new().with_column("table_name", "string", ["orders", "titanic"]);
    let mock = MockConnector::new().with_result(&list_tables_sql("tpch"), tables);
    let executor = executor_with(mock, PlatformConfig::new("key").with_namespace("tpch"));

    let result = list_tables::execute(&executor, &ListTablesParams::default()).await;

    assert!(is_success(&result));
    let envelope = get_envelope(&result);
    assert_eq!(
        envelope["data"],
        json!([{"table_name": "orders"}, {"table_name": "titanic"}])
    );
    assert_eq!(envelope["metadata"]["row_count"], 2);
}

#[tokio::test]
async fn test_list_tables_explicit_namespace() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());
    let params = ListTablesParams {
        namespace: Some("raw".to_string()),
    };

    list_tables::execute(&executor, &params).await;

    assert_eq!(mock.queries()[0].0, list_tables_sql("raw"));
}

#[tokio::test]
async fn test_list_tables_rejects_bad_namespace() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());
    let params = ListTablesParams {
        namespace: Some("x' OR '1'='1".to_string()),
    };

    let result = list_tables::execute(&executor, &params).await;

    assert!(is_error(&result));
    assert_eq!(get_envelope(&result)["error_kind"], "rejected");
    assert_eq!(mock.connect_count(), 0);
}

#[tokio::test]
async fn test_get_schema_returns_columns_in_order() {
    let schema = ColumnarResult::new()
        .with_column("column_name", "string", ["PassengerId", "Name", "Age"])
        .with_column("data_type", "string", ["int64", "string", "double"]);
    let mock = MockConnector::new().with_result(&get_schema_sql("bauplan", "titanic"), schema);
    let executor = executor(mock);

    let params = GetSchemaParams {
        table: "titanic".to_string(),
    };
    let result = get_schema::execute(&executor, &params).await;

    assert!(is_success(&result));
    assert_eq!(
        get_envelope(&result)["data"],
        json!([
            {"column_name": "PassengerId", "data_type": "int64"},
            {"column_name": "Name", "data_type": "string"},
            {"column_name": "Age", "data_type": "double"}
        ])
    );
}

#[tokio::test]
async fn test_get_schema_qualified_table() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());
    let params = GetSchemaParams {
        table: "tpch.orders".to_string(),
    };

    get_schema::execute(&executor, &params).await;

    assert_eq!(mock.queries()[0].0, get_schema_sql("tpch", "orders"));
}

#[tokio::test]
async fn test_run_query_success_envelope() {
    let result = ColumnarResult::new()
        .with_column("Sex", "string", ["male", "female"])
        .with_column("avg_age", "double", [30.7, 27.9]);
    let sql = "SELECT Sex, AVG(Age) AS avg_age FROM titanic GROUP BY Sex";
    let executor = executor(MockConnector::new().with_result(sql, result));

    let result = run_query::execute(&executor, &query(sql), true).await;

    assert!(is_success(&result));
    let envelope = get_envelope(&result);
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["error"], json!(null));
    assert_eq!(envelope["metadata"]["column_names"], json!(["Sex", "avg_age"]));
    assert_eq!(envelope["metadata"]["query"], sql);
    assert!(envelope["metadata"]["query_time"].is_string());
}

#[tokio::test]
async fn test_run_query_envelope_keeps_column_order() {
    let result = ColumnarResult::new()
        .with_column("z", "int64", [1])
        .with_column("a", "int64", [2]);
    let executor = executor(MockConnector::new().with_result("SELECT z, a FROM t", result));

    let result = run_query::execute(&executor, &query("SELECT z, a FROM t"), true).await;

    let text = super::helpers::get_text(&result);
    assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
}

#[tokio::test]
async fn test_run_query_read_only_rejects_writes() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());

    for sql in ["DROP TABLE titanic", "DELETE FROM titanic", "INSERT INTO t VALUES (1)"] {
        let result = run_query::execute(&executor, &query(sql), true).await;
        assert!(is_error(&result), "accepted {sql}");
        let envelope = get_envelope(&result);
        assert_eq!(envelope["error_kind"], "rejected");
        assert!(envelope["error"]
            .as_str()
            .unwrap()
            .contains("only read-only queries"));
    }

    assert_eq!(mock.connect_count(), 0);
}

#[tokio::test]
async fn test_run_query_writes_pass_through_when_not_read_only() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());

    let result = run_query::execute(&executor, &query("DELETE FROM titanic"), false).await;

    assert!(is_success(&result));
    assert_eq!(mock.connect_count(), 1);
}

#[tokio::test]
async fn test_run_query_connection_failure() {
    let executor = executor(FailingConnector::new("credentials expired"));

    let result = run_query::execute(&executor, &query("SELECT 1"), true).await;

    assert!(is_error(&result));
    let envelope = get_envelope(&result);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["data"], json!([]));
    assert_eq!(envelope["metadata"], json!({}));
    assert_eq!(envelope["error_kind"], "connection");
    assert!(envelope["error"]
        .as_str()
        .unwrap()
        .contains("credentials expired"));
}

#[tokio::test]
async fn test_run_query_failure_is_not_connection_error() {
    let executor = executor(MockConnector::new().failing_queries("Syntax error near FORM"));

    let result = run_query::execute(&executor, &query("SELECT * FORM t"), false).await;

    let envelope = get_envelope(&result);
    assert_eq!(envelope["error_kind"], "query");
    assert_eq!(envelope["error"], "Syntax error near FORM");
}

//! Query executor integration tests.
//!
//! Drives the full connect, query and convert path against the mock platform.

use super::helpers::{executor, executor_with};
use mcp_bauplan::config::PlatformConfig;
use mcp_bauplan::error::ErrorKind;
use mcp_bauplan::platform::{ColumnarResult, FailingConnector, MockConnector, Value};
use mcp_bauplan::query::Status;
use pretty_assertions::assert_eq;
use serde_json::json;

const SQL: &str = "SELECT id, name FROM users";

fn users() -> ColumnarResult {
    ColumnarResult::new()
        .with_column("id", "int64", [1, 2])
        .with_column("name", "string", ["a", "b"])
}

#[tokio::test]
async fn test_execute_converts_columns_to_rows() {
    let executor = executor(MockConnector::new().with_result(SQL, users()));

    let envelope = executor.execute(SQL).await;

    assert_eq!(envelope.status, Status::Success);
    assert_eq!(
        serde_json::to_value(&envelope.data).unwrap(),
        json!([{"id": 1, "name": "a"}, {"id": 2, "name": "b"}])
    );

    let metadata = envelope.metadata.expect("success carries metadata");
    assert_eq!(metadata.row_count, 2);
    assert_eq!(metadata.column_names, vec!["id", "name"]);
    assert_eq!(metadata.column_types, vec!["int64", "string"]);
    assert_eq!(metadata.query, SQL);
}

#[tokio::test]
async fn test_execute_empty_result() {
    let empty = ColumnarResult::new()
        .with_column("id", "int64", Vec::<i64>::new())
        .with_column("name", "string", Vec::<String>::new());
    let executor = executor(MockConnector::new().with_result(SQL, empty));

    let envelope = executor.execute(SQL).await;

    assert!(envelope.is_success());
    assert!(envelope.data.is_empty());
    let metadata = envelope.metadata.unwrap();
    assert_eq!(metadata.row_count, 0);
    assert_eq!(metadata.column_names, vec!["id", "name"]);
}

#[tokio::test]
async fn test_execute_preserves_nulls() {
    let result = ColumnarResult::new().with_column("age", "double", [Value::Float(22.0), Value::Null]);
    let executor = executor(MockConnector::new().with_result(SQL, result));

    let envelope = executor.execute(SQL).await;

    assert_eq!(
        serde_json::to_value(&envelope.data).unwrap(),
        json!([{"age": 22.0}, {"age": null}])
    );
}

#[tokio::test]
async fn test_query_failure_becomes_error_envelope() {
    let executor = executor(MockConnector::new().failing_queries("Table not found: users"));

    let envelope = executor.execute(SQL).await;

    assert_eq!(envelope.status, Status::Error);
    assert!(envelope.data.is_empty());
    assert!(envelope.metadata.is_none());
    assert_eq!(envelope.error_kind, Some(ErrorKind::Query));
    assert!(envelope.error.unwrap().contains("Table not found: users"));
}

#[tokio::test]
async fn test_connection_failure_becomes_error_envelope() {
    let executor = executor(FailingConnector::new("network unreachable"));

    let envelope = executor.execute(SQL).await;

    assert_eq!(envelope.status, Status::Error);
    assert_eq!(envelope.error_kind, Some(ErrorKind::Connection));
    let error = envelope.error.unwrap();
    assert!(error.contains("network unreachable"));
    assert_eq!(error.matches("Unable to connect").count(), 1);
}

#[tokio::test]
async fn test_error_envelope_serializes_empty_metadata() {
    let executor = executor(FailingConnector::new("down"));

    let envelope = executor.execute(SQL).await;
    let json: serde_json::Value = serde_json::from_str(&envelope.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["status"], "error");
    assert_eq!(json["data"], json!([]));
    assert_eq!(json["metadata"], json!({}));
    assert_eq!(json["error_kind"], "connection");
}

#[tokio::test]
async fn test_queries_run_on_configured_branch() {
    let mock = MockConnector::new();
    let executor = executor_with(
        mock.clone(),
        PlatformConfig::new("key").with_branch("feature_x"),
    );

    executor.execute(SQL).await;

    assert_eq!(
        mock.queries(),
        vec![(SQL.to_string(), "feature_x".to_string())]
    );
}

#[tokio::test]
async fn test_each_call_opens_a_fresh_handle() {
    let mock = MockConnector::new();
    let executor = executor(mock.clone());

    for _ in 0..3 {
        executor.execute(SQL).await;
    }

    assert_eq!(mock.connect_count(), 3);
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mock = MockConnector::new().with_result(SQL, users());
    let executor = executor(mock.clone());

    let (a, b) = tokio::join!(executor.execute(SQL), executor.execute("SELECT 1"));

    assert_eq!(a.row_count(), 2);
    assert_eq!(b.row_count(), 1);
    assert_eq!(mock.connect_count(), 2);
}

#[test]
fn test_execute_from_blocking_context() {
    let executor = executor(MockConnector::new());

    let envelope = tokio_test::block_on(executor.execute("SELECT 1"));

    assert_eq!(
        serde_json::to_value(&envelope.data).unwrap(),
        json!([{"result": "Mock result for: SELECT 1"}])
    );
}

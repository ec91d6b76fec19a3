use std::cmp::Ordering;
use std::collections::BTreeMap;

use ::http::{Method, Request, StatusCode};
use orderly_lists::*;
use orderly_query::{SortDirection, SortExpression};
use serde_json::{Value, json};

struct MemorySource {
    records: Vec<Value>,
}

impl MemorySource {
    fn accounts() -> Self {
        Self {
            records: vec![
                json!({ "id": "acct-1", "name": "Acme Corp", "status": "active", "revenue": 50000.0 }),
                json!({ "id": "acct-2", "name": "Globex", "status": "rejected", "revenue": 80000.0 }),
                json!({ "id": "acct-3", "name": "Initech", "status": "active", "revenue": 12000.0 }),
                json!({ "id": "acct-4", "name": "Umbrella", "status": "active", "revenue": 95000.0 }),
            ],
        }
    }
}

impl RecordSource for MemorySource {
    fn fetch(&self, ordering: &SortExpression) -> Result<Vec<Value>, OrderingError> {
        let mut records = self.records.clone();
        for key in ordering.iter().rev() {
            if records.iter().any(|r| r.get(key.field()).is_none()) {
                return Err(OrderingError(format!("unknown field: {}", key.field())));
            }
            records.sort_by(|a, b| {
                let ord = compare(
                    a.get(key.field()).unwrap_or(&Value::Null),
                    b.get(key.field()).unwrap_or(&Value::Null),
                );
                match key.direction() {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        Ok(records)
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn accounts_config(on_ordering_error: OnOrderingError) -> ListConfig {
    let mut criteria = BTreeMap::new();
    criteria.insert("sort".to_string(), vec!["*".to_string()]);
    criteria.insert("sort_status".to_string(), vec!["status".to_string()]);
    ListConfig {
        id: "accounts".to_string(),
        title: "Accounts".to_string(),
        with: None,
        sorter: SorterConfig {
            query_param: "sort".to_string(),
            criteria,
            on_ordering_error,
        },
        toggles: vec![
            ToggleConfig {
                label: "Name".to_string(),
                with: None,
                by: vec![
                    SortExpression::parse("name"),
                    SortExpression::parse("-name"),
                ],
            },
            ToggleConfig {
                label: "Status".to_string(),
                with: Some("status".to_string()),
                by: vec![SortExpression::parse("status")],
            },
        ],
    }
}

fn build_handler(on_ordering_error: OnOrderingError) -> ListHttp<MemorySource> {
    ListHttp::new(accounts_config(on_ordering_error), MemorySource::accounts()).unwrap()
}

fn get(handler: &ListHttp<MemorySource>, target: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(target)
        .body(Vec::new())
        .unwrap();
    let resp = handler.handle(req);
    let status = resp.status();
    let body: Value = serde_json::from_slice(resp.body()).unwrap();
    (status, body)
}

fn names(body: &Value) -> Vec<&str> {
    body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect()
}

#[test]
fn config_endpoint_returns_the_config() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (status, body) = get(&handler, "/config");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "accounts");
    assert_eq!(body["toggles"][0]["by"][1], "-name");
}

#[test]
fn data_without_sort_keeps_source_order() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (status, body) = get(&handler, "/data");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_ordered"], false);
    assert_eq!(body["total"], 4);
    assert_eq!(names(&body)[0], "Acme Corp");
}

#[test]
fn data_orders_by_the_requested_field() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (status, body) = get(&handler, "/data?sort=-revenue");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_ordered"], true);
    assert_eq!(
        names(&body),
        vec!["Umbrella", "Globex", "Acme Corp", "Initech"]
    );
}

#[test]
fn data_orders_by_multiple_keys() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (_, body) = get(&handler, "/data?sort=status,-revenue");
    assert_eq!(
        names(&body),
        vec!["Umbrella", "Acme Corp", "Initech", "Globex"]
    );
}

#[test]
fn disallowed_keys_leave_the_data_unordered() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (status, body) = get(&handler, "/data?sort_status=name");
    assert_eq!(status, StatusCode::OK);
    // "name" is not in the sort_status allow-list; nothing survives the
    // filter under that name and the default ordering applies.
    assert_eq!(body["records"][0]["name"], "Acme Corp");
}

#[test]
fn toggles_advance_from_the_request_state() {
    let handler = build_handler(OnOrderingError::Ignore);

    let (_, body) = get(&handler, "/data");
    assert_eq!(body["toggles"][0]["href"], "/data?sort=name");
    assert_eq!(body["toggles"][0]["label"], "Name");
    assert_eq!(body["toggles"][0]["title"], "Sort by: 'name' (asc)");

    let (_, body) = get(&handler, "/data?sort=name");
    assert_eq!(body["toggles"][0]["href"], "/data?sort=-name");
    assert_eq!(body["toggles"][0]["title"], "Sort by: 'name' (desc)");

    let (_, body) = get(&handler, "/data?sort=-name");
    assert_eq!(body["toggles"][0]["href"], "/data?sort=name");
}

#[test]
fn qualified_toggles_keep_their_own_parameter() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (_, body) = get(&handler, "/data?sort=name");
    assert_eq!(
        body["toggles"][1]["href"],
        "/data?sort=name&sort_status=status"
    );
}

#[test]
fn ignore_policy_serves_unordered_data() {
    let handler = build_handler(OnOrderingError::Ignore);
    // "missing" passes the wildcard allow-list but no record carries it.
    let (status, body) = get(&handler, "/data?sort=missing");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_ordered"], false);
    assert_eq!(body["total"], 4);
}

#[test]
fn propagate_policy_rejects_the_request() {
    let handler = build_handler(OnOrderingError::Propagate);
    let (status, body) = get(&handler, "/data?sort=missing");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("unknown field"),
        "{body}"
    );
}

#[test]
fn unknown_route_is_not_found() {
    let handler = build_handler(OnOrderingError::Ignore);
    let (status, _) = get(&handler, "/nope");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

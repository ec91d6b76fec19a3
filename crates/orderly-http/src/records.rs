use std::cmp::Ordering;

use orderly_lists::{OrderingError, RecordSource};
use orderly_query::{SortDirection, SortExpression};
use serde_json::Value;

/// A fixed record set, ordered per fetch.
///
/// The data-ordering collaborator for the demo service: it receives the
/// resolved sort keys and owns their execution. Field references resolve as
/// paths (`author__name` and `author.name` both descend into nested
/// objects); a field missing from any record rejects the whole ordering.
pub struct StaticRecords {
    records: Vec<Value>,
}

impl StaticRecords {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for StaticRecords {
    fn fetch(&self, ordering: &SortExpression) -> Result<Vec<Value>, OrderingError> {
        let mut records = self.records.clone();
        // Stable sort by each key from least to most significant gives the
        // multi-key priority order.
        for key in ordering.iter().rev() {
            if records.iter().any(|r| lookup(r, key.field()).is_none()) {
                return Err(OrderingError(format!("unknown field: {}", key.field())));
            }
            records.sort_by(|a, b| {
                let ord = compare(
                    lookup(a, key.field()).unwrap_or(&Value::Null),
                    lookup(b, key.field()).unwrap_or(&Value::Null),
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

/// Resolve a field reference against a record, descending through `.` and
/// `__` separated segments.
fn lookup<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in field.replace("__", ".").split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Order scalars by type, then value: null < bool < number < string.
/// Arrays and objects have no meaningful order and compare as equal.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) | Value::Object(_) => 4,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entries() -> StaticRecords {
        StaticRecords::new(vec![
            json!({ "id": 3, "title": "carrot", "author": { "name": "zoe" } }),
            json!({ "id": 1, "title": "apple", "author": { "name": "ann" } }),
            json!({ "id": 2, "title": "banana", "author": { "name": "ann" } }),
        ])
    }

    fn ids(records: &[Value]) -> Vec<i64> {
        records.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn empty_ordering_keeps_source_order() {
        let records = entries().fetch(&SortExpression::default()).unwrap();
        assert_eq!(ids(&records), vec![3, 1, 2]);
    }

    #[test]
    fn orders_ascending_and_descending() {
        let source = entries();
        let records = source.fetch(&SortExpression::parse("id")).unwrap();
        assert_eq!(ids(&records), vec![1, 2, 3]);
        let records = source.fetch(&SortExpression::parse("-title")).unwrap();
        assert_eq!(ids(&records), vec![3, 2, 1]);
    }

    #[test]
    fn orders_by_multiple_keys() {
        let records = entries()
            .fetch(&SortExpression::parse("author__name,-id"))
            .unwrap();
        assert_eq!(ids(&records), vec![2, 1, 3]);
    }

    #[test]
    fn dotted_and_dunder_paths_are_equivalent() {
        let source = entries();
        let a = source.fetch(&SortExpression::parse("author.name")).unwrap();
        let b = source.fetch(&SortExpression::parse("author__name")).unwrap();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn missing_field_is_an_ordering_error() {
        let err = entries()
            .fetch(&SortExpression::parse("nonexistent"))
            .unwrap_err();
        assert!(err.0.contains("unknown field"), "{}", err.0);
    }

    #[test]
    fn mixed_types_order_by_rank() {
        let source = StaticRecords::new(vec![
            json!({ "v": "text" }),
            json!({ "v": null }),
            json!({ "v": 5 }),
            json!({ "v": true }),
        ]);
        let records = source.fetch(&SortExpression::parse("v")).unwrap();
        let ranks: Vec<&Value> = records.iter().map(|r| &r["v"]).collect();
        assert_eq!(ranks[0], &Value::Null);
        assert_eq!(ranks[1], &json!(true));
        assert_eq!(ranks[2], &json!(5));
        assert_eq!(ranks[3], &json!("text"));
    }
}

use serde_json::{Map, Value};

/// Working representation of one provider row: field name to value.
///
/// Field names are the provider's own. No schema is shared across providers.
pub type Record = Map<String, Value>;

/// Tabular provider payload, in the provider's native row order.
pub type Rows = Vec<Record>;

/// Keeps only the JSON objects of `values`, dropping scalars and nulls.
pub fn records_from_values(values: Vec<Value>) -> Rows {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_from_values_skips_non_objects() {
        let rows = records_from_values(vec![json!({"a": 1}), json!(null), json!(3), json!({"b": 2})]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["a"], 1);
        assert_eq!(rows[1]["b"], 2);
    }
}

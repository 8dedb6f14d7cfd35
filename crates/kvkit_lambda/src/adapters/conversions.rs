use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value};

use crate::adapters::document_store::Item;

/// Converts a JSON object from a request payload into a store item.
pub fn json_map_to_item(map: &Map<String, Value>) -> Item {
    map.iter()
        .map(|(name, value)| (name.clone(), json_to_attribute(value)))
        .collect()
}

fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => {
            AttributeValue::L(values.iter().map(json_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(json_map_to_item(map)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_scalars_lists_and_nested_maps() {
        let Value::Object(map) = json!({
            "id": "user-1",
            "age": 41,
            "active": true,
            "tags": ["a", "b"],
            "address": { "city": "berlin" },
            "nickname": null,
        }) else {
            panic!("fixture should be an object");
        };

        let item = json_map_to_item(&map);

        assert_eq!(item["id"], AttributeValue::S("user-1".to_string()));
        assert_eq!(item["age"], AttributeValue::N("41".to_string()));
        assert_eq!(item["active"], AttributeValue::Bool(true));
        assert_eq!(
            item["tags"],
            AttributeValue::L(vec![
                AttributeValue::S("a".to_string()),
                AttributeValue::S("b".to_string()),
            ])
        );
        let AttributeValue::M(address) = &item["address"] else {
            panic!("address should convert to a map attribute");
        };
        assert_eq!(address["city"], AttributeValue::S("berlin".to_string()));
        assert_eq!(item["nickname"], AttributeValue::Null(true));
    }

    #[test]
    fn preserves_decimal_numbers_as_numeric_strings() {
        let Value::Object(map) = json!({ "rate": 0.25 }) else {
            panic!("fixture should be an object");
        };

        let item = json_map_to_item(&map);
        assert_eq!(item["rate"], AttributeValue::N("0.25".to_string()));
    }
}

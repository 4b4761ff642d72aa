//! 不透明 JSON 的展示辅助
//!
//! 统计、活动、截图、站点配置的结构由后台决定，这里只做尽力而为的提取。

use serde_json::Value;

/// 对象的键值对，值转为展示文本
pub fn json_entries(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_object() && !v.is_array())
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect(),
        _ => Vec::new(),
    }
}

/// 列表项：支持裸数组与 `{ "data": [...] }` 两种形态
pub fn json_items(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// 在条目本身或其 `attributes` 中按顺序查找第一个字符串字段
pub fn text_field(item: &Value, keys: &[&str]) -> Option<String> {
    let lookup = |v: &Value| {
        keys.iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };
    lookup(item).or_else(|| item.get("attributes").and_then(lookup))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entries_skip_nested() {
        let v = json!({"users": 120, "name": "cloud", "nested": {"a": 1}});
        let entries = json_entries(&v);
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&("users".to_string(), "120".to_string())));
        assert!(entries.contains(&("name".to_string(), "cloud".to_string())));
    }

    #[test]
    fn test_items_from_data_wrapper() {
        let v = json!({"data": [{"id": 1}, {"id": 2}], "meta": {}});
        assert_eq!(json_items(&v).len(), 2);
        assert_eq!(json_items(&json!([1])).len(), 1);
        assert!(json_items(&json!("x")).is_empty());
    }

    #[test]
    fn test_text_field_falls_back_to_attributes() {
        let v = json!({"id": 3, "attributes": {"title": "夏季活动"}});
        assert_eq!(text_field(&v, &["name", "title"]).as_deref(), Some("夏季活动"));
        assert_eq!(text_field(&json!({"name": "n"}), &["name"]).as_deref(), Some("n"));
        assert_eq!(text_field(&json!({}), &["name"]), None);
    }
}

use serde_json::Value;

use crate::error::AppError;

/// One flat group of request parameters, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamGroup {
    entries: Vec<(String, String)>,
}

impl ParamGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a group from a dynamic JSON value.
    ///
    /// The value must be an object whose members are scalars. Booleans follow
    /// the vendor convention of `1` for true and an empty string for false.
    pub fn from_json(value: &Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::invalid_parameter(format!(
                "Arguments must be an array of key/value pairs, got {}",
                json_kind(value)
            )));
        };

        let mut group = ParamGroup::new();
        for (key, member) in map {
            let rendered = match member {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => "1".to_string(),
                Value::Bool(false) | Value::Null => String::new(),
                other => {
                    return Err(AppError::invalid_parameter(format!(
                        "Parameter '{key}' must be a scalar, got {}",
                        json_kind(other)
                    )));
                }
            };
            group.insert(key.clone(), rendered);
        }
        Ok(group)
    }

    /// Parses a `key=value` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<(String, String), AppError> {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(AppError::invalid_parameter(format!(
                "Parameter '{pair}' must have the form key=value"
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = ParamGroup::new();
        for (k, v) in iter {
            group.insert(k, v);
        }
        group
    }
}

/// Ordered parameter groups appended to a request after the fixed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    groups: Vec<ParamGroup>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group, builder style
    pub fn group(mut self, group: ParamGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn push(&mut self, group: ParamGroup) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[ParamGroup] {
        &self.groups
    }

    /// Builds parameter groups from a sequence of dynamic values; any
    /// non-mapping entry is rejected.
    pub fn from_json(values: &[Value]) -> Result<Self, AppError> {
        values
            .iter()
            .map(ParamGroup::from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(|groups| RequestParams { groups })
    }
}

impl From<ParamGroup> for RequestParams {
    fn from(group: ParamGroup) -> Self {
        RequestParams {
            groups: vec![group],
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_member_order() {
        let group = ParamGroup::from_json(&json!({"comp_id": 1204, "Date": "2024-01-15"})).unwrap();
        let pairs: Vec<_> = group.iter().collect();
        assert_eq!(pairs, vec![("comp_id", "1204"), ("Date", "2024-01-15")]);
    }

    #[test]
    fn test_from_json_renders_scalars() {
        let group = ParamGroup::from_json(&json!({"a": true, "b": false, "c": null, "d": 1.5}))
            .unwrap();
        let values: Vec<_> = group.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["1", "", "", "1.5"]);
    }

    #[test]
    fn test_non_mapping_group_is_rejected() {
        let result = RequestParams::from_json(&[json!({"ok": 1}), json!("match_id=1")]);
        match result {
            Err(AppError::InvalidParameter(msg)) => assert!(msg.contains("a string")),
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_value_is_rejected() {
        let result = ParamGroup::from_json(&json!({"ids": [1, 2]}));
        assert!(matches!(result, Err(AppError::InvalidParameter(_))));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            ParamGroup::parse_pair("comp_id=1204").unwrap(),
            ("comp_id".to_string(), "1204".to_string())
        );
        assert_eq!(
            ParamGroup::parse_pair("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(ParamGroup::parse_pair("comp_id").is_err());
        assert!(ParamGroup::parse_pair("=1").is_err());
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side-channel data travelling with a batch of blocks.
///
/// Nothing in the emit pipeline looks inside it; it exists so a transport
/// can correlate a batch with whatever request produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Value);

impl Metadata {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl From<Value> for Metadata {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        assert!(Metadata::default().is_empty());
        assert!(Metadata::new(json!({})).is_empty());
        assert!(!Metadata::new(json!({"request_id": "abc"})).is_empty());
    }

    #[test]
    fn test_transparent_serde() {
        let m = Metadata::from(json!({"k": 1}));
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"k":1}"#);
    }
}

//! Transformation descriptors: an operation name plus an argument tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A transformation as submitted to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationDescriptor {
    pub op: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// A transformation still being edited.
///
/// Argument edits merge shallowly into the current arguments. Dropping the
/// value discards the edit; [`PendingTransformation::finish`] freezes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingTransformation {
    op: String,
    args: Map<String, Value>,
}

impl PendingTransformation {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            args: Map::new(),
        }
    }

    #[must_use]
    pub fn op(&self) -> &str {
        &self.op
    }

    #[must_use]
    pub fn args(&self) -> &Map<String, Value> {
        &self.args
    }

    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Overwrite the top-level keys present in `changed`, keep the others.
    pub fn merge_args(&mut self, changed: Map<String, Value>) {
        self.args.extend(changed);
    }

    pub fn set_arg(&mut self, key: impl Into<String>, value: Value) {
        self.args.insert(key.into(), value);
    }

    /// Freeze the edit into a descriptor.
    #[must_use]
    pub fn finish(self) -> TransformationDescriptor {
        TransformationDescriptor {
            op: self.op,
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_is_shallow() {
        let mut pending = PendingTransformation::new("core/derive");
        pending.set_arg("source", json!({"column": "c1", "keep": true}));
        pending.set_arg("target", json!("t"));

        let mut changed = Map::new();
        changed.insert("source".to_string(), json!({"column": "c2"}));
        pending.merge_args(changed);

        assert_eq!(pending.arg("source"), Some(&json!({"column": "c2"})));
        assert_eq!(pending.arg("target"), Some(&json!("t")));

        let descriptor = pending.finish();
        assert_eq!(descriptor.op, "core/derive");
        assert_eq!(descriptor.args.len(), 2);
    }
}

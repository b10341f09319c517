//! State carried across a hot swap.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serializable snapshot handed from one instance to the next.
///
/// The contents are defined by the application; the runtime only guarantees
/// the value reaches the next mount unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapturedState(Map<String, Value>);

impl CapturedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CapturedState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered syntactic structure of a sense
///
/// Keys are constituent slots (`ROOT`, `CAT`, `SUBJECT`, ...); a value is
/// either a scalar or a nested constituent mapping. Iteration follows
/// insertion order while equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynStruc {
    data: Map<String, Value>,
}

impl SynStruc {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, slot: &str) -> Option<&Value> {
        self.data.get(slot)
    }

    /// Nested constituent under `slot`, if that slot holds a mapping
    pub fn constituent(&self, slot: &str) -> Option<SynStruc> {
        match self.data.get(slot) {
            Some(Value::Object(map)) => Some(Self::new(map.clone())),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Every `$VAR<N>` root bound anywhere in the structure, in document order
    pub fn variables(&self) -> Vec<&str> {
        let mut found = Vec::new();
        collect_roots(&self.data, &mut found);
        found
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

fn collect_roots<'a>(data: &'a Map<String, Value>, found: &mut Vec<&'a str>) {
    for (slot, value) in data {
        match value {
            Value::String(root) if slot == "ROOT" && root.starts_with("$VAR") => found.push(root),
            Value::Object(nested) => collect_roots(nested, found),
            _ => {}
        }
    }
}

impl From<Map<String, Value>> for SynStruc {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

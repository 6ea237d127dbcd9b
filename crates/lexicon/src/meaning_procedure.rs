use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name given to a meaning procedure with no call form
pub const UNKNOWN_PROCEDURE: &str = "UNKNOWN-MP";

/// A named post-processing call attached to a sense
///
/// Built from a call-like list `[NAME, PARAM...]`. Parameters are kept
/// verbatim; a parameter may be a nested list such as `["VALUE", "^$VAR1"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Value>", into = "Vec<Value>")]
pub struct MeaningProcedure {
    name: String,
    parameters: Vec<Value>,
}

impl MeaningProcedure {
    pub fn new(call: Vec<Value>) -> Self {
        let mut items = call.into_iter();
        let Some(head) = items.next() else {
            return Self {
                name: UNKNOWN_PROCEDURE.to_string(),
                parameters: Vec::new(),
            };
        };

        let name = match head {
            Value::String(name) => name,
            other => other.to_string(),
        };

        Self {
            name,
            parameters: items.collect(),
        }
    }

    /// Build from any value; a bare atom is a call with no parameters
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::new(items.clone()),
            Value::Null => Self::new(Vec::new()),
            other => Self::new(vec![other.clone()]),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    /// The call form this procedure was built from
    pub fn to_value(&self) -> Value {
        Value::Array(self.clone().into())
    }
}

impl From<Vec<Value>> for MeaningProcedure {
    fn from(call: Vec<Value>) -> Self {
        Self::new(call)
    }
}

impl From<MeaningProcedure> for Vec<Value> {
    fn from(mp: MeaningProcedure) -> Self {
        if mp.name == UNKNOWN_PROCEDURE && mp.parameters.is_empty() {
            return Vec::new();
        }

        let mut call = Vec::with_capacity(mp.parameters.len() + 1);
        call.push(Value::String(mp.name));
        call.extend(mp.parameters);
        call
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_and_parameters() {
        let mp = MeaningProcedure::new(vec![
            json!("MP-NAME"),
            json!("PARAMETER1"),
            json!(["VALUE", "PARAMETER2"]),
        ]);

        assert_eq!(mp.name(), "MP-NAME");
        assert_eq!(
            mp.parameters(),
            &[json!("PARAMETER1"), json!(["VALUE", "PARAMETER2"])]
        );
    }

    #[test]
    fn test_empty_call_is_unknown() {
        let mp = MeaningProcedure::new(vec![]);
        assert_eq!(mp.name(), UNKNOWN_PROCEDURE);
        assert!(mp.parameters().is_empty());
    }

    #[test]
    fn test_bare_atom() {
        let mp = MeaningProcedure::from_value(&json!("TEST-MP2"));
        assert_eq!(mp.name(), "TEST-MP2");
        assert!(mp.parameters().is_empty());
    }

    #[test]
    fn test_to_value_keeps_call_form() {
        let call = json!(["FIX-CASE-ROLE", ["VALUE", "^$VAR1"], ["VALUE", "^$VAR2"]]);
        assert_eq!(MeaningProcedure::from_value(&call).to_value(), call);
        assert_eq!(MeaningProcedure::new(vec![]).to_value(), json!([]));
    }

    #[test]
    fn test_serde_as_call_list() {
        let mp: MeaningProcedure = serde_json::from_value(json!(["TEST-MP1", "PARAM1"])).unwrap();
        assert_eq!(mp.name(), "TEST-MP1");
        assert_eq!(serde_json::to_value(&mp).unwrap(), json!(["TEST-MP1", "PARAM1"]));
    }
}

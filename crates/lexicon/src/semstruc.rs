use crate::error::{LexiconError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static RESERVED_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(REFSEM|\^\$VAR)(.*)$").expect("reserved key pattern"));

/// Lexical class of a semantic structure key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyClass {
    Concept,
    RefSem(u32),
    Variable(u32),
}

impl KeyClass {
    fn of(key: &str) -> Result<Self> {
        let Some(caps) = RESERVED_KEY.captures(key) else {
            return Ok(Self::Concept);
        };

        let suffix = &caps[2];
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LexiconError::MissingIndex(key.to_string()));
        }
        let index: u32 = suffix
            .parse()
            .map_err(|_| LexiconError::MissingIndex(key.to_string()))?;

        Ok(if &caps[1] == "REFSEM" {
            Self::RefSem(index)
        } else {
            Self::Variable(index)
        })
    }
}

/// The head concept of a semantic structure
#[derive(Debug, Clone, PartialEq)]
pub struct Head {
    pub concept: String,
    pub contents: Value,
}

impl Head {
    pub fn new(concept: impl Into<String>, contents: Value) -> Self {
        Self {
            concept: concept.into(),
            contents,
        }
    }
}

/// A non-head concept, numbered from 1 among sub concepts only
#[derive(Debug, Clone, PartialEq)]
pub struct Sub {
    pub index: usize,
    pub concept: String,
    pub contents: Value,
}

impl Sub {
    pub fn new(index: usize, concept: impl Into<String>, contents: Value) -> Self {
        Self {
            index,
            concept: concept.into(),
            contents,
        }
    }
}

/// An embedded semantic structure under `REFSEM<N>`
#[derive(Debug, Clone, PartialEq)]
pub struct RefSem {
    pub index: u32,
    pub semstruc: SemStruc,
}

impl RefSem {
    pub fn new(index: u32, semstruc: SemStruc) -> Self {
        Self { index, semstruc }
    }
}

/// A variable binding under `^$VAR<N>`; contents stay unwrapped
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub index: u32,
    pub contents: Value,
}

impl Variable {
    pub fn new(index: u32, contents: Value) -> Self {
        Self { index, contents }
    }
}

/// One classified entry of a semantic structure
#[derive(Debug, Clone, PartialEq)]
pub enum SemElement {
    Head(Head),
    Sub(Sub),
    RefSem(RefSem),
    Variable(Variable),
}

/// Semantic structure of a sense: concept keys mapped to role mappings
///
/// Keys are classified once, when the structure is built:
///
/// ```text
/// REFSEM<N>   -> RefSem (value wrapped as a nested SemStruc)
/// ^$VAR<N>    -> Variable (value kept raw)
/// anything    -> first one is the Head, the rest are Subs 1..N
/// ```
///
/// Equality compares the underlying mapping and ignores key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct SemStruc {
    data: Map<String, Value>,
    elements: Vec<SemElement>,
}

impl SemStruc {
    /// Build from a canonical mapping, classifying every key
    pub fn new(data: Map<String, Value>) -> Result<Self> {
        let elements = classify(&data)?;
        Ok(Self { data, elements })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any stored shape
    ///
    /// Besides a mapping this accepts the legacy shapes found in lexicon
    /// data: `""`, `NIL` or null (empty), a bare concept name, and a one
    /// element list holding a concept name.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::new(map.clone()),
            Value::Null => Ok(Self::empty()),
            Value::String(s) if s.is_empty() || s == "NIL" => Ok(Self::empty()),
            Value::String(concept) => Self::new(bare_concept(concept)),
            Value::Array(items) => match items.as_slice() {
                [] => Ok(Self::empty()),
                [Value::String(concept)] => Self::new(bare_concept(concept)),
                _ => Err(LexiconError::MalformedSemStruc(value.to_string())),
            },
            other => Err(LexiconError::MalformedSemStruc(other.to_string())),
        }
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All classified elements in insertion order
    pub fn elements(&self) -> &[SemElement] {
        &self.elements
    }

    pub fn head(&self) -> Option<&Head> {
        self.elements.iter().find_map(|e| match e {
            SemElement::Head(head) => Some(head),
            _ => None,
        })
    }

    pub fn subs(&self) -> Vec<&Sub> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                SemElement::Sub(sub) => Some(sub),
                _ => None,
            })
            .collect()
    }

    pub fn refsems(&self) -> Vec<&RefSem> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                SemElement::RefSem(refsem) => Some(refsem),
                _ => None,
            })
            .collect()
    }

    pub fn variables(&self) -> Vec<&Variable> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                SemElement::Variable(variable) => Some(variable),
                _ => None,
            })
            .collect()
    }

    /// Copy of this structure with the head concept key renamed in place
    ///
    /// Fails when `concept` already names a sub concept or has a reserved
    /// key shape. Without a head the structure is returned as is.
    pub fn with_head(&self, concept: &str) -> Result<Self> {
        if KeyClass::of(concept).ok() != Some(KeyClass::Concept) {
            return Err(LexiconError::InvalidReplacement(concept.to_string()));
        }

        let Some(head) = self.head() else {
            return Ok(self.clone());
        };
        if head.concept != concept && self.data.contains_key(concept) {
            return Err(LexiconError::InvalidReplacement(format!(
                "{concept} is already a sub concept"
            )));
        }

        let mut data = Map::with_capacity(self.data.len());
        for (key, value) in &self.data {
            if *key == head.concept {
                data.insert(concept.to_string(), value.clone());
            } else {
                data.insert(key.clone(), value.clone());
            }
        }

        Self::new(data)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.data.clone())
    }
}

fn bare_concept(concept: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(concept.to_string(), Value::Object(Map::new()));
    map
}

fn classify(data: &Map<String, Value>) -> Result<Vec<SemElement>> {
    let mut elements = Vec::with_capacity(data.len());
    let mut seen_head = false;
    let mut sub_index = 0;

    for (key, value) in data {
        let element = match KeyClass::of(key)? {
            KeyClass::Concept if !seen_head => {
                seen_head = true;
                SemElement::Head(Head::new(key.clone(), value.clone()))
            }
            KeyClass::Concept => {
                sub_index += 1;
                SemElement::Sub(Sub::new(sub_index, key.clone(), value.clone()))
            }
            KeyClass::RefSem(index) => {
                SemElement::RefSem(RefSem::new(index, SemStruc::from_value(value)?))
            }
            KeyClass::Variable(index) => {
                SemElement::Variable(Variable::new(index, value.clone()))
            }
        };
        elements.push(element);
    }

    Ok(elements)
}

impl PartialEq for SemStruc {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl TryFrom<Value> for SemStruc {
    type Error = LexiconError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<SemStruc> for Value {
    fn from(semstruc: SemStruc) -> Self {
        Value::Object(semstruc.data)
    }
}

//! Conversion of nested-list lexical entries into typed sense structures.
//!
//! An entry is a list headed by the sense id, followed by tagged sections:
//!
//! ```text
//! entry        = [ sense_id, section* ]
//! section      = [ "CAT", pos ]                      required
//!              | [ "SEM-STRUC", sem_entry* ]         required
//!              | [ "SYN-STRUC", [ pair* ] ]          default: empty
//!              | [ "MEANING-PROCEDURES", call* ]     default: none
//!              | [ "SYNONYMS", atom* ] | [ "HYPONYMS", atom* ]
//!              | [ "DEF", atom ] | [ "EX", atom ]
//! pair         = [ key, value ]                      value may be [ pair* ]
//! sem_entry    = [ key, [ role, filler ]* ] | key
//! ```
//!
//! Sections are found by tag, never by position. Unknown tags are skipped.

use crate::error::{LexiconError, Result};
use crate::meaning_procedure::MeaningProcedure;
use crate::semstruc::SemStruc;
use crate::sense::Sense;
use crate::sense_id::{word_of, SenseId};
use crate::synstruc::SynStruc;
use serde_json::{Map, Value};

const REFSEM_PREFIX: &str = "REFSEM";

/// Tag of an entry section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Cat,
    SynStruc,
    SemStruc,
    MeaningProcedures,
    Synonyms,
    Hyponyms,
    Definition,
    Example,
}

impl Section {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CAT" => Some(Self::Cat),
            "SYN-STRUC" => Some(Self::SynStruc),
            "SEM-STRUC" => Some(Self::SemStruc),
            "MEANING-PROCEDURES" => Some(Self::MeaningProcedures),
            "SYNONYMS" => Some(Self::Synonyms),
            "HYPONYMS" => Some(Self::Hyponyms),
            "DEF" => Some(Self::Definition),
            "EX" => Some(Self::Example),
            _ => None,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Cat => "CAT",
            Self::SynStruc => "SYN-STRUC",
            Self::SemStruc => "SEM-STRUC",
            Self::MeaningProcedures => "MEANING-PROCEDURES",
            Self::Synonyms => "SYNONYMS",
            Self::Hyponyms => "HYPONYMS",
            Self::Definition => "DEF",
            Self::Example => "EX",
        }
    }
}

/// Sections of one entry, located by tag
#[derive(Debug, Default)]
struct Sections<'a> {
    cat: Option<&'a [Value]>,
    synstruc: Option<&'a [Value]>,
    semstruc: Option<&'a [Value]>,
    meaning_procedures: Option<&'a [Value]>,
    synonyms: Option<&'a [Value]>,
    hyponyms: Option<&'a [Value]>,
    definition: Option<&'a [Value]>,
    example: Option<&'a [Value]>,
}

impl<'a> Sections<'a> {
    fn collect(id: &str, items: &'a [Value]) -> Result<Self> {
        let mut sections = Self::default();

        for item in items {
            let Value::Array(list) = item else {
                return Err(LexiconError::malformed(format!(
                    "{id}: section {item} is not a list"
                )));
            };
            let Some((Value::String(tag), body)) = list.split_first() else {
                return Err(LexiconError::malformed(format!(
                    "{id}: section {item} has no tag"
                )));
            };

            let Some(section) = Section::from_tag(tag) else {
                log::debug!("{id}: skipping section {tag}");
                continue;
            };

            let slot = match section {
                Section::Cat => &mut sections.cat,
                Section::SynStruc => &mut sections.synstruc,
                Section::SemStruc => &mut sections.semstruc,
                Section::MeaningProcedures => &mut sections.meaning_procedures,
                Section::Synonyms => &mut sections.synonyms,
                Section::Hyponyms => &mut sections.hyponyms,
                Section::Definition => &mut sections.definition,
                Section::Example => &mut sections.example,
            };
            if slot.replace(body).is_some() {
                log::warn!("{id}: duplicate {} section, keeping the last", section.tag());
            }
        }

        Ok(sections)
    }
}

/// Parse one nested-list entry into a [`Sense`]
pub fn parse_entry(expr: &Value) -> Result<Sense> {
    let Value::Array(items) = expr else {
        return Err(LexiconError::malformed(format!("entry {expr} is not a list")));
    };
    let Some((Value::String(id), rest)) = items.split_first() else {
        return Err(LexiconError::malformed(format!("entry {expr} has no sense id")));
    };

    let sections = Sections::collect(id, rest)?;

    let pos = match sections.cat {
        Some([Value::String(pos)]) => pos.clone(),
        Some(other) => {
            return Err(LexiconError::malformed(format!(
                "{id}: CAT takes one atom, got {}",
                Value::Array(other.to_vec())
            )))
        }
        None => return Err(LexiconError::missing_section(id, Section::Cat.tag())),
    };

    let semstruc = match sections.semstruc {
        Some(entries) => SemStruc::new(sem_body(id, entries)?)?,
        None => return Err(LexiconError::missing_section(id, Section::SemStruc.tag())),
    };

    let synstruc = match sections.synstruc {
        None | Some([]) => SynStruc::empty(),
        Some([Value::Array(pairs)]) => SynStruc::new(syn_body(id, pairs)?),
        Some(other) => {
            return Err(LexiconError::malformed(format!(
                "{id}: SYN-STRUC takes one list of pairs, got {}",
                Value::Array(other.to_vec())
            )))
        }
    };

    let meaning_procedures = sections
        .meaning_procedures
        .unwrap_or_default()
        .iter()
        .filter(|mp| !is_nil(mp))
        .map(MeaningProcedure::from_value)
        .collect();

    let word = SenseId::parse(id)
        .map(|sid| sid.word)
        .unwrap_or_else(|_| word_of(id).to_string());

    Ok(Sense {
        id: id.clone(),
        word,
        pos,
        synstruc,
        semstruc,
        meaning_procedures,
        synonyms: atoms(sections.synonyms.unwrap_or_default()),
        hyponyms: atoms(sections.hyponyms.unwrap_or_default()),
        definition: single_atom(sections.definition),
        example: single_atom(sections.example),
    })
}

/// Parse Lisp text holding any number of entries
pub fn parse_text(input: &str) -> Result<Vec<Sense>> {
    crate::reader::read_all(input)?
        .iter()
        .map(parse_entry)
        .collect()
}

fn is_nil(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("NIL")
}

/// `[[key, value], ...]` as an ordered mapping
fn syn_body(id: &str, pairs: &[Value]) -> Result<Map<String, Value>> {
    let mut map = Map::with_capacity(pairs.len());
    for pair in pairs {
        let Some((key, value)) = as_pair(pair) else {
            return Err(LexiconError::malformed(format!(
                "{id}: SYN-STRUC item {pair} is not a [key, value] pair"
            )));
        };
        let value = match value {
            Value::Array(items) if is_pair_list(items) => Value::Object(syn_body(id, items)?),
            other => other.clone(),
        };
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// `[key, [role, filler]...]` entries merged into one mapping
///
/// A `REFSEM<N>` entry holds an embedded structure instead of roles, so its
/// items are read as concept entries themselves.
fn sem_body(id: &str, entries: &[Value]) -> Result<Map<String, Value>> {
    let mut map = Map::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(key) => {
                map.insert(key.clone(), Value::Object(Map::new()));
            }
            Value::Array(items) => {
                let Some((Value::String(key), rest)) = items.split_first() else {
                    return Err(LexiconError::malformed(format!(
                        "{id}: SEM-STRUC entry {entry} has no concept key"
                    )));
                };
                let body = if key.starts_with(REFSEM_PREFIX) {
                    sem_body(id, rest)?
                } else {
                    role_body(id, key, rest)?
                };
                map.insert(key.clone(), Value::Object(body));
            }
            other => {
                return Err(LexiconError::malformed(format!(
                    "{id}: SEM-STRUC entry {other} is neither a concept nor a list"
                )))
            }
        }
    }
    Ok(map)
}

/// `[role, filler...]` items of one concept as a role mapping
fn role_body(id: &str, key: &str, roles: &[Value]) -> Result<Map<String, Value>> {
    let mut role_map = Map::with_capacity(roles.len());
    for role in roles {
        let Some((Value::String(name), fillers)) = role.as_array().and_then(|r| r.split_first())
        else {
            return Err(LexiconError::malformed(format!(
                "{id}: {key} role {role} is not a [role, filler] list"
            )));
        };
        let value = match fillers {
            [] => {
                return Err(LexiconError::malformed(format!(
                    "{id}: {key} role {name} has no filler"
                )))
            }
            [filler] => filler_value(filler),
            facets if is_pair_list(facets) => Value::Object(
                facets
                    .iter()
                    .filter_map(as_pair)
                    .map(|(facet, value)| (facet.to_string(), filler_value(value)))
                    .collect(),
            ),
            others => Value::Array(others.to_vec()),
        };
        role_map.insert(name.clone(), value);
    }
    Ok(role_map)
}

/// Fillers that are `[role, value]` (or lists of them) become role mappings;
/// anything else is kept as is
fn filler_value(filler: &Value) -> Value {
    match filler {
        Value::Array(items) => {
            if let Some((role, value)) = as_pair(filler) {
                let mut nested = Map::new();
                nested.insert(role.to_string(), filler_value(value));
                Value::Object(nested)
            } else if is_pair_list(items) {
                let nested = items
                    .iter()
                    .filter_map(as_pair)
                    .map(|(role, value)| (role.to_string(), filler_value(value)))
                    .collect();
                Value::Object(nested)
            } else {
                filler.clone()
            }
        }
        other => other.clone(),
    }
}

fn as_pair(value: &Value) -> Option<(&str, &Value)> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(key), value]) => Some((key.as_str(), value)),
        _ => None,
    }
}

fn is_pair_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(|item| as_pair(item).is_some())
}

fn atoms(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !is_nil(item))
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

fn single_atom(body: Option<&[Value]>) -> Option<String> {
    match body? {
        [Value::String(s)] if s != "NIL" => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_section_tags_roundtrip() {
        for section in [
            Section::Cat,
            Section::SynStruc,
            Section::SemStruc,
            Section::MeaningProcedures,
            Section::Synonyms,
            Section::Hyponyms,
            Section::Definition,
            Section::Example,
        ] {
            assert_eq!(Section::from_tag(section.tag()), Some(section));
        }
        assert_eq!(Section::from_tag("TMR-HEAD"), None);
    }

    #[test]
    fn test_syn_body_nests_pair_lists() {
        let pairs = json!([
            ["ROOT", "$VAR0"],
            ["DIRECTOBJECT", [["ROOT", "$VAR2"], ["CAT", "N"]]],
            ["OPT", ["A", "B", "C"]]
        ]);
        let body = syn_body("X", pairs.as_array().unwrap()).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({
                "ROOT": "$VAR0",
                "DIRECTOBJECT": {"ROOT": "$VAR2", "CAT": "N"},
                "OPT": ["A", "B", "C"]
            })
        );
    }

    #[test]
    fn test_syn_body_rejects_non_pairs() {
        let err = syn_body("X", json!([["ROOT"]]).as_array().unwrap()).unwrap_err();
        assert!(matches!(err, LexiconError::MalformedExpression(_)));
    }

    #[test]
    fn test_filler_value() {
        assert_eq!(filler_value(&json!("*HEARER*")), json!("*HEARER*"));
        assert_eq!(filler_value(&json!(["VALUE", "^$VAR2"])), json!({"VALUE": "^$VAR2"}));
        assert_eq!(
            filler_value(&json!([["SEM", "HUMAN"], ["VALUE", "^$VAR1"]])),
            json!({"SEM": "HUMAN", "VALUE": "^$VAR1"})
        );
        assert_eq!(
            filler_value(&json!(["VALUE", ["RELAXABLE-TO", "ANIMAL"]])),
            json!({"VALUE": {"RELAXABLE-TO": "ANIMAL"}})
        );
        assert_eq!(filler_value(&json!(["OR", "A", "B"])), json!(["OR", "A", "B"]));
    }

    #[test]
    fn test_sem_body_bare_concept_entry() {
        let entries = json!(["HUMAN", ["DOG"]]);
        let body = sem_body("X", entries.as_array().unwrap()).unwrap();
        assert_eq!(Value::Object(body), json!({"HUMAN": {}, "DOG": {}}));
    }

    #[test]
    fn test_sem_body_refsem_holds_concept_entries() {
        let entries = json!([
            ["HERE"],
            ["REFSEM1", ["PLACE"]],
            ["REFSEM2", ["EVENT", ["AGENT", "A"], ["THEME", "B"]]]
        ]);
        let body = sem_body("THERE-ADV1", entries.as_array().unwrap()).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({
                "HERE": {},
                "REFSEM1": {"PLACE": {}},
                "REFSEM2": {"EVENT": {"AGENT": "A", "THEME": "B"}}
            })
        );
    }

    #[test]
    fn test_role_with_several_facets() {
        let entries = json!([
            ["GIVE", ["THEME", ["VALUE", "^$VAR2"], ["SEM", "OBJECT"]], ["AGENT", "A", "B"]]
        ]);
        let body = sem_body("X", entries.as_array().unwrap()).unwrap();
        assert_eq!(
            Value::Object(body),
            json!({
                "GIVE": {
                    "THEME": {"VALUE": "^$VAR2", "SEM": "OBJECT"},
                    "AGENT": ["A", "B"]
                }
            })
        );
    }

    #[test]
    fn test_role_without_filler_is_rejected() {
        let entries = json!([["GIVE", ["THEME"]]]);
        let err = sem_body("X", entries.as_array().unwrap()).unwrap_err();
        assert!(matches!(err, LexiconError::MalformedExpression(_)));
    }

    #[test]
    fn test_optional_sections() {
        let sense = parse_entry(&json!([
            "FIX-V2",
            ["CAT", "V"],
            ["SEM-STRUC", ["FASTEN"]],
            ["SYNONYMS", "ATTACH", "SECURE"],
            ["HYPONYMS", "NIL"],
            ["DEF", "to fasten"],
            ["EX", "NIL"],
            ["TMR-HEAD", "FASTEN"]
        ]))
        .unwrap();

        assert_eq!(sense.word, "FIX");
        assert_eq!(sense.synonyms, vec!["ATTACH", "SECURE"]);
        assert!(sense.hyponyms.is_empty());
        assert_eq!(sense.definition.as_deref(), Some("to fasten"));
        assert_eq!(sense.example, None);
    }

    #[test]
    fn test_nil_meaning_procedures() {
        let sense = parse_entry(&json!([
            "A-N1", ["CAT", "N"], ["SEM-STRUC", "HUMAN"], ["MEANING-PROCEDURES", "NIL"]
        ]))
        .unwrap();
        assert!(sense.meaning_procedures.is_empty());
    }

    #[test]
    fn test_malformed_entries() {
        assert!(matches!(
            parse_entry(&json!("KICK-V1")),
            Err(LexiconError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse_entry(&json!([["CAT", "V"]])),
            Err(LexiconError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse_entry(&json!(["KICK-V1", "CAT"])),
            Err(LexiconError::MalformedExpression(_))
        ));
        assert!(matches!(
            parse_entry(&json!(["KICK-V1", ["CAT", "V", "N"], ["SEM-STRUC", "KICK"]])),
            Err(LexiconError::MalformedExpression(_))
        ));
    }
}

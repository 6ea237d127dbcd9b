use crate::error::{LexiconError, Result};
use crate::lisp;
use crate::meaning_procedure::MeaningProcedure;
use crate::semstruc::SemStruc;
use crate::sense_id::{word_of, SenseId};
use crate::synstruc::SynStruc;
use ontolex_frames::Frame;
use serde_json::{Map, Value};

/// Frame slot names a sense is stored under
pub mod slots {
    pub const WORD: &str = "WORD";
    pub const CAT: &str = "CAT";
    pub const SENSE: &str = "SENSE";
    pub const SYN_STRUC: &str = "SYN-STRUC";
    pub const SEM_STRUC: &str = "SEM-STRUC";
    pub const MEANING_PROCEDURES: &str = "MEANING-PROCEDURES";
    pub const SYNONYMS: &str = "SYNONYMS";
    pub const HYPONYMS: &str = "HYPONYMS";
    pub const DEF: &str = "DEF";
    pub const EX: &str = "EX";
}

/// One word sense: syntax, semantics, meaning procedures and related words
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    /// Sense identifier (e.g., "KICK--IMPERATIVE-V1")
    pub id: String,

    /// Surface lemma
    pub word: String,

    /// Category / part of speech
    pub pos: String,

    pub synstruc: SynStruc,
    pub semstruc: SemStruc,
    pub meaning_procedures: Vec<MeaningProcedure>,

    /// Synonym concepts or words, in authored order
    pub synonyms: Vec<String>,

    /// Hyponym concepts or words, in authored order
    pub hyponyms: Vec<String>,

    pub definition: Option<String>,
    pub example: Option<String>,
}

impl Sense {
    /// Parse a nested-list lexical entry
    ///
    /// ```rust
    /// use ontolex_lexicon::Sense;
    /// use serde_json::json;
    ///
    /// let sense = Sense::parse_lisp(&json!([
    ///     "DOG-N1",
    ///     ["CAT", "N"],
    ///     ["SEM-STRUC", ["DOG"]]
    /// ]))
    /// .unwrap();
    ///
    /// assert_eq!(sense.pos, "N");
    /// assert_eq!(sense.semstruc.head().unwrap().concept, "DOG");
    /// ```
    pub fn parse_lisp(expr: &Value) -> Result<Self> {
        lisp::parse_entry(expr)
    }

    /// Rebuild a sense from the slots of a stored frame
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let name = frame.name.as_str();

        let id = required_atom(frame, slots::SENSE)?;
        let pos = required_atom(frame, slots::CAT)?;
        let word = optional_atom(frame, slots::WORD)?.unwrap_or_else(|| {
            SenseId::parse(&id)
                .map(|sid| sid.word)
                .unwrap_or_else(|_| word_of(&id).to_string())
        });

        let synstruc = match frame.get_slot(slots::SYN_STRUC) {
            None | Some(Value::Null) => SynStruc::empty(),
            Some(Value::String(s)) if s.is_empty() || s == "NIL" => SynStruc::empty(),
            Some(Value::Object(map)) => SynStruc::new(map.clone()),
            Some(other) => return Err(malformed(name, slots::SYN_STRUC, other)),
        };

        let semstruc = match frame.get_slot(slots::SEM_STRUC) {
            None => SemStruc::empty(),
            Some(value) => SemStruc::from_value(value).map_err(|e| LexiconError::MalformedSlot {
                frame: name.to_string(),
                slot: slots::SEM_STRUC.to_string(),
                reason: e.to_string(),
            })?,
        };

        let meaning_procedures = match frame.get_slot(slots::MEANING_PROCEDURES) {
            Some(Value::Array(calls)) => calls.iter().map(MeaningProcedure::from_value).collect(),
            Some(value) if is_nil(value) => Vec::new(),
            None => Vec::new(),
            Some(other) => return Err(malformed(name, slots::MEANING_PROCEDURES, other)),
        };

        Ok(Self {
            id,
            word,
            pos,
            synstruc,
            semstruc,
            meaning_procedures,
            synonyms: word_list(frame.get_slot(slots::SYNONYMS)),
            hyponyms: word_list(frame.get_slot(slots::HYPONYMS)),
            definition: optional_atom(frame, slots::DEF)?,
            example: optional_atom(frame, slots::EX)?,
        })
    }

    /// Slot fillers that [`Sense::from_frame`] reads back into this sense
    pub fn to_slots(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(slots::WORD.into(), Value::String(self.word.clone()));
        map.insert(slots::CAT.into(), Value::String(self.pos.clone()));
        map.insert(slots::SENSE.into(), Value::String(self.id.clone()));
        map.insert(slots::SYN_STRUC.into(), self.synstruc.to_value());
        map.insert(slots::SEM_STRUC.into(), self.semstruc.to_value());
        map.insert(
            slots::MEANING_PROCEDURES.into(),
            Value::Array(self.meaning_procedures.iter().map(MeaningProcedure::to_value).collect()),
        );
        map.insert(slots::SYNONYMS.into(), string_list(&self.synonyms));
        map.insert(slots::HYPONYMS.into(), string_list(&self.hyponyms));
        map.insert(slots::DEF.into(), optional_string(&self.definition));
        map.insert(slots::EX.into(), optional_string(&self.example));
        map
    }

    /// A new sense with the semantic head replaced by `replacement`
    ///
    /// Everything but the head concept key is carried over. The word becomes
    /// `replacement` and the id has its leading word swapped for it, so
    /// duplicating `FIX-V2` with `ATTACH` yields `ATTACH-V2`.
    pub fn duplicate(&self, replacement: &str) -> Result<Self> {
        let semstruc = self.semstruc.with_head(replacement)?;

        let id = match self.id.strip_prefix(self.word.as_str()) {
            Some(rest) if !self.word.is_empty() => format!("{replacement}{rest}"),
            _ => format!("{replacement}-{}", self.id),
        };

        Ok(Self {
            id,
            word: replacement.to_string(),
            semstruc,
            ..self.clone()
        })
    }

    /// Parsed form of this sense's id, when it has one
    pub fn sense_id(&self) -> Option<SenseId> {
        SenseId::parse(&self.id).ok()
    }
}

fn malformed(frame: &str, slot: &str, value: &Value) -> LexiconError {
    LexiconError::MalformedSlot {
        frame: frame.to_string(),
        slot: slot.to_string(),
        reason: format!("unexpected value {value}"),
    }
}

fn is_nil(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("NIL")
}

fn required_atom(frame: &Frame, slot: &str) -> Result<String> {
    optional_atom(frame, slot)?.ok_or_else(|| LexiconError::MissingSlot {
        frame: frame.name.clone(),
        slot: slot.to_string(),
    })
}

fn optional_atom(frame: &Frame, slot: &str) -> Result<Option<String>> {
    match frame.get_slot(slot) {
        None => Ok(None),
        Some(value) if is_nil(value) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(malformed(&frame.name, slot, other)),
    }
}

/// Words from a list slot; nested lists are flattened and NIL means none
fn word_list(value: Option<&Value>) -> Vec<String> {
    let mut words = Vec::new();
    if let Some(value) = value {
        collect_words(value, &mut words);
    }
    words
}

fn collect_words(value: &Value, words: &mut Vec<String>) {
    match value {
        Value::String(s) if s != "NIL" => words.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| collect_words(item, words)),
        _ => {}
    }
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn optional_string(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fix_frame() -> Frame {
        let mut frame = Frame::new("FIX.V.2");
        frame.set_slot("WORD", json!("FIX"));
        frame.set_slot("CAT", json!("V"));
        frame.set_slot("SENSE", json!("FIX-V2"));
        frame.set_slot(
            "SYN-STRUC",
            json!({
                "SUBJECT": {"ROOT": "$VAR1", "CAT": "NP"},
                "ROOT": "$VAR0",
                "CAT": "V",
                "DIRECTOBJECT": {"ROOT": "$VAR2", "CAT": "NP"},
                "PP": {"ROOT-WORD": "TO", "ROOT": "$VAR4", "CAT": "PREP",
                       "OBJ": {"ROOT": "$VAR3", "CAT": "N"}}
            }),
        );
        frame.set_slot(
            "SEM-STRUC",
            json!({
                "FASTEN": {
                    "AGENT": {"VALUE": "^$VAR1"},
                    "THEME": {"VALUE": "^$VAR2"},
                    "DESTINATION": {"VALUE": "^$VAR3"}
                },
                "^$VAR4": {"NULL-SEM": "+"}
            }),
        );
        frame.set_slot("MEANING-PROCEDURES", json!([]));
        frame.set_slot("SYNONYMS", json!([["ATTACH", "FASTEN", "SECURE"]]));
        frame.set_slot("HYPONYMS", json!("NIL"));
        frame
    }

    #[test]
    fn test_from_frame_normalizes_related_words() {
        let sense = Sense::from_frame(&fix_frame()).unwrap();
        assert_eq!(sense.synonyms, vec!["ATTACH", "FASTEN", "SECURE"]);
        assert!(sense.hyponyms.is_empty());
        assert_eq!(sense.definition, None);
    }

    #[test]
    fn test_duplicate_replaces_head_only() {
        let sense = Sense::from_frame(&fix_frame()).unwrap();
        let duplicate = sense.duplicate(&sense.synonyms[0]).unwrap();

        assert_eq!(duplicate.id, "ATTACH-V2");
        assert_eq!(duplicate.word, "ATTACH");
        assert_eq!(duplicate.pos, sense.pos);
        assert_eq!(duplicate.synstruc, sense.synstruc);
        assert_eq!(duplicate.meaning_procedures, sense.meaning_procedures);
        assert_eq!(duplicate.semstruc.head().unwrap().concept, "ATTACH");
        assert_eq!(
            duplicate.semstruc.head().unwrap().contents,
            sense.semstruc.head().unwrap().contents
        );
        assert_eq!(duplicate.semstruc.variables(), sense.semstruc.variables());

        // the original is untouched
        assert_eq!(sense.id, "FIX-V2");
        assert_eq!(sense.semstruc.head().unwrap().concept, "FASTEN");
    }

    #[test]
    fn test_duplicate_with_own_head_keeps_semstruc() {
        let sense = Sense::from_frame(&fix_frame()).unwrap();
        let duplicate = sense.duplicate("FASTEN").unwrap();
        assert_eq!(duplicate.semstruc, sense.semstruc);
        assert_eq!(duplicate.id, "FASTEN-V2");
    }

    #[test]
    fn test_duplicate_onto_sub_concept_fails() {
        let mut frame = fix_frame();
        frame.set_slot(
            "SEM-STRUC",
            json!({
                "FASTEN": {"AGENT": {"VALUE": "^$VAR1"}},
                "SECURE": {"THEME": {"VALUE": "^$VAR2"}}
            }),
        );
        let sense = Sense::from_frame(&frame).unwrap();

        assert!(matches!(
            sense.duplicate("SECURE"),
            Err(LexiconError::InvalidReplacement(_))
        ));
        assert_eq!(sense.semstruc.subs()[0].concept, "SECURE");
    }

    #[test]
    fn test_from_frame_requires_sense_and_cat() {
        let mut frame = fix_frame();
        frame.slots.remove("SENSE");
        assert!(matches!(
            Sense::from_frame(&frame),
            Err(LexiconError::MissingSlot { slot, .. }) if slot == "SENSE"
        ));

        let mut frame = fix_frame();
        frame.set_slot("CAT", json!("NIL"));
        assert!(matches!(
            Sense::from_frame(&frame),
            Err(LexiconError::MissingSlot { slot, .. }) if slot == "CAT"
        ));
    }

    #[test]
    fn test_from_frame_rejects_malformed_slots() {
        let mut frame = fix_frame();
        frame.set_slot("SYN-STRUC", json!(["ROOT", "$VAR0"]));
        assert!(matches!(
            Sense::from_frame(&frame),
            Err(LexiconError::MalformedSlot { slot, .. }) if slot == "SYN-STRUC"
        ));

        let mut frame = fix_frame();
        frame.set_slot("SEM-STRUC", json!({"REFSEM": {}}));
        assert!(matches!(
            Sense::from_frame(&frame),
            Err(LexiconError::MalformedSlot { slot, .. }) if slot == "SEM-STRUC"
        ));
    }

    #[test]
    fn test_word_falls_back_to_id() {
        let mut frame = fix_frame();
        frame.slots.remove("WORD");
        assert_eq!(Sense::from_frame(&frame).unwrap().word, "FIX");
    }
}

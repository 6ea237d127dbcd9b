use crate::error::Result;
use crate::lisp;
use crate::sense::{slots, Sense};
use crate::sense_id::SenseId;
use ontolex_frames::FrameGraph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Root frame every sense frame is linked under
pub const LEX_WORD: &str = "LEX-WORD";

/// Space holding every installed sense frame
pub const LEX_SPACE: &str = "LEX";

/// One lexicon row as found in a lexicon file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenseRecord {
    #[serde(rename = "SENSE")]
    pub sense: String,

    #[serde(rename = "WORD", default)]
    pub word: Value,

    #[serde(rename = "CAT", default)]
    pub cat: Value,

    #[serde(rename = "SYN-STRUC", default)]
    pub synstruc: Value,

    #[serde(rename = "SEM-STRUC", default)]
    pub semstruc: Value,

    #[serde(rename = "MEANING-PROCEDURES", default)]
    pub meaning_procedures: Value,

    #[serde(rename = "SYNONYMS", default)]
    pub synonyms: Value,

    #[serde(rename = "HYPONYMS", default)]
    pub hyponyms: Value,

    #[serde(rename = "DEF", default)]
    pub definition: Value,

    #[serde(rename = "EX", default)]
    pub example: Value,
}

impl SenseRecord {
    /// Slot fillers written to the sense frame, absent fields left out
    fn slot_fillers(&self) -> Vec<(&'static str, Value)> {
        let meaning_procedures = match &self.meaning_procedures {
            Value::String(s) if s == "NIL" => Value::Array(Vec::new()),
            Value::Null => Value::Array(Vec::new()),
            other => other.clone(),
        };

        [
            (slots::SENSE, Value::String(self.sense.clone())),
            (slots::WORD, self.word.clone()),
            (slots::CAT, self.cat.clone()),
            (slots::SYN_STRUC, self.synstruc.clone()),
            (slots::SEM_STRUC, self.semstruc.clone()),
            (slots::MEANING_PROCEDURES, meaning_procedures),
            (slots::SYNONYMS, self.synonyms.clone()),
            (slots::HYPONYMS, self.hyponyms.clone()),
            (slots::DEF, self.definition.clone()),
            (slots::EX, self.example.clone()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect()
    }
}

impl From<&Sense> for SenseRecord {
    fn from(sense: &Sense) -> Self {
        let mut fillers = sense.to_slots();
        let mut take = |slot: &str| fillers.remove(slot).unwrap_or(Value::Null);

        Self {
            sense: sense.id.clone(),
            word: take(slots::WORD),
            cat: take(slots::CAT),
            synstruc: take(slots::SYN_STRUC),
            semstruc: take(slots::SEM_STRUC),
            meaning_procedures: take(slots::MEANING_PROCEDURES),
            synonyms: take(slots::SYNONYMS),
            hyponyms: take(slots::HYPONYMS),
            definition: take(slots::DEF),
            example: take(slots::EX),
        }
    }
}

/// What `install_sense` did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The frame was already in the lexicon space
    Skipped,
}

/// Statistics about a lexicon load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallStats {
    /// Number of sense frames created
    pub installed: usize,

    /// Number of records whose frame already existed
    pub skipped: usize,

    /// Records that could not be installed
    pub errors: Vec<String>,
}

impl InstallStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: InstallOutcome) {
        match outcome {
            InstallOutcome::Installed => self.installed += 1,
            InstallOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}

/// Install one record as a frame under `LEX-WORD` in space `LEX`
pub fn install_sense(graph: &mut FrameGraph, record: &SenseRecord) -> Result<InstallOutcome> {
    let frame_name = SenseId::parse(&record.sense)?.frame_name();

    if graph.in_space(&frame_name, LEX_SPACE) {
        log::debug!("Sense frame {frame_name} already loaded, skipping");
        return Ok(InstallOutcome::Skipped);
    }

    graph.add_frame(LEX_WORD);
    graph.add_frame(&frame_name);
    graph.add_parent(&frame_name, LEX_WORD)?;
    graph.add_to_space(&frame_name, LEX_SPACE)?;

    for (slot, value) in record.slot_fillers() {
        graph.set_slot(&frame_name, slot, value)?;
    }

    log::debug!("Installed sense {} as {frame_name}", record.sense);
    Ok(InstallOutcome::Installed)
}

/// Install every record, collecting failures instead of stopping at the first
pub fn install_records(graph: &mut FrameGraph, records: &[SenseRecord]) -> InstallStats {
    let mut stats = InstallStats::new();
    for record in records {
        match install_sense(graph, record) {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                log::warn!("Failed to install sense {}: {e}", record.sense);
                stats.add_error(format!("{}: {e}", record.sense));
            }
        }
    }
    stats
}

/// Load a JSON array of sense records into `graph`
pub fn load_lexicon_file(graph: &mut FrameGraph, path: &Path) -> Result<InstallStats> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<SenseRecord> = serde_json::from_str(&content)?;

    let stats = install_records(graph, &records);
    log::info!(
        "Loaded lexicon {}: {} installed, {} skipped, {} errors",
        path.display(),
        stats.installed,
        stats.skipped,
        stats.errors.len()
    );
    Ok(stats)
}

/// Parse Lisp text holding any number of lexical entries
pub fn parse_lexicon_text(input: &str) -> Result<Vec<Sense>> {
    lisp::parse_text(input)
}

/// Parse Lisp lexicon text and install every entry into `graph`
pub fn load_lisp_lexicon(graph: &mut FrameGraph, input: &str) -> Result<InstallStats> {
    let records: Vec<SenseRecord> = parse_lexicon_text(input)?
        .iter()
        .map(SenseRecord::from)
        .collect();
    Ok(install_records(graph, &records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> SenseRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_record_defaults() {
        let rec = record(json!({"SENSE": "DOG-N1", "CAT": "N", "SEM-STRUC": "DOG"}));
        assert_eq!(rec.word, Value::Null);
        assert_eq!(rec.meaning_procedures, Value::Null);

        let fillers = rec.slot_fillers();
        let names: Vec<&str> = fillers.iter().map(|(slot, _)| *slot).collect();
        assert_eq!(names, vec!["SENSE", "CAT", "SEM-STRUC", "MEANING-PROCEDURES"]);
        assert_eq!(fillers[3].1, json!([]));
    }

    #[test]
    fn test_nil_meaning_procedures_normalized() {
        let mut graph = FrameGraph::new();
        let rec = record(json!({
            "SENSE": "DOG-N1", "CAT": "N", "SEM-STRUC": "DOG", "MEANING-PROCEDURES": "NIL"
        }));
        install_sense(&mut graph, &rec).unwrap();
        assert_eq!(
            graph.get_slot("DOG.N.1", "MEANING-PROCEDURES"),
            Some(&json!([]))
        );
    }

    #[test]
    fn test_install_links_under_lex_word() {
        let mut graph = FrameGraph::new();
        let rec = record(json!({"SENSE": "DOG-N1", "CAT": "N", "SEM-STRUC": "DOG"}));

        assert_eq!(install_sense(&mut graph, &rec).unwrap(), InstallOutcome::Installed);
        assert!(graph.is_a("DOG.N.1", LEX_WORD));
        assert!(graph.in_space("DOG.N.1", LEX_SPACE));
        assert!(!graph.in_space(LEX_WORD, LEX_SPACE));
    }

    #[test]
    fn test_install_rejects_undecomposable_id() {
        let mut graph = FrameGraph::new();
        let rec = record(json!({"SENSE": "PERSON-NAME", "CAT": "N"}));
        assert!(install_sense(&mut graph, &rec).is_err());
        assert_eq!(graph.frame_count(), 0);
    }

    #[test]
    fn test_install_records_collects_errors() {
        let mut graph = FrameGraph::new();
        let records = vec![
            record(json!({"SENSE": "DOG-N1", "CAT": "N", "SEM-STRUC": "DOG"})),
            record(json!({"SENSE": "ERROR"})),
            record(json!({"SENSE": "DOG-N1", "CAT": "V", "SEM-STRUC": "DOG"})),
        ];

        let stats = install_records(&mut graph, &records);
        assert_eq!(stats.installed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors.len(), 1);
        assert!(stats.errors[0].starts_with("ERROR:"));
        // first record wins
        assert_eq!(graph.get_slot("DOG.N.1", "CAT"), Some(&json!("N")));
    }

    #[test]
    fn test_record_from_sense() {
        let sense = Sense::parse_lisp(&json!([
            "DOG-N1", ["CAT", "N"], ["SEM-STRUC", ["DOG"]], ["DEF", "a canine"]
        ]))
        .unwrap();
        let rec = SenseRecord::from(&sense);

        assert_eq!(rec.sense, "DOG-N1");
        assert_eq!(rec.word, json!("DOG"));
        assert_eq!(rec.semstruc, json!({"DOG": {}}));
        assert_eq!(rec.definition, json!("a canine"));
        assert_eq!(rec.example, Value::Null);
    }
}

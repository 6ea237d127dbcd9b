use ontolex_frames::{FrameGraph, FrameRecord, FrameStore, Snapshot};
use pretty_assertions::assert_eq;
use serde_json::json;

fn lexicon_graph() -> FrameGraph {
    let mut graph = FrameGraph::new();
    graph.add_frame("LEX-WORD");
    graph.add_frame("KICK.V.1");
    graph.add_parent("KICK.V.1", "LEX-WORD").unwrap();
    graph.add_to_space("KICK.V.1", "LEX").unwrap();
    graph.set_slot("LEX-WORD", "DEF", json!("a lexical entry")).unwrap();
    graph.set_slot("KICK.V.1", "SENSE", json!("KICK-V1")).unwrap();
    graph
        .set_slot("KICK.V.1", "SEM-STRUC", json!({"KICK": {"AGENT": {"VALUE": "^$VAR1"}}}))
        .unwrap();
    graph
}

#[test]
fn save_and_load_preserves_frames_parents_and_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("build").join("knowledge.json");

    let graph = lexicon_graph();
    graph.save(&path).unwrap();

    let loaded = FrameGraph::load(&path).unwrap();
    assert_eq!(loaded.frame_count(), 2);
    assert_eq!(loaded.parents("KICK.V.1"), vec!["LEX-WORD"]);
    assert_eq!(loaded.space_members("LEX"), vec!["KICK.V.1"]);
    assert_eq!(loaded.get_slot("KICK.V.1", "DEF"), Some(&json!("a lexical entry")));
    assert_eq!(loaded.to_snapshot(), graph.to_snapshot());

    let frame = loaded.frame_by_name("KICK.V.1").unwrap();
    assert_eq!(frame.get_slot("SENSE"), Some(&json!("KICK-V1")));
}

#[test]
fn snapshot_allows_parents_declared_after_children() {
    let snapshot = Snapshot {
        frames: vec![
            FrameRecord {
                name: "DOG".into(),
                slots: Default::default(),
                parents: vec!["ANIMAL".into()],
                spaces: vec!["ONT".into()],
            },
            FrameRecord {
                name: "ANIMAL".into(),
                slots: Default::default(),
                parents: vec![],
                spaces: vec!["ONT".into()],
            },
        ],
    };

    let graph = FrameGraph::from_snapshot(snapshot).unwrap();
    assert!(graph.is_a("DOG", "ANIMAL"));
    assert_eq!(graph.space_members("ONT"), vec!["DOG", "ANIMAL"]);
}

#[test]
fn load_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FrameGraph::load(&dir.path().join("missing.json")).is_err());
}

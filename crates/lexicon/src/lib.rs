//! # Ontolex Lexicon
//!
//! Lexical senses for a frame-based ontology: parsing of Lisp-style lexicon
//! entries, semantic structure classification, and sense lookup over a frame
//! store with a per-lexicon cache.
//!
//! ## Architecture
//!
//! ```text
//! Lisp text ──> reader ──> nested lists
//!                              │
//!                              └──> lisp::parse_entry ──> Sense
//!                                    ├─> SynStruc (ordered mapping)
//!                                    ├─> SemStruc ──> Head / Sub / RefSem / Variable
//!                                    └─> MeaningProcedure[]
//!
//! Knowledge file ──> FrameGraph (ontolex-frames)
//!                       │
//!                       └──> Lexicon::sense(id)
//!                              ├─> SenseId ──> frame name (word.category.index)
//!                              ├─> Sense::from_frame, cached per lexicon
//!                              └─> null sense for ids with no entry
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ontolex_frames::FrameGraph;
//! use ontolex_lexicon::{load_lisp_lexicon, Lexicon};
//!
//! let mut graph = FrameGraph::new();
//! load_lisp_lexicon(
//!     &mut graph,
//!     "(KICK-V1 (CAT V) (SEM-STRUC (KICK (AGENT (VALUE ^$VAR1)))))",
//! )
//! .unwrap();
//!
//! let lexicon = Lexicon::new(&graph);
//! let sense = lexicon.sense("KICK-V1");
//! assert_eq!(sense.semstruc.head().unwrap().concept, "KICK");
//!
//! assert_eq!(lexicon.sense("PERSON-NAME"), Lexicon::<FrameGraph>::null_sense());
//! ```

mod builder;
mod config;
mod error;
mod lexicon;
mod lisp;
mod matching;
mod meaning_procedure;
mod reader;
mod semstruc;
mod sense;
mod sense_id;
mod synstruc;

pub use builder::{
    install_records, install_sense, load_lexicon_file, load_lisp_lexicon, parse_lexicon_text,
    InstallOutcome, InstallStats, SenseRecord, LEX_SPACE, LEX_WORD,
};
pub use config::{LexiconConfig, DEFAULT_KNOWLEDGE_FILE, KNOWLEDGE_FILE_ENV};
pub use error::{LexiconError, Result};
pub use lexicon::{Lexicon, NULL_SENSE_ID};
pub use lisp::{parse_entry, parse_text, Section};
pub use matching::MatchAgainstList;
pub use meaning_procedure::{MeaningProcedure, UNKNOWN_PROCEDURE};
pub use reader::{read, read_all};
pub use semstruc::{Head, RefSem, SemElement, SemStruc, Sub, Variable};
pub use sense::{slots, Sense};
pub use sense_id::SenseId;
pub use synstruc::SynStruc;

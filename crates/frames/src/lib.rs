//! # Ontolex Frames
//!
//! A small frame-based knowledge graph: named frames holding slot fillers,
//! linked to parent frames, and grouped into named spaces.
//!
//! ## Architecture
//!
//! ```text
//! FrameGraph (petgraph)
//!     │
//!     ├──> Nodes: Frame { name, slots }
//!     ├──> Edges: child -> parent
//!     ├──> Name index (frame name -> node)
//!     ├──> Space index (space name -> member nodes)
//!     │
//!     ├──> Slot lookup with parent inheritance
//!     └──> JSON snapshot (knowledge file) save / load
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ontolex_frames::{FrameGraph, FrameStore};
//! use serde_json::json;
//!
//! let mut graph = FrameGraph::new();
//! graph.add_frame("LEX-WORD");
//! graph.add_frame("KICK.V.1");
//! graph.add_parent("KICK.V.1", "LEX-WORD").unwrap();
//! graph.set_slot("KICK.V.1", "CAT", json!("V")).unwrap();
//!
//! let frame = graph.frame_by_name("KICK.V.1").unwrap();
//! assert_eq!(frame.get_slot("CAT"), Some(&json!("V")));
//! ```

mod error;
mod graph;
mod snapshot;
mod store;
mod types;

pub use error::{FrameError, Result};
pub use snapshot::{FrameRecord, Snapshot};
pub use store::FrameStore;
pub use types::{Frame, FrameGraph, ParentLink};

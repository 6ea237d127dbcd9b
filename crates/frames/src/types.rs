use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A named frame with ordered slot fillers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame name (e.g., "LEX-WORD", "KICK.V.1")
    pub name: String,

    /// Slot name -> filler, in insertion order
    #[serde(default)]
    pub slots: Map<String, Value>,
}

impl Frame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Map::new(),
        }
    }

    /// Local slot filler (no inheritance)
    pub fn get_slot(&self, slot: &str) -> Option<&Value> {
        self.slots.get(slot)
    }

    /// Set a slot filler, replacing any previous one
    pub fn set_slot(&mut self, slot: impl Into<String>, value: Value) {
        self.slots.insert(slot.into(), value);
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }
}

/// Edge from a child frame to one of its parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink;

/// Frame graph: frames as nodes, parent links as edges, plus membership spaces
#[derive(Debug)]
pub struct FrameGraph {
    /// Directed graph (child -> parent)
    pub graph: DiGraph<Frame, ParentLink>,

    /// Frame name -> NodeIndex mapping for fast lookup
    pub name_index: HashMap<String, NodeIndex>,

    /// Space name -> member frames, in insertion order
    pub space_index: HashMap<String, Vec<NodeIndex>>,
}

impl FrameGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
            space_index: HashMap::new(),
        }
    }

    /// Return the frame with this name, creating an empty one if missing
    pub fn add_frame(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.name_index.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(Frame::new(name));
        self.name_index.insert(name.to_string(), idx);
        log::debug!("Created frame {name}");
        idx
    }

    /// Find node by frame name
    pub fn find_node(&self, name: &str) -> Option<NodeIndex> {
        self.name_index.get(name).copied()
    }

    /// Get frame by name
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.find_node(name)
            .and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn frame_mut(&mut self, name: &str) -> Option<&mut Frame> {
        let idx = self.find_node(name)?;
        self.graph.node_weight_mut(idx)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Get all frames
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx))
    }

    /// Get frame count
    pub fn frame_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get parent link count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new()
    }
}

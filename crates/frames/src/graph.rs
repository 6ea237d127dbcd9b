use crate::error::{FrameError, Result};
use crate::types::{FrameGraph, ParentLink};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

impl FrameGraph {
    fn require(&self, name: &str) -> Result<NodeIndex> {
        self.find_node(name)
            .ok_or_else(|| FrameError::FrameNotFound(name.to_string()))
    }

    /// Set a local slot filler on an existing frame
    pub fn set_slot(&mut self, frame: &str, slot: &str, value: Value) -> Result<()> {
        let node = self
            .frame_mut(frame)
            .ok_or_else(|| FrameError::FrameNotFound(frame.to_string()))?;
        node.set_slot(slot, value);
        Ok(())
    }

    /// Link `child` under `parent`; linking twice is a no-op
    pub fn add_parent(&mut self, child: &str, parent: &str) -> Result<()> {
        let from = self.require(child)?;
        let to = self.require(parent)?;

        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ParentLink);
        }
        Ok(())
    }

    /// Direct parents, in link order
    pub fn parents(&self, name: &str) -> Vec<&str> {
        let Some(node) = self.find_node(name) else {
            return Vec::new();
        };

        // petgraph yields outgoing edges newest first
        let mut parents: Vec<&str> = self
            .graph
            .edges(node)
            .filter_map(|e| self.graph.node_weight(e.target()))
            .map(|f| f.name.as_str())
            .collect();
        parents.reverse();
        parents
    }

    /// All ancestors, breadth-first, nearest first
    pub fn ancestors(&self, name: &str) -> Vec<&str> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&str> = self.parents(name).into_iter().collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) || current == name {
                continue;
            }
            result.push(current);
            queue.extend(self.parents(current));
        }

        result
    }

    /// True if `ancestor` is `name` itself or reachable through parent links
    pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
        name == ancestor || self.ancestors(name).contains(&ancestor)
    }

    /// Slot lookup with parent inheritance: local filler first, then the
    /// nearest ancestor that defines the slot
    pub fn get_slot(&self, name: &str, slot: &str) -> Option<&Value> {
        let frame = self.frame(name)?;
        if let Some(value) = frame.get_slot(slot) {
            return Some(value);
        }

        self.ancestors(name)
            .into_iter()
            .filter_map(|a| self.frame(a))
            .find_map(|f| f.get_slot(slot))
    }

    /// Add an existing frame to a named space
    pub fn add_to_space(&mut self, name: &str, space: &str) -> Result<()> {
        let node = self.require(name)?;
        let members = self.space_index.entry(space.to_string()).or_default();
        if !members.contains(&node) {
            members.push(node);
        }
        Ok(())
    }

    pub fn in_space(&self, name: &str, space: &str) -> bool {
        match (self.find_node(name), self.space_index.get(space)) {
            (Some(node), Some(members)) => members.contains(&node),
            _ => false,
        }
    }

    /// Member frame names of a space, in insertion order
    pub fn space_members(&self, space: &str) -> Vec<&str> {
        self.space_index
            .get(space)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|&idx| self.graph.node_weight(idx))
                    .map(|f| f.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Spaces a frame belongs to, sorted by name
    pub fn spaces_of(&self, name: &str) -> Vec<&str> {
        let Some(node) = self.find_node(name) else {
            return Vec::new();
        };

        let mut spaces: Vec<&str> = self
            .space_index
            .iter()
            .filter(|(_, members)| members.contains(&node))
            .map(|(space, _)| space.as_str())
            .collect();
        spaces.sort_unstable();
        spaces
    }
}

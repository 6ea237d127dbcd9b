use crate::error::Result;
use crate::types::FrameGraph;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Serialized form of a whole frame graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frames: Vec<FrameRecord>,
}

/// One frame with its slots, parent names and spaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub name: String,

    #[serde(default)]
    pub slots: Map<String, Value>,

    #[serde(default)]
    pub parents: Vec<String>,

    #[serde(default)]
    pub spaces: Vec<String>,
}

impl FrameGraph {
    pub fn to_snapshot(&self) -> Snapshot {
        let frames = self
            .frames()
            .map(|frame| FrameRecord {
                name: frame.name.clone(),
                slots: frame.slots.clone(),
                parents: self.parents(&frame.name).into_iter().map(String::from).collect(),
                spaces: self.spaces_of(&frame.name).into_iter().map(String::from).collect(),
            })
            .collect();

        Snapshot { frames }
    }

    /// Rebuild a graph; parents may be declared before or after their children
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut graph = Self::new();

        for record in &snapshot.frames {
            graph.add_frame(&record.name);
            graph.add_frame_slots(&record.name, &record.slots);
        }

        for record in &snapshot.frames {
            for parent in &record.parents {
                graph.add_frame(parent);
                graph.add_parent(&record.name, parent)?;
            }
            for space in &record.spaces {
                graph.add_to_space(&record.name, space)?;
            }
        }

        Ok(graph)
    }

    fn add_frame_slots(&mut self, name: &str, slots: &Map<String, Value>) {
        if let Some(frame) = self.frame_mut(name) {
            for (slot, value) in slots {
                frame.set_slot(slot.clone(), value.clone());
            }
        }
    }

    /// Write the graph to a JSON knowledge file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&self.to_snapshot())?;
        fs::write(path, bytes)?;
        log::info!(
            "Saved {} frames to {}",
            self.frame_count(),
            path.display()
        );
        Ok(())
    }

    /// Read a graph from a JSON knowledge file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        let graph = Self::from_snapshot(snapshot)?;
        log::info!(
            "Loaded {} frames from {}",
            graph.frame_count(),
            path.display()
        );
        Ok(graph)
    }
}

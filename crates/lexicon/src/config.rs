use anyhow::{Context, Result};
use ontolex_frames::FrameGraph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the knowledge file
pub const KNOWLEDGE_FILE_ENV: &str = "ONTOLEX_KNOWLEDGE_FILE";

/// Knowledge file used when neither a path nor the environment names one
pub const DEFAULT_KNOWLEDGE_FILE: &str = "knowledge/build/knowledge.json";

/// Where the frame knowledge backing a lexicon lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// JSON snapshot of the frame graph
    pub knowledge_file: PathBuf,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            knowledge_file: PathBuf::from(DEFAULT_KNOWLEDGE_FILE),
        }
    }
}

impl LexiconConfig {
    /// Resolve the knowledge file: explicit path, then environment, then default
    pub fn new(knowledge_file: Option<PathBuf>) -> Self {
        Self::resolve(knowledge_file, std::env::var(KNOWLEDGE_FILE_ENV).ok())
    }

    fn resolve(explicit: Option<PathBuf>, from_env: Option<String>) -> Self {
        let knowledge_file = explicit
            .or_else(|| from_env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KNOWLEDGE_FILE));
        Self { knowledge_file }
    }

    pub fn knowledge_file(&self) -> &Path {
        &self.knowledge_file
    }

    /// Load the frame graph from the knowledge file
    pub fn load_knowledge(&self) -> Result<FrameGraph> {
        let graph = FrameGraph::load(&self.knowledge_file).with_context(|| {
            format!(
                "Failed to load knowledge file {}",
                self.knowledge_file.display()
            )
        })?;
        log::info!(
            "Loaded {} frames from {}",
            graph.frame_count(),
            self.knowledge_file.display()
        );
        Ok(graph)
    }

    /// Write the frame graph to the knowledge file
    pub fn save_knowledge(&self, graph: &FrameGraph) -> Result<()> {
        graph.save(&self.knowledge_file).with_context(|| {
            format!(
                "Failed to save knowledge file {}",
                self.knowledge_file.display()
            )
        })
    }
}

use thiserror::Error;

/// Result type for lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

/// Errors raised while reading, parsing or materializing lexical senses
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A required section (CAT, SEM-STRUC) is absent from an entry
    #[error("Missing section {section} in entry {entry}")]
    MissingSection { entry: String, section: String },

    /// The entry does not have the nested-list shape expected at this point
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// A REFSEM or ^$VAR key carries no numeric suffix
    #[error("Missing numeric index in semantic key {0}")]
    MissingIndex(String),

    /// A semantic structure value that cannot be normalized to a mapping
    #[error("Malformed semantic structure: {0}")]
    MalformedSemStruc(String),

    /// A required frame slot is absent
    #[error("Frame {frame} has no {slot} slot")]
    MissingSlot { frame: String, slot: String },

    /// A frame slot holds a value of the wrong shape
    #[error("Frame {frame} slot {slot} is malformed: {reason}")]
    MalformedSlot {
        frame: String,
        slot: String,
        reason: String,
    },

    /// A sense id that does not decompose into word, category and index
    #[error("Invalid sense id: {0}")]
    InvalidSenseId(String),

    /// A head replacement that would not classify as a plain concept
    #[error("Invalid head replacement: {0}")]
    InvalidReplacement(String),

    /// Lisp text reader error
    #[error("Read error at byte {offset}: {message}")]
    Read { offset: usize, message: String },

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame store error
    #[error("Frame store error: {0}")]
    Frame(#[from] ontolex_frames::FrameError),
}

impl LexiconError {
    /// Create a malformed expression error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedExpression(msg.into())
    }

    /// Create a missing section error
    pub fn missing_section(entry: impl Into<String>, section: impl Into<String>) -> Self {
        Self::MissingSection {
            entry: entry.into(),
            section: section.into(),
        }
    }

    /// Create a reader error
    pub fn read(offset: usize, message: impl Into<String>) -> Self {
        Self::Read {
            offset,
            message: message.into(),
        }
    }
}

use crate::error::{LexiconError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TRAILING_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)([0-9]+)$").expect("sense index pattern"));

/// A sense id split into word, category and index
///
/// The index is the maximal trailing run of digits, kept as written so that
/// `KICK-V01` and `KICK-V1` name different frames. What precedes it is
/// split at the first `-`: the word on the left, the category on the right
/// (one extra leading `-` is dropped, so `KICK--IMPERATIVE-V1` reads as
/// word `KICK`, category `IMPERATIVE-V`, index `1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SenseId {
    pub word: String,
    pub category: String,
    pub index: String,
}

impl SenseId {
    pub fn parse(id: &str) -> Result<Self> {
        let invalid = || LexiconError::InvalidSenseId(id.to_string());

        let caps = TRAILING_INDEX.captures(id).ok_or_else(invalid)?;
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let index = caps[2].to_string();

        let (word, rest) = prefix.split_once('-').ok_or_else(invalid)?;
        let category = rest.strip_prefix('-').unwrap_or(rest);
        if word.is_empty() || category.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            word: word.to_string(),
            category: category.to_string(),
            index,
        })
    }

    /// Name of the frame holding this sense (`word.category.index`)
    pub fn frame_name(&self) -> String {
        format!("{}.{}.{}", self.word, self.category, self.index)
    }
}

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.word, self.category, self.index)
    }
}

/// Surface word of an id: the text before the first `-`
pub(crate) fn word_of(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

use crate::sense::Sense;
use std::fmt;

/// A head sense together with duplicates built from its related words
///
/// Every synonym and hyponym of the head yields one duplicate with that word
/// as the semantic head. Words that cannot serve as a head are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAgainstList {
    pub head: Sense,
    pub synonyms: Vec<Sense>,
    pub hyponyms: Vec<Sense>,
}

impl MatchAgainstList {
    pub fn new(head: Sense) -> Self {
        let synonyms = duplicates(&head, &head.synonyms);
        let hyponyms = duplicates(&head, &head.hyponyms);
        Self {
            head,
            synonyms,
            hyponyms,
        }
    }

    /// Head first, then synonym duplicates, then hyponym duplicates
    pub fn iter(&self) -> impl Iterator<Item = &Sense> {
        std::iter::once(&self.head)
            .chain(self.synonyms.iter())
            .chain(self.hyponyms.iter())
    }

    pub fn len(&self) -> usize {
        1 + self.synonyms.len() + self.hyponyms.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

fn duplicates(head: &Sense, words: &[String]) -> Vec<Sense> {
    words
        .iter()
        .filter_map(|word| match head.duplicate(word) {
            Ok(sense) => Some(sense),
            Err(e) => {
                log::warn!("Skipping {word} as a duplicate of {}: {e}", head.id);
                None
            }
        })
        .collect()
}

fn ids(senses: &[Sense]) -> String {
    senses
        .iter()
        .map(|s| s.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for MatchAgainstList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Head: {}", self.head.id)?;
        writeln!(f, "Synonyms: [{}]", ids(&self.synonyms))?;
        write!(f, "Hyponyms: [{}]", ids(&self.hyponyms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fix() -> Sense {
        Sense::parse_lisp(&json!([
            "FIX-V2",
            ["CAT", "V"],
            ["SEM-STRUC", ["FASTEN", ["AGENT", ["VALUE", "^$VAR1"]]]],
            ["SYNONYMS", "ATTACH", "SECURE"],
            ["HYPONYMS", "GLUE", "REFSEM1"]
        ]))
        .unwrap()
    }

    #[test]
    fn test_duplicates_in_order() {
        let list = MatchAgainstList::new(fix());
        let ids: Vec<&str> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["FIX-V2", "ATTACH-V2", "SECURE-V2", "GLUE-V2"]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_reserved_words_are_skipped() {
        let list = MatchAgainstList::new(fix());
        assert_eq!(list.hyponyms.len(), 1);
        assert_eq!(list.hyponyms[0].semstruc.head().unwrap().concept, "GLUE");
    }

    #[test]
    fn test_synonym_naming_a_sub_concept_is_skipped() {
        let head = Sense::parse_lisp(&json!([
            "FIX-V2",
            ["CAT", "V"],
            ["SEM-STRUC",
                ["FASTEN", ["AGENT", ["VALUE", "^$VAR1"]]],
                ["SECURE", ["THEME", ["VALUE", "^$VAR2"]]]
            ],
            ["SYNONYMS", "ATTACH", "SECURE"]
        ]))
        .unwrap();

        let list = MatchAgainstList::new(head);
        let ids: Vec<&str> = list.synonyms.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ATTACH-V2"]);
        assert_eq!(list.synonyms[0].semstruc.subs().len(), 1);
    }

    #[test]
    fn test_display() {
        let list = MatchAgainstList::new(fix());
        assert_eq!(
            list.to_string(),
            "Head: FIX-V2\nSynonyms: [ATTACH-V2, SECURE-V2]\nHyponyms: [GLUE-V2]"
        );
    }
}

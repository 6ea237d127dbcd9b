use crate::matching::MatchAgainstList;
use crate::meaning_procedure::MeaningProcedure;
use crate::semstruc::SemStruc;
use crate::sense::Sense;
use crate::sense_id::SenseId;
use crate::synstruc::SynStruc;
use once_cell::sync::Lazy;
use ontolex_frames::FrameStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// Id of the sense returned for unresolvable ids
pub const NULL_SENSE_ID: &str = "NULL-SENSE";

static NULL_SENSE: Lazy<Sense> = Lazy::new(|| Sense {
    id: NULL_SENSE_ID.to_string(),
    word: String::new(),
    pos: "NIL".to_string(),
    synstruc: SynStruc::empty(),
    semstruc: SemStruc::empty(),
    meaning_procedures: Vec::<MeaningProcedure>::new(),
    synonyms: Vec::new(),
    hyponyms: Vec::new(),
    definition: None,
    example: None,
});

/// Sense lookup by id over a frame store, with a per-instance cache
///
/// Every instance starts with an empty cache. Ids with no backing frame
/// (placeholders such as `ERROR` or `PERSON-NAME`) resolve to
/// [`Lexicon::null_sense`] and are never cached.
pub struct Lexicon<'s, S: FrameStore + ?Sized> {
    store: &'s S,
    cache: Mutex<HashMap<String, Sense>>,
}

impl<'s, S: FrameStore + ?Sized> Lexicon<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The sentinel sense for ids that name no entry
    pub fn null_sense() -> Sense {
        NULL_SENSE.clone()
    }

    /// Resolve a sense id; never fails
    pub fn sense(&self, id: &str) -> Sense {
        let mut cache = self.cache.lock().expect("sense cache mutex poisoned");
        if let Some(sense) = cache.get(id) {
            return sense.clone();
        }

        match self.materialize(id) {
            Some(sense) => {
                cache.insert(id.to_string(), sense.clone());
                sense
            }
            None => Self::null_sense(),
        }
    }

    fn materialize(&self, id: &str) -> Option<Sense> {
        let frame_name = match SenseId::parse(id) {
            Ok(sid) => sid.frame_name(),
            Err(_) => {
                log::debug!("Sense id {id} does not name a lexicon frame");
                return None;
            }
        };

        let Some(frame) = self.store.frame_by_name(&frame_name) else {
            log::debug!("No frame {frame_name} for sense {id}");
            return None;
        };

        match Sense::from_frame(frame) {
            Ok(sense) => {
                log::debug!("Materialized sense {id} from frame {frame_name}");
                Some(sense)
            }
            Err(e) => {
                log::warn!("Frame {frame_name} for sense {id} is unusable: {e}");
                None
            }
        }
    }

    /// Head sense of `id` with its synonym and hyponym duplicates
    pub fn match_against(&self, id: &str) -> MatchAgainstList {
        MatchAgainstList::new(self.sense(id))
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.cache
            .lock()
            .expect("sense cache mutex poisoned")
            .contains_key(id)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().expect("sense cache mutex poisoned").len()
    }

    pub fn clear(&self) {
        self.cache.lock().expect("sense cache mutex poisoned").clear();
    }
}

//! Ordered, time-stamped phrase sequence plus the playback cursor.
//!
//! A [`PhraseList`] answers two different questions that are easy to
//! conflate:
//!
//! - "which phrase belongs at video time T" — [`PhraseList::preferred_index`],
//!   used only to resolve seeks, and
//! - "has the video reached the boundary of the phrase after `index`" —
//!   [`PhraseList::is_time_to_play_next`], the video-side advance trigger.
//!
//! The cursor (`current_index`) is *not* advanced by the list itself. The
//! synchronization coordinator decides when a phrase becomes active and the
//! host commits that decision back via [`PhraseList::ready_to_start`]. The
//! list never fails: out-of-range access degrades to `0`, `None`, or a no-op.

/// One timed unit of transcript text, roughly a sentence.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    /// Stable position in the flattened transcript.
    pub index: usize,
    /// Video timestamp at which this phrase becomes current.
    pub start_secs: f64,
    pub text: String,
    /// First sentence of its paragraph. Rendering hint only; the
    /// synchronization logic never reads it.
    pub paragraph_first: bool,
}

/// Immutable-after-construction phrase sequence with a mutable cursor.
///
/// Constructed once per loaded transcript and replaced wholesale when a new
/// video is loaded. The empty list is the valid, inert value used before any
/// transcript is loaded and after playback is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseList {
    phrases: Vec<Phrase>,
    current_index: usize,
}

impl PhraseList {
    /// Phrases must be in non-decreasing `start_secs` order with `index`
    /// equal to their position; [`PhraseList::from_transcript`] guarantees
    /// this for transcript-derived lists.
    pub fn new(phrases: Vec<Phrase>) -> Self {
        Self {
            phrases,
            current_index: 0,
        }
    }

    /// Index of the last phrase whose start does not exceed `at`, or 0 if
    /// none qualifies (including the empty list). Seek resolution only.
    ///
    /// The scan runs from the end backward, so equal start times resolve to
    /// the later phrase.
    pub fn preferred_index(&self, at: f64) -> usize {
        for index in (0..self.phrases.len()).rev() {
            if self.phrases[index].start_secs <= at {
                return index;
            }
        }
        0
    }

    /// Move the cursor to `index`. Out-of-range requests (past the last
    /// phrase) are ignored.
    pub fn ready_to_start(&mut self, index: usize) {
        if index < self.phrases.len() {
            self.current_index = index;
        }
    }

    /// True iff the phrase after `index` exists and `time` has reached its
    /// start. The video-side trigger for leaving the phrase at `index`.
    pub fn is_time_to_play_next(&self, index: usize, time: f64) -> bool {
        match self.phrases.get(index + 1) {
            Some(next) => time >= next.start_secs,
            None => false,
        }
    }

    /// True iff `index` is the last phrase or beyond. Immediately true for
    /// the empty list.
    pub fn is_end(&self, index: usize) -> bool {
        index + 1 >= self.phrases.len()
    }

    /// Text under the cursor, or `None` once the list is exhausted.
    pub fn current_text(&self) -> Option<&str> {
        self.phrases
            .get(self.current_index)
            .map(|p| p.text.as_str())
    }

    /// Start time of the phrase after the cursor, or `None` at the end.
    pub fn next_phrase_start_at(&self) -> Option<f64> {
        self.phrases.get(self.current_index + 1).map(|p| p.start_secs)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn get(&self, index: usize) -> Option<&Phrase> {
        self.phrases.get(index)
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

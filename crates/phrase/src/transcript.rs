//! Transcript entities as produced by the translation pipeline.
//!
//! A transcript is ordered paragraphs of time-stamped sentences. Sentence
//! timestamps are whole video seconds on the wire; flattening widens them to
//! `f64` for the playback math.

use crate::list::{Phrase, PhraseList};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to decode transcript: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Sentence {
    pub at: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Paragraph {
    pub at: i64,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Transcript {
    pub language: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Transcript {
    pub fn empty() -> Self {
        Self {
            language: "EN".to_string(),
            paragraphs: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PhraseList {
    /// Flatten a transcript into an ordered phrase list.
    ///
    /// Indices are assigned sequentially across paragraph boundaries; the
    /// first sentence of each paragraph is flagged for display purposes.
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let mut phrases = Vec::new();
        for paragraph in &transcript.paragraphs {
            for (position, sentence) in paragraph.sentences.iter().enumerate() {
                phrases.push(Phrase {
                    index: phrases.len(),
                    start_secs: sentence.at as f64,
                    text: sentence.text.clone(),
                    paragraph_first: position == 0,
                });
            }
        }
        Self::new(phrases)
    }
}

pub mod list;
pub mod transcript;

pub use list::{Phrase, PhraseList};
pub use transcript::{Paragraph, Sentence, Transcript, TranscriptError};

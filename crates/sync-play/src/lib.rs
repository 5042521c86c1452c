//! Synchronization core for dubbed-video playback.
//!
//! A video track advances on a periodic clock; a synthesized-speech track
//! advances only when the speech engine reports "finished speaking", with
//! unknown duration per phrase. This crate reconciles the two timelines: it
//! holds a [`SyncModel`] describing the *intent* (who is playing, who is
//! waiting for whom, which phrase is active) and transitions it in response
//! to user controls and the two clock events. It never touches a real player
//! or synthesizer — the host observes model changes and drives its concrete
//! [`VideoPlayback`]/[`SpeechPlayback`] implementations to match, typically
//! through a [`PlaybackDriver`].

pub mod coordinator;
pub mod driver;
pub mod model;

pub use coordinator::{SyncCoordinator, SyncOptions};
pub use driver::{PlaybackDriver, SpeechPlayback, VideoPlayback};
pub use model::{ControllerInfo, DriftState, SeekInfo, SyncModel};

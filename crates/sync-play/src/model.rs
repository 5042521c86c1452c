//! The published synchronization state.
//!
//! [`SyncModel`] is a plain value combining three independent facets: the
//! user-driven controller mode, the drift classification between the two
//! timelines, and the active phrase index. It carries no behavior beyond a
//! copy-with-changes helper; every transition lives in
//! [`crate::coordinator::SyncCoordinator`].

/// Seek-in-progress detail: the scrub target and whether playback should
/// resume once the seek commits.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SeekInfo {
    pub target_secs: f64,
    pub was_playing: bool,
}

/// User-driven controller mode.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControllerInfo {
    Playing,
    Pausing,
    /// A drag-in-progress seek. Only `finish_seek` commits it.
    Seeking(SeekInfo),
}

/// Which timeline, if either, is held so the other can catch up.
///
/// "Waiting" is purely a state value. The host, observing it, pauses the
/// corresponding real player; no thread ever blocks here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DriftState {
    /// No drift, normal advance.
    BothRunning,
    /// Video reached the next phrase boundary before speech finished the
    /// current phrase.
    VideoWaiting,
    /// Speech finished its phrase more than the drift tolerance ahead of
    /// the video.
    SpeechWaiting,
}

/// Complete synchronization intent at a point in time.
///
/// `phrase_index` is the index the model considers active; it may run ahead
/// of the phrase list's cursor, which the host reconciles by calling
/// `ready_to_start` after observing each new model. It may also run past the
/// end of the list — lookups there return `None` ("nothing currently
/// active"), never an error.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SyncModel {
    pub controller_info: ControllerInfo,
    pub drift_state: DriftState,
    pub phrase_index: usize,
}

impl SyncModel {
    /// Initial state: paused, no drift, first phrase.
    pub const ZERO: SyncModel = SyncModel {
        controller_info: ControllerInfo::Pausing,
        drift_state: DriftState::BothRunning,
        phrase_index: 0,
    };

    pub fn with_controller(self, controller_info: ControllerInfo) -> SyncModel {
        SyncModel {
            controller_info,
            ..self
        }
    }
}

impl Default for SyncModel {
    fn default() -> Self {
        Self::ZERO
    }
}

//! Stateful orchestrator reconciling the video clock with speech completion.
//!
//! The coordinator accepts five input events — `play`, `pause`,
//! `seeking`/`finish_seek`, `time_observed` (periodic video clock) and
//! `speech_phrase_finished` (speech engine callback) — and transitions the
//! held [`SyncModel`]. Every committed transition is published through a
//! watch channel so multiple observers (play/pause button, transcript
//! highlight) can react without re-deriving it.
//!
//! All entry points are total synchronous functions intended to run with
//! mutual exclusion, one at a time, in the order the host delivers them.
//! Nothing here performs I/O or blocks: "waiting" is a state value, and the
//! host is responsible for pausing the real player it names.

use dubplay_phrase::PhraseList;
use tokio::sync::watch;

use crate::model::{ControllerInfo, DriftState, SeekInfo, SyncModel};

/// Tunable synchronization thresholds.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    /// How far ahead of the video (seconds) speech may finish before it is
    /// held in [`DriftState::SpeechWaiting`] instead of advancing.
    ///
    /// Note the asymmetry: video gets no such grace period — it waits the
    /// moment it reaches the next phrase boundary with speech still
    /// unfinished. That favors audio continuity and is deliberate.
    pub speech_lead_secs: f64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            speech_lead_secs: 3.0,
        }
    }
}

/// Holds the current [`SyncModel`] and [`PhraseList`] and transitions them
/// in response to host events.
///
/// The coordinator only ever emits *intent*. Mapping a model to play/pause/
/// seek calls on concrete players is the host's job, typically via
/// [`crate::driver::PlaybackDriver`]; the host then closes the loop by
/// calling [`SyncCoordinator::ready_to_start`] once it has reacted, and
/// [`SyncCoordinator::speech_phrase_finished`] when synthesis ends.
pub struct SyncCoordinator {
    tx: watch::Sender<SyncModel>,
    phrases: PhraseList,
    options: SyncOptions,
    /// Whether the speech channel participates at all (a voice is selected
    /// and audible). When false, phrase boundaries advance unconditionally.
    speech_active: bool,
    current_time: f64,
    video_duration: f64,
}

impl SyncCoordinator {
    pub fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    pub fn with_options(options: SyncOptions) -> Self {
        let (tx, _) = watch::channel(SyncModel::ZERO);
        Self {
            tx,
            phrases: PhraseList::default(),
            options,
            speech_active: true,
            current_time: 0.0,
            video_duration: 0.0,
        }
    }

    /// The currently published model.
    pub fn model(&self) -> SyncModel {
        *self.tx.borrow()
    }

    /// Subscribe to committed transitions. The receiver always yields the
    /// latest model; it stays valid for the coordinator's lifetime.
    pub fn subscribe(&self) -> watch::Receiver<SyncModel> {
        self.tx.subscribe()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.model().controller_info, ControllerInfo::Playing)
    }

    /// Replace the phrase list when a new transcript is loaded.
    pub fn set_phrases(&mut self, phrases: PhraseList) {
        self.phrases = phrases;
    }

    pub fn phrases(&self) -> &PhraseList {
        &self.phrases
    }

    /// Commit the host's reaction to a phrase change by moving the list
    /// cursor. Out-of-range indices (model past the end) are ignored.
    pub fn ready_to_start(&mut self, index: usize) {
        self.phrases.ready_to_start(index);
    }

    pub fn current_text(&self) -> Option<&str> {
        self.phrases.current_text()
    }

    pub fn set_speech_active(&mut self, active: bool) {
        self.speech_active = active;
    }

    /// Last observed video clock value.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn video_duration(&self) -> f64 {
        self.video_duration
    }

    pub fn set_video_duration(&mut self, duration: f64) {
        self.video_duration = duration;
    }

    /// Video timestamp for a 0..=1 slider position.
    pub fn video_time(&self, progress: f64) -> f64 {
        self.video_duration * progress
    }

    /// Slider position for the current video timestamp.
    pub fn progress(&self) -> f64 {
        if self.video_duration > 0.0 {
            self.current_time / self.video_duration
        } else {
            0.0
        }
    }

    /// Reset to the initial state when the user leaves the player.
    pub fn clear(&mut self) {
        self.phrases = PhraseList::default();
        self.current_time = 0.0;
        self.video_duration = 0.0;
        self.commit(SyncModel::ZERO);
    }

    pub fn play(&mut self) {
        let next = self.model().with_controller(ControllerInfo::Playing);
        self.commit(next);
    }

    /// Always legal, from any state: freezes the model where it is. The
    /// host is expected to stop both real players.
    pub fn pause(&mut self) {
        let next = self.model().with_controller(ControllerInfo::Pausing);
        self.commit(next);
    }

    /// Begin or update a drag-in-progress seek.
    ///
    /// Drift and phrase index are left untouched while dragging, so the host
    /// can show a rough scrub position without disturbing playback
    /// semantics; only [`SyncCoordinator::finish_seek`] commits them.
    pub fn seeking(&mut self, target_secs: f64) {
        let model = self.model();
        let was_playing = match model.controller_info {
            ControllerInfo::Playing => true,
            ControllerInfo::Pausing => false,
            ControllerInfo::Seeking(info) => info.was_playing,
        };
        let next = model.with_controller(ControllerInfo::Seeking(SeekInfo {
            target_secs,
            was_playing,
        }));
        self.commit(next);
    }

    /// Commit a seek: resolve the phrase under `target_secs`, clear any
    /// drift (the old waiting relationship is meaningless at the new
    /// position) and restore the pre-seek play/pause mode.
    ///
    /// The only transition allowed to move the phrase index backward. Legal
    /// directly from `Playing`/`Pausing` — a transient seeking state is
    /// synthesized first.
    pub fn finish_seek(&mut self, target_secs: f64) {
        if !matches!(self.model().controller_info, ControllerInfo::Seeking(_)) {
            self.seeking(target_secs);
        }

        let ControllerInfo::Seeking(info) = self.model().controller_info else {
            return;
        };

        let index = self.phrases.preferred_index(target_secs);
        self.commit(SyncModel {
            controller_info: if info.was_playing {
                ControllerInfo::Playing
            } else {
                ControllerInfo::Pausing
            },
            drift_state: DriftState::BothRunning,
            phrase_index: index,
        });
    }

    /// Periodic video clock tick. Tick-rate-independent; the original host
    /// delivers roughly two per second.
    pub fn time_observed(&mut self, video_secs: f64) {
        self.current_time = video_secs;

        let model = self.model();
        if !self.phrases.is_time_to_play_next(model.phrase_index, video_secs) {
            return;
        }

        if !self.speech_active {
            // Speech is not a participant; nothing to wait for.
            self.commit(SyncModel {
                drift_state: DriftState::BothRunning,
                phrase_index: model.phrase_index + 1,
                ..model
            });
            return;
        }

        if !matches!(model.controller_info, ControllerInfo::Playing) {
            return;
        }

        match model.drift_state {
            DriftState::SpeechWaiting => {
                // The video arrived at the boundary speech was waiting for.
                self.commit(SyncModel {
                    drift_state: DriftState::BothRunning,
                    phrase_index: model.phrase_index + 1,
                    ..model
                });
            }
            DriftState::BothRunning
                if self.phrases.current_index() < model.phrase_index + 1 =>
            {
                // Speech has not finished the phrase the video is leaving.
                tracing::debug!(
                    phrase_index = model.phrase_index,
                    video_secs,
                    "boundary reached before speech finished, holding video"
                );
                self.commit(SyncModel {
                    drift_state: DriftState::VideoWaiting,
                    ..model
                });
            }
            _ => {}
        }
    }

    /// The speech engine finished speaking the current phrase; `video_at_secs`
    /// is the video clock at that instant.
    pub fn speech_phrase_finished(&mut self, video_at_secs: f64) {
        if self.phrases.is_empty() {
            return;
        }

        let model = self.model();
        match self.phrases.next_phrase_start_at() {
            Some(next_start) if next_start - video_at_secs > self.options.speech_lead_secs => {
                tracing::debug!(
                    next_start,
                    video_at_secs,
                    lead = next_start - video_at_secs,
                    "speech finished early, holding speech"
                );
                self.commit(SyncModel {
                    drift_state: DriftState::SpeechWaiting,
                    ..model
                });
            }
            _ => {
                self.commit(SyncModel {
                    drift_state: DriftState::BothRunning,
                    phrase_index: model.phrase_index + 1,
                    ..model
                });
            }
        }
    }

    fn commit(&mut self, next: SyncModel) {
        let prev = self.tx.send_replace(next);
        if prev != next {
            tracing::debug!(?prev, ?next, "sync transition");
        }
    }
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

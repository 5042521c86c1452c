//! Maps committed [`SyncModel`] transitions onto real players.
//!
//! The coordinator emits intent only. A host wires its concrete video
//! player and speech engine behind the two capability traits here and feeds
//! every observed model into [`PlaybackDriver::apply`], which issues the
//! command delta between the previous and the new model. The driver is the
//! single place that knows, for example, that `VideoWaiting` means "pause
//! the video, let speech run".
//!
//! Player settings (voice, volumes, rates) belong to the concrete trait
//! implementations as explicit configuration; none of them influence the
//! synchronization logic.

use crate::model::{ControllerInfo, DriftState, SyncModel};

/// Drives playback of the video track.
pub trait VideoPlayback {
    fn play(&mut self);
    fn pause(&mut self);
    /// Precise seek, issued when a seek commits.
    fn seek(&mut self, seconds: f64);
    /// Best-effort (tolerant) seek, issued repeatedly while the user drags.
    fn scrub(&mut self, seconds: f64);
}

/// Drives playback of the synthesized speech track.
///
/// Implementations are expected to call the coordinator's
/// `speech_phrase_finished` when an utterance ends, closing the loop.
pub trait SpeechPlayback {
    /// False when no voice is selected or the speech volume is zero. The
    /// host mirrors this into the coordinator's `set_speech_active`.
    fn is_active(&self) -> bool;
    /// Start or continue speaking the current phrase.
    fn restart(&mut self);
    fn pause(&mut self);
    /// Abandon the current utterance entirely (phrase changed).
    fn stop(&mut self);
}

/// Applies model transitions to a video/speech player pair.
pub struct PlaybackDriver<V, S> {
    video: V,
    speech: S,
    last: SyncModel,
}

impl<V: VideoPlayback, S: SpeechPlayback> PlaybackDriver<V, S> {
    pub fn new(video: V, speech: S) -> Self {
        Self {
            video,
            speech,
            last: SyncModel::ZERO,
        }
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn video_mut(&mut self) -> &mut V {
        &mut self.video
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut S {
        &mut self.speech
    }

    /// Issue the commands that take the players from the previously applied
    /// model to `next`.
    ///
    /// The caller must still reconcile the phrase-list cursor with the
    /// coordinator (`ready_to_start`) after a phrase change; the driver only
    /// talks to the players.
    pub fn apply(&mut self, next: SyncModel) {
        let prev = self.last;

        if next.phrase_index != prev.phrase_index {
            self.speech.stop();
        }

        match next.controller_info {
            ControllerInfo::Playing => {
                if let ControllerInfo::Seeking(info) = prev.controller_info {
                    self.video.seek(info.target_secs);
                }

                if next.drift_state == DriftState::VideoWaiting {
                    self.video.pause();
                } else {
                    self.video.play();
                }

                if next.drift_state == DriftState::SpeechWaiting {
                    self.speech.pause();
                } else {
                    self.speech.restart();
                }
            }
            ControllerInfo::Pausing => {
                if let ControllerInfo::Seeking(info) = prev.controller_info {
                    self.video.seek(info.target_secs);
                }

                self.video.pause();
                self.speech.pause();
            }
            ControllerInfo::Seeking(info) => {
                // stop both while dragging so playback does not fight the
                // slider; playback resumes on finish_seek
                if matches!(prev.controller_info, ControllerInfo::Playing) {
                    self.video.pause();
                    self.speech.pause();
                }

                self.video.scrub(info.target_secs);
            }
        }

        self.last = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeekInfo;

    #[derive(Default)]
    struct RecordingVideo {
        commands: Vec<String>,
    }

    impl VideoPlayback for RecordingVideo {
        fn play(&mut self) {
            self.commands.push("play".into());
        }
        fn pause(&mut self) {
            self.commands.push("pause".into());
        }
        fn seek(&mut self, seconds: f64) {
            self.commands.push(format!("seek {seconds}"));
        }
        fn scrub(&mut self, seconds: f64) {
            self.commands.push(format!("scrub {seconds}"));
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        commands: Vec<String>,
    }

    impl SpeechPlayback for RecordingSpeech {
        fn is_active(&self) -> bool {
            true
        }
        fn restart(&mut self) {
            self.commands.push("restart".into());
        }
        fn pause(&mut self) {
            self.commands.push("pause".into());
        }
        fn stop(&mut self) {
            self.commands.push("stop".into());
        }
    }

    fn driver() -> PlaybackDriver<RecordingVideo, RecordingSpeech> {
        PlaybackDriver::new(RecordingVideo::default(), RecordingSpeech::default())
    }

    fn model(
        controller_info: ControllerInfo,
        drift_state: DriftState,
        phrase_index: usize,
    ) -> SyncModel {
        SyncModel {
            controller_info,
            drift_state,
            phrase_index,
        }
    }

    use ControllerInfo::{Pausing, Playing, Seeking};
    use DriftState::{BothRunning, SpeechWaiting, VideoWaiting};

    #[test]
    fn playing_runs_both_players() {
        let mut d = driver();

        d.apply(model(Playing, BothRunning, 0));

        assert_eq!(d.video().commands, ["play"]);
        assert_eq!(d.speech().commands, ["restart"]);
    }

    #[test]
    fn video_waiting_pauses_video_and_lets_speech_run() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));

        d.apply(model(Playing, VideoWaiting, 0));

        assert_eq!(d.video().commands, ["play", "pause"]);
        assert_eq!(d.speech().commands, ["restart", "restart"]);
    }

    #[test]
    fn speech_waiting_pauses_speech_and_lets_video_run() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));

        d.apply(model(Playing, SpeechWaiting, 0));

        assert_eq!(d.video().commands, ["play", "play"]);
        assert_eq!(d.speech().commands, ["restart", "pause"]);
    }

    #[test]
    fn pausing_pauses_both() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));

        d.apply(model(Pausing, BothRunning, 0));

        assert_eq!(d.video().commands, ["play", "pause"]);
        assert_eq!(d.speech().commands, ["restart", "pause"]);
    }

    #[test]
    fn phrase_change_stops_the_current_utterance() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));

        d.apply(model(Playing, BothRunning, 1));

        assert_eq!(d.speech().commands, ["restart", "stop", "restart"]);
    }

    #[test]
    fn drag_from_playing_pauses_both_and_scrubs() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));

        let seek = SeekInfo {
            target_secs: 35.0,
            was_playing: true,
        };
        d.apply(model(Seeking(seek), BothRunning, 0));
        d.apply(model(
            Seeking(SeekInfo {
                target_secs: 36.5,
                ..seek
            }),
            BothRunning,
            0,
        ));

        assert_eq!(d.video().commands, ["play", "pause", "scrub 35", "scrub 36.5"]);
        assert_eq!(d.speech().commands, ["restart", "pause"]);
    }

    #[test]
    fn finishing_a_seek_seeks_precisely_then_resumes() {
        let mut d = driver();
        d.apply(model(Playing, BothRunning, 0));
        d.apply(model(
            Seeking(SeekInfo {
                target_secs: 35.0,
                was_playing: true,
            }),
            BothRunning,
            0,
        ));

        // finish_seek committed: back to Playing at the resolved phrase
        d.apply(model(Playing, BothRunning, 4));

        assert_eq!(
            d.video().commands,
            ["play", "pause", "scrub 35", "seek 35", "play"]
        );
        assert_eq!(d.speech().commands, ["restart", "pause", "stop", "restart"]);
    }

    #[test]
    fn finishing_a_seek_while_paused_stays_paused() {
        let mut d = driver();
        d.apply(model(
            Seeking(SeekInfo {
                target_secs: 102.0,
                was_playing: false,
            }),
            BothRunning,
            0,
        ));
        d.apply(model(Pausing, BothRunning, 12));

        assert_eq!(d.video().commands, ["scrub 102", "seek 102", "pause"]);
        assert_eq!(d.speech().commands, ["stop", "pause"]);
    }

    #[test]
    fn drag_from_pausing_does_not_touch_players_before_scrubbing() {
        let mut d = driver();

        d.apply(model(
            Seeking(SeekInfo {
                target_secs: 10.0,
                was_playing: false,
            }),
            BothRunning,
            0,
        ));

        assert_eq!(d.video().commands, ["scrub 10"]);
        assert!(d.speech().commands.is_empty());
    }
}

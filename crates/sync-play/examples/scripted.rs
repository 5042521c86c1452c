//! Replays a scripted playback session against the coordinator and prints
//! every committed transition.
//!
//! ```sh
//! cargo run -p sync-play --example scripted
//! ```

use dubplay_phrase::{PhraseList, Transcript};
use sync_play::SyncCoordinator;

const TRANSCRIPT_JSON: &str = r#"
{
  "language": "JA",
  "paragraphs": [
    {
      "at": 0,
      "sentences": [
        { "at": 0, "text": "ようこそ。" },
        { "at": 10, "text": "今日は同期再生の話をします。" },
        { "at": 20, "text": "それでは始めましょう。" }
      ]
    }
  ]
}
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let transcript = Transcript::from_json(TRANSCRIPT_JSON).expect("static transcript");
    let mut coordinator = SyncCoordinator::new();
    coordinator.set_phrases(PhraseList::from_transcript(&transcript));
    coordinator.set_video_duration(30.0);

    // (event, video clock). Speech for phrase 0 ends early at 4.5s, speech
    // for phrase 1 overruns until 28.5s: the session exercises both waits.
    enum Event {
        Play,
        Tick(f64),
        SpeechDone(f64),
    }
    use Event::*;

    let script = [
        Play,
        Tick(0.5),
        Tick(2.0),
        SpeechDone(4.5),
        Tick(4.0),
        Tick(10.0),
        Tick(25.0),
        Tick(28.0),
        SpeechDone(28.5),
        Tick(34.0),
        SpeechDone(35.0),
    ];

    for event in script {
        match event {
            Play => coordinator.play(),
            Tick(at) => coordinator.time_observed(at),
            SpeechDone(at) => coordinator.speech_phrase_finished(at),
        }
        // the host reacts to each model before the next event arrives
        coordinator.ready_to_start(coordinator.model().phrase_index);

        let model = coordinator.model();
        println!(
            "t={:>5.1} {:?} {:?} phrase={} text={:?}",
            coordinator.current_time(),
            model.controller_info,
            model.drift_state,
            model.phrase_index,
            coordinator.current_text().unwrap_or(""),
        );
    }
}

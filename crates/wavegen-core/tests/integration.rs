//! Integration tests for wavegen-core.
//!
//! Drives [`Session`] with command lines the way an operator would and checks
//! sample-level results plus the playback calls they trigger.

use wavegen_core::{
    CommandStatus, EngineConfig, Error, MID_SCALE, PlaybackEvent, Q_MAX, RecordingPlayback,
    Session, decode, encode,
};

fn started_session() -> (Session<RecordingPlayback>, String) {
    let mut session = Session::new(EngineConfig::default(), RecordingPlayback::new());
    let mut out = String::new();
    session.start(&mut out).expect("start");
    (session, out)
}

fn exec(session: &mut Session<RecordingPlayback>, line: &str) -> CommandStatus {
    let mut out = String::new();
    session.execute_line(line, &mut out).expect("status sink")
}

// ---------------------------------------------------------------------------
// Start-up
// ---------------------------------------------------------------------------

#[test]
fn start_up_sequence() {
    let (session, out) = started_session();
    assert!(out.contains("Commands are:"));
    assert!(out.contains("Waveform choices are:"));
    assert!(out.ends_with("Sample rate is 500 KHz, 250 Ksamples\n"), "got: {out}");
    assert_eq!(session.state().buffer().active_len(), 250_000);
    assert!(session.playback().is_streaming());
    assert_eq!(
        session.playback().events(),
        [
            PlaybackEvent::Stop,
            PlaybackEvent::Flush(250_000),
            PlaybackEvent::ConfigureClock(500_000),
            PlaybackEvent::Start(250_000),
        ]
    );
}

// ---------------------------------------------------------------------------
// End-to-end sample checks
// ---------------------------------------------------------------------------

#[test]
fn rate_buffer_add_sine_reads_back_mid_scale() {
    let (mut session, _) = started_session();
    assert_eq!(exec(&mut session, "rate 1000"), CommandStatus::Applied);
    assert_eq!(exec(&mut session, "buffer 1000"), CommandStatus::Applied);
    assert_eq!(exec(&mut session, "add sine 100 0.5 0"), CommandStatus::Applied);

    assert_eq!(session.state().buffer().get(0), Some(MID_SCALE));
    assert_eq!(MID_SCALE, Q_MAX / 2);
}

#[test]
fn sine_peaks_at_quarter_cycle() {
    let (mut session, _) = started_session();
    exec(&mut session, "rate 1000");
    exec(&mut session, "buffer 1000");
    exec(&mut session, "add sine 10 0.5");

    // N = 100 samples per cycle
    let buf = session.state().buffer();
    assert_eq!(buf.get(25), Some(encode(0.5)));
    assert_eq!(buf.get(125), Some(encode(0.5)));
    let trough = buf.value(75).unwrap();
    assert!((trough + 0.5).abs() < 1e-4, "got {trough}");
}

#[test]
fn square_boundary_is_exact_at_half_cycle() {
    let (mut session, _) = started_session();
    exec(&mut session, "rate 8k");
    exec(&mut session, "buffer 800");
    exec(&mut session, "add sq 100 0.4");

    // N = 80, half = 40
    let buf = session.state().buffer();
    let high = encode(0.4);
    let low = encode(-0.4);
    for cycle in 0..10 {
        let base = cycle * 80;
        assert_eq!(buf.get(base), Some(high));
        assert_eq!(buf.get(base + 39), Some(high));
        assert_eq!(buf.get(base + 40), Some(low));
        assert_eq!(buf.get(base + 79), Some(low));
    }
}

#[test]
fn triangle_and_sawtooth_mix_then_clip() {
    let (mut session, _) = started_session();
    exec(&mut session, "rate 1000");
    exec(&mut session, "buffer 100");
    exec(&mut session, "add tri 10 1.0");
    exec(&mut session, "add saw 10 1.0");

    let buf = session.state().buffer();
    // triangle peaks at +1 at the half-cycle; sawtooth adds 0.5 there
    assert_eq!(buf.get(50), Some(Q_MAX));
    // triangle is -1 at 0, sawtooth 0
    assert_eq!(buf.get(0), Some(0));
    // quarter cycle: triangle 0 + sawtooth 0.25
    let v = buf.value(25).unwrap();
    assert!((v - 0.25).abs() < 1e-4, "got {v}");
}

#[test]
fn phase_shifts_waveform() {
    let (mut session, _) = started_session();
    exec(&mut session, "rate 1000");
    exec(&mut session, "buffer 100");
    exec(&mut session, "add sine 10 0.5 25");

    // 25% of a 100-sample cycle: index 0 now reads the peak
    assert_eq!(session.state().buffer().get(0), Some(encode(0.5)));
}

// ---------------------------------------------------------------------------
// Buffer sizing and playback interaction
// ---------------------------------------------------------------------------

#[test]
fn buffer_limits_rejected_and_state_kept() {
    let (mut session, _) = started_session();
    exec(&mut session, "buffer 500");
    session.playback_mut().clear_events();

    for line in ["buffer 0", "buffer 250001"] {
        let status = exec(&mut session, line);
        assert!(
            matches!(status, CommandStatus::Rejected(Error::BufferSizeOutOfRange { .. })),
            "{line}: {status:?}"
        );
        assert_eq!(session.state().buffer().active_len(), 500);
    }
    assert!(session.playback().events().is_empty());

    assert_eq!(exec(&mut session, "buffer 250000"), CommandStatus::Applied);
    assert_eq!(session.state().buffer().active_len(), 250_000);
}

#[test]
fn add_mixes_into_live_stream_without_stopping() {
    let (mut session, _) = started_session();
    session.playback_mut().clear_events();
    exec(&mut session, "add 5k 0.2");
    assert_eq!(session.playback().events(), [PlaybackEvent::Flush(250_000)]);
    assert!(session.playback().is_streaming());
}

#[test]
fn rate_resets_buffer_to_full_capacity_and_silence() {
    let (mut session, _) = started_session();
    exec(&mut session, "buffer 1000");
    exec(&mut session, "add square 5k 0.5");
    exec(&mut session, "rate 250k");

    let state = session.state();
    assert_eq!(state.sample_rate(), 250_000);
    assert_eq!(state.buffer().active_len(), 250_000);
    assert!(state.buffer().active().iter().all(|&c| c == MID_SCALE));
}

// ---------------------------------------------------------------------------
// Dispatch quirks
// ---------------------------------------------------------------------------

#[test]
fn abbreviations_dispatch() {
    let (mut session, _) = started_session();
    assert_eq!(exec(&mut session, "h"), CommandStatus::Reported);
    assert_eq!(exec(&mut session, "cl"), CommandStatus::Applied);
    assert_eq!(exec(&mut session, "B"), CommandStatus::Reported);
    assert_eq!(exec(&mut session, "r"), CommandStatus::Reported);
}

#[test]
fn no_input_never_terminates_session() {
    let (mut session, _) = started_session();
    for line in ["", "???", "add", "add ???", "rate x", "buffer y", "a b c d e f g h"] {
        let mut out = String::new();
        assert!(session.execute_line(line, &mut out).is_ok(), "{line}");
    }
    let v = decode(session.state().buffer().get(0).unwrap());
    assert!((-1.0..=1.0).contains(&v));
}

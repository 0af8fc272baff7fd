//! Integration tests for the transport
//!
//! These tests walk through full user sessions the way a page would drive
//! the transport: timer ticks interleaved with keyboard and button input.

use tune_transport::{
    format_time, Dispatcher, Input, IntentOutcome, Key, NotificationPhase, PlayState,
    Transport, TransportButton, TransportConfig, TransportEvent,
};

const EPSILON: f64 = 1e-9;

#[test]
fn end_to_end_play_skip_seek_finish() {
    let mut transport = Transport::default();
    let start = transport.snapshot();
    assert_eq!(start.position, 0.0);
    assert_eq!(start.duration, 213.0);
    assert!(!start.is_playing);

    assert!(transport.toggle_play_pause());

    for _ in 0..10 {
        transport.tick(0.1);
    }
    assert!((transport.position() - 1.0).abs() < EPSILON);
    assert!(transport.is_playing());

    transport.skip(15.0);
    assert!((transport.position() - 16.0).abs() < EPSILON);

    transport.seek_to_fraction(1.0);
    assert_eq!(transport.position(), 213.0);

    transport.tick(0.1);
    assert_eq!(transport.position(), 0.0);
    assert!(!transport.is_playing());
}

#[test]
fn events_follow_operations_in_order() {
    let mut transport = Transport::with_duration(1.0).unwrap();
    transport.toggle_play_pause();
    transport.tick(0.5);
    transport.skip(-2.0);
    transport.tick(2.0);

    let events = transport.drain_events();
    assert_eq!(
        events,
        vec![
            TransportEvent::StateChanged {
                state: PlayState::Playing
            },
            TransportEvent::PositionUpdate {
                position_secs: 0.5,
                duration_secs: 1.0
            },
            TransportEvent::Seeked {
                from_secs: 0.5,
                to_secs: 0.0
            },
            TransportEvent::TrackFinished,
            TransportEvent::StateChanged {
                state: PlayState::Paused
            },
        ]
    );
    assert_eq!(transport.pending_event_count(), 0);
}

#[test]
fn keyboard_session_through_dispatcher() {
    let mut dispatcher = Dispatcher::new(&TransportConfig::default()).unwrap();

    dispatcher.handle(&Input::Key(Key::Space));
    for _ in 0..55 {
        dispatcher.tick();
    }
    assert_eq!(dispatcher.snapshot().position_label(), "0:05");

    dispatcher.handle(&Input::Key(Key::ArrowRight));
    dispatcher.handle(&Input::Key(Key::ArrowRight));
    assert!((dispatcher.snapshot().position - 15.5).abs() < EPSILON);

    dispatcher.handle(&Input::TransportButton(TransportButton::Rewind));
    assert!((dispatcher.snapshot().position - 0.5).abs() < EPSILON);
    assert!(dispatcher.snapshot().is_playing);

    let (notice, phase) = dispatcher.notifications().current().unwrap();
    assert_eq!(notice.message, "⏮ Rewinding...");
    assert_eq!(phase, NotificationPhase::Entering);
}

#[test]
fn progress_bar_drag_to_end_then_track_finishes() {
    let mut dispatcher = Dispatcher::default();
    dispatcher.handle(&Input::TransportButton(TransportButton::PlayPause));

    dispatcher.handle(&Input::ProgressInput(100.0));
    assert_eq!(dispatcher.snapshot().position, 213.0);
    assert_eq!(dispatcher.snapshot().progress_percent(), 100.0);

    assert_eq!(dispatcher.tick(), IntentOutcome::Finished);
    let state = dispatcher.snapshot();
    assert_eq!(state.position, 0.0);
    assert!(!state.is_playing);
    assert_eq!(format_time(state.position), "0:00");
}

#[test]
fn short_track_from_config_plays_out() {
    let config = TransportConfig {
        duration_secs: 2.0,
        tick_delta_secs: 0.5,
        ..Default::default()
    };
    let mut dispatcher = Dispatcher::new(&config).unwrap();
    dispatcher.handle(&Input::Key(Key::Space));

    let outcomes: Vec<_> = (0..4).map(|_| dispatcher.tick()).collect();
    assert_eq!(
        outcomes,
        vec![
            IntentOutcome::Advanced,
            IntentOutcome::Advanced,
            IntentOutcome::Advanced,
            IntentOutcome::Finished,
        ]
    );
    assert_eq!(dispatcher.tick(), IntentOutcome::Idle);
}

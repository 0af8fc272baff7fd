//! Session loop tests
//!
//! Run on tokio's paused clock so interval ticks are deterministic.

use std::time::Duration;

use tune_session::{Session, SessionError, SessionEvent};
use tokio::sync::broadcast;
use tune_transport::{
    Input, Intent, IntentOutcome, Key, NoticeChange, Notification, PlayState, TransportButton,
    TransportConfig, TransportError, TransportEvent,
};

const EPSILON: f64 = 1e-9;

fn drain(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    received
}

#[tokio::test(start_paused = true)]
async fn clock_advances_only_after_play() {
    let session = Session::spawn(&TransportConfig::default()).unwrap();
    let handle = session.handle();

    tokio::time::sleep(Duration::from_millis(550)).await;
    assert_eq!(handle.snapshot().position, 0.0);

    let dispatch = handle.input(Input::Key(Key::Space)).await.unwrap();
    assert_eq!(
        dispatch.outcome,
        Some(IntentOutcome::PlayState { is_playing: true })
    );

    tokio::time::sleep(Duration::from_millis(1000)).await;
    let state = handle.snapshot();
    assert!(state.is_playing);
    assert!((state.position - 1.0).abs() < EPSILON, "position was {}", state.position);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn skip_and_seek_through_handle() {
    let session = Session::spawn(&TransportConfig::default()).unwrap();
    let handle = session.handle();

    handle
        .input(Input::TransportButton(TransportButton::Forward))
        .await
        .unwrap();
    assert_eq!(handle.snapshot().position, 15.0);

    handle.intent(Intent::SeekToFraction(2.0)).await.unwrap();
    assert_eq!(handle.snapshot().position, 213.0);

    handle.input(Input::ProgressInput(-10.0)).await.unwrap();
    assert_eq!(handle.snapshot().position, 0.0);

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn track_end_stops_and_is_broadcast() {
    let config = TransportConfig {
        duration_secs: 0.5,
        ..Default::default()
    };
    let session = Session::spawn(&config).unwrap();
    let handle = session.handle();
    let mut events = handle.subscribe();

    handle.intent(Intent::TogglePlayPause).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    let state = handle.snapshot();
    assert!(!state.is_playing);
    assert_eq!(state.position, 0.0);

    let received = drain(&mut events);

    assert_eq!(
        received.first(),
        Some(&SessionEvent::Transport(TransportEvent::StateChanged {
            state: PlayState::Playing
        }))
    );
    assert!(received.contains(&SessionEvent::Transport(TransportEvent::TrackFinished)));
    assert!(matches!(
        received.iter().find(|e| matches!(e, SessionEvent::Notice(_))),
        Some(SessionEvent::Notice(notice)) if notice.message == "▶ Playing..."
    ));

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn notice_leaves_at_three_seconds_and_is_removed_after_fade() {
    let session = Session::spawn(&TransportConfig::default()).unwrap();
    let handle = session.handle();
    let mut events = handle.subscribe();
    let shuffle = Notification::info("Shuffle ON");

    handle
        .input(Input::TransportButton(TransportButton::Shuffle))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2950)).await;
    assert_eq!(
        drain(&mut events),
        vec![
            SessionEvent::Notice(shuffle.clone()),
            SessionEvent::NoticeChanged(NoticeChange::Visible(shuffle.clone())),
        ]
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::NoticeChanged(NoticeChange::Leaving(shuffle.clone()))]
    );

    tokio::time::sleep(Duration::from_millis(850)).await;
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::NoticeChanged(NoticeChange::Removed(shuffle))]
    );

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn watch_wakes_on_change() {
    let session = Session::spawn(&TransportConfig::default()).unwrap();
    let handle = session.handle();
    let mut state = handle.watch();

    handle.input(Input::Key(Key::ArrowRight)).await.unwrap();
    state.changed().await.unwrap();
    assert_eq!(state.borrow().position_label(), "0:05");

    session.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn handle_reports_closed_after_shutdown() {
    let session = Session::spawn(&TransportConfig::default()).unwrap();
    let handle = session.handle();

    session.shutdown().await;

    assert!(handle.is_closed());
    assert!(matches!(
        handle.input(Input::Key(Key::Space)).await,
        Err(SessionError::Closed)
    ));
}

#[tokio::test]
async fn spawn_rejects_invalid_config() {
    let config = TransportConfig {
        duration_secs: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        Session::spawn(&config),
        Err(SessionError::Transport(TransportError::InvalidDuration(_)))
    ));
}

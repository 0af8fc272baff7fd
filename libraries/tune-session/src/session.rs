//! Session loop
//!
//! One task owns the dispatcher. Timer ticks and commands are handled one at
//! a time inside a single `select!`, so transport state is never shared and
//! needs no lock. Readers get a copy through the `watch` channel, published
//! as one value after every step.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};
use tune_transport::{
    Dispatch, Dispatcher, Input, Intent, NoticeChange, Notification, PlaybackState,
    TransportConfig, TransportEvent,
};

use crate::error::{Result, SessionError};

/// Command queue depth
const COMMAND_BUFFER: usize = 64;

/// Event fan-out capacity; slow subscribers lag past this
const EVENT_BUFFER: usize = 256;

/// Events published by a running session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Event from the transport
    Transport(TransportEvent),

    /// A notification was shown
    Notice(Notification),

    /// The shown notification became visible, started leaving or was removed
    NoticeChanged(NoticeChange),
}

enum Command {
    Input {
        input: Input,
        reply: oneshot::Sender<Dispatch>,
    },
    Intent {
        intent: Intent,
        reply: oneshot::Sender<Dispatch>,
    },
    Shutdown,
}

/// Cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<PlaybackState>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Input { input, .. } => f.debug_tuple("Input").field(input).finish(),
            Command::Intent { intent, .. } => f.debug_tuple("Intent").field(intent).finish(),
            Command::Shutdown => f.write_str("Shutdown"),
        }
    }
}

impl SessionHandle {
    /// Send a raw input and wait for it to be applied
    pub async fn input(&self, input: Input) -> Result<Dispatch> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Input { input, reply }).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Send an intent and wait for it to be applied
    pub async fn intent(&self, intent: Intent) -> Result<Dispatch> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Intent { intent, reply }).await?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Latest published state
    pub fn snapshot(&self) -> PlaybackState {
        *self.state.borrow()
    }

    /// Receiver that wakes on every state change
    pub fn watch(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    /// Subscribe to session events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Whether the session loop is still running
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

/// A running session: the loop task plus a handle to it
#[derive(Debug)]
pub struct Session {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

impl Session {
    /// Validate configuration and start the session loop
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: &TransportConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(config)?;

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (state_tx, state_rx) = watch::channel(dispatcher.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_BUFFER);

        let task = tokio::spawn(run_session(
            dispatcher,
            commands_rx,
            state_tx,
            events_tx.clone(),
        ));

        info!(
            duration_secs = config.duration_secs,
            tick_interval_ms = config.tick_interval_ms,
            "Session started"
        );

        Ok(Self {
            handle: SessionHandle {
                commands: commands_tx,
                state: state_rx,
                events: events_tx,
            },
            task,
        })
    }

    /// Handle for sending input and reading state
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stop the loop and wait for it to exit
    pub async fn shutdown(self) {
        // Loop may already be gone if every handle was dropped
        self.handle.send(Command::Shutdown).await.ok();
        if let Err(e) = self.task.await {
            warn!("Session task ended abnormally: {}", e);
        }
    }
}

async fn run_session(
    mut dispatcher: Dispatcher,
    mut commands: mpsc::Receiver<Command>,
    state: watch::Sender<PlaybackState>,
    events: broadcast::Sender<SessionEvent>,
) {
    let mut interval = time::interval(Duration::from_millis(dispatcher.tick_interval_ms()));
    // Late ticks are dropped, never replayed in a burst
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("All session handles dropped");
                    break;
                };
                debug!(?command, "Session command");

                match command {
                    Command::Input { input, reply } => {
                        let dispatch = dispatcher.handle(&input);
                        publish(&mut dispatcher, &state, &events, dispatch.notice.as_ref());
                        reply.send(dispatch).ok();
                    }
                    Command::Intent { intent, reply } => {
                        let dispatch = dispatcher.intent(intent);
                        publish(&mut dispatcher, &state, &events, dispatch.notice.as_ref());
                        reply.send(dispatch).ok();
                    }
                    Command::Shutdown => break,
                }
            }
            _ = interval.tick() => {
                dispatcher.tick();
                publish(&mut dispatcher, &state, &events, None);
            }
        }
    }

    info!("Session stopped");
}

fn publish(
    dispatcher: &mut Dispatcher,
    state: &watch::Sender<PlaybackState>,
    events: &broadcast::Sender<SessionEvent>,
    notice: Option<&Notification>,
) {
    let snapshot = dispatcher.snapshot();
    state.send_if_modified(|current| {
        if *current == snapshot {
            false
        } else {
            *current = snapshot;
            true
        }
    });

    // No subscribers is fine; events are only for whoever listens
    for event in dispatcher.transport_mut().drain_events() {
        events.send(SessionEvent::Transport(event)).ok();
    }
    // A replaced notice is reported removed before its successor is shown
    for change in dispatcher.drain_notice_changes() {
        events.send(SessionEvent::NoticeChanged(change)).ok();
    }
    if let Some(notice) = notice {
        events.send(SessionEvent::Notice(notice.clone())).ok();
    }
}

//! GameClient - the session shell around the pure synchronization core.
//!
//! # Architecture
//!
//! ```text
//! UI ──actions──▶ GameClient ──frames──▶ Transport ──▶ Network
//!                     │
//!                guandan-core (pure state machines)
//! ```
//!
//! One driver task per session multiplexes the inbound frame stream, the
//! heartbeat timer, and the reconnect schedule. Inbound messages are
//! processed one at a time in arrival order; the reducer step is atomic
//! with respect to the version check, and subscribers only ever observe
//! fully-applied states through the published [`TableView`].
//!
//! Liveness probes are intercepted here: an inbound `ping` is answered
//! with `pong` and never reaches the synchronization controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};

use guandan_core::{
    Action, ConnectionEvent, ConnectionNotice, ConnectionState, ConnectionStatus, PlayError,
    SyncController, SyncEffect, TableView,
};
use guandan_types::{Card, ClientMessage, PlayCardsData, ServerMessage, Version, WireError};

use crate::config::ClientConfig;
use crate::transport::{Transport, TransportError};

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Wire encoding error.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// No session is established.
    #[error("not connected")]
    NotConnected,

    /// The action failed local validation and was never sent.
    #[error("rejected: {0}")]
    Rejected(#[from] PlayError),
}

struct Shared<T> {
    config: ClientConfig,
    transport: T,
    controller: Mutex<SyncController>,
    machine: Mutex<ConnectionState>,
    state_tx: watch::Sender<TableView>,
    status_tx: watch::Sender<ConnectionStatus>,
    resync_requests: AtomicU64,
}

/// The table session client.
///
/// Generic over [`Transport`] so the full lifecycle is testable against
/// [`MockTransport`](crate::MockTransport) without a network or a clock.
pub struct GameClient<T: Transport> {
    shared: Arc<Shared<T>>,
    driver: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl<T: Transport + 'static> GameClient<T> {
    /// Create a client. No I/O happens until [`connect`](Self::connect).
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let controller = SyncController::new(config.seat);
        let (state_tx, _) = watch::channel(controller.store().view());
        let (status_tx, _) = watch::channel(ConnectionStatus::Disconnected);

        Self {
            shared: Arc::new(Shared {
                config,
                transport,
                controller: Mutex::new(controller),
                machine: Mutex::new(ConnectionState::new()),
                state_tx,
                status_tx,
                resync_requests: AtomicU64::new(0),
            }),
            driver: std::sync::Mutex::new(None),
        }
    }

    /// Open the session and start the driver task.
    ///
    /// Returns the outcome of the initial connection attempt. If that
    /// attempt fails, the bounded reconnect cycle still starts in the
    /// background - it stops on success, on an explicit
    /// [`disconnect`](Self::disconnect), or when the attempt bound is
    /// reached.
    pub async fn connect(&self) -> Result<(), ClientError> {
        if self.shared.machine.lock().await.is_connected() {
            return Ok(());
        }
        self.abort_driver();

        // Normalize any stale lifecycle state, then request the connect.
        advance(&self.shared, ConnectionEvent::DisconnectRequested).await;
        advance(&self.shared, ConnectionEvent::ConnectRequested).await;

        match self.shared.transport.connect(&self.shared.config.url).await {
            Ok(()) => {
                advance(&self.shared, ConnectionEvent::ConnectSucceeded).await;
                self.spawn_driver(true);
                Ok(())
            }
            Err(error) => {
                let (state, _) = advance(
                    &self.shared,
                    ConnectionEvent::ConnectFailed {
                        error: error.to_string(),
                    },
                )
                .await;
                if matches!(state, ConnectionState::Reconnecting { .. }) {
                    self.spawn_driver(false);
                }
                Err(ClientError::Transport(error))
            }
        }
    }

    /// Tear down the session.
    ///
    /// Cancels any pending heartbeat and reconnect timers *before*
    /// releasing the transport handle, so nothing fires after an
    /// intentional teardown. Terminal until a new [`connect`](Self::connect).
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.abort_driver();
        advance(&self.shared, ConnectionEvent::DisconnectRequested).await;
        self.shared.transport.close().await?;
        Ok(())
    }

    /// Submit a play of the given cards.
    ///
    /// Validated locally first (connection, turn, status, hand contents);
    /// rejected plays surface a transient UI error and never reach the
    /// wire. A successful submission clears the card selection.
    pub async fn play_cards(&self, cards: &[Card]) -> Result<(), ClientError> {
        if !self.shared.machine.lock().await.is_connected() {
            self.surface_error("not connected").await;
            return Err(ClientError::NotConnected);
        }

        let frame = {
            let mut controller = self.shared.controller.lock().await;
            if let Err(error) = controller.store().validate_play(cards) {
                controller.store_mut().set_error(error.to_string());
                let view = controller.store().view();
                drop(controller);
                self.shared.state_tx.send_replace(view);
                return Err(ClientError::Rejected(error));
            }
            ClientMessage::PlayCards {
                data: PlayCardsData {
                    cards: cards.iter().map(Card::encode).collect(),
                },
            }
            .to_json()?
        };

        if let Err(error) = self.shared.transport.send(&frame).await {
            self.surface_error("failed to send play").await;
            return Err(ClientError::Transport(error));
        }

        let mut controller = self.shared.controller.lock().await;
        controller.store_mut().clear_selection();
        let view = controller.store().view();
        drop(controller);
        self.shared.state_tx.send_replace(view);
        Ok(())
    }

    /// Pass the turn.
    pub async fn pass(&self) -> Result<(), ClientError> {
        if !self.shared.machine.lock().await.is_connected() {
            self.surface_error("not connected").await;
            return Err(ClientError::NotConnected);
        }

        let frame = {
            let controller = self.shared.controller.lock().await;
            if let Err(error) = controller.store().validate_pass() {
                drop(controller);
                self.surface_error(&error.to_string()).await;
                return Err(ClientError::Rejected(error));
            }
            ClientMessage::Pass.to_json()?
        };

        if let Err(error) = self.shared.transport.send(&frame).await {
            self.surface_error("failed to pass").await;
            return Err(ClientError::Transport(error));
        }
        Ok(())
    }

    /// Add a card to the local selection.
    pub async fn select_card(&self, card: Card) {
        let mut controller = self.shared.controller.lock().await;
        controller.store_mut().select_card(card);
        let view = controller.store().view();
        drop(controller);
        self.shared.state_tx.send_replace(view);
    }

    /// Remove one copy of a card from the local selection.
    pub async fn deselect_card(&self, card: Card) {
        let mut controller = self.shared.controller.lock().await;
        controller.store_mut().deselect_card(card);
        let view = controller.store().view();
        drop(controller);
        self.shared.state_tx.send_replace(view);
    }

    /// Clear the transient UI error message.
    pub async fn clear_error(&self) {
        let mut controller = self.shared.controller.lock().await;
        controller.store_mut().clear_error();
        let view = controller.store().view();
        drop(controller);
        self.shared.state_tx.send_replace(view);
    }

    /// Subscribe to published table views.
    pub fn subscribe(&self) -> watch::Receiver<TableView> {
        self.shared.state_tx.subscribe()
    }

    /// Subscribe to connection status changes.
    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.shared.status_tx.subscribe()
    }

    /// The current published table view.
    pub fn view(&self) -> TableView {
        self.shared.state_tx.borrow().clone()
    }

    /// The current connection status.
    pub fn status(&self) -> ConnectionStatus {
        *self.shared.status_tx.borrow()
    }

    /// The last applied version.
    pub async fn version(&self) -> Version {
        self.shared.controller.lock().await.version()
    }

    /// How many resynchronizations this client has requested.
    pub fn resync_requests(&self) -> u64 {
        self.shared.resync_requests.load(Ordering::Relaxed)
    }

    /// Get a reference to the underlying transport (for testing).
    pub fn transport(&self) -> &T {
        &self.shared.transport
    }

    async fn surface_error(&self, message: &str) {
        let mut controller = self.shared.controller.lock().await;
        controller.store_mut().set_error(message.to_owned());
        let view = controller.store().view();
        drop(controller);
        self.shared.state_tx.send_replace(view);
    }

    fn spawn_driver(&self, connected: bool) {
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(drive(shared, connected));
        if let Some(old) = self.driver.lock().expect("driver slot").replace(handle) {
            old.abort();
        }
    }

    fn abort_driver(&self) {
        if let Some(handle) = self.driver.lock().expect("driver slot").take() {
            handle.abort();
        }
    }
}

impl<T: Transport> Drop for GameClient<T> {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.driver.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

/// Run the state machine one step and interpret its observable actions.
async fn advance<T: Transport>(
    shared: &Arc<Shared<T>>,
    event: ConnectionEvent,
) -> (ConnectionState, Vec<Action>) {
    let mut machine = shared.machine.lock().await;
    let (next, actions) = machine.clone().on_event(event, &shared.config.reconnect);
    *machine = next.clone();
    shared.status_tx.send_replace(next.status());
    drop(machine);

    for action in &actions {
        if let Action::Notify(notice) = action {
            match notice {
                ConnectionNotice::Connected => tracing::info!("session established"),
                ConnectionNotice::Disconnected { reason } => {
                    tracing::info!(%reason, "session lost");
                }
                ConnectionNotice::ReconnectScheduled { attempt, error } => {
                    tracing::info!(attempt, %error, "reconnect scheduled");
                }
                ConnectionNotice::ReconnectsExhausted { attempts, error } => {
                    tracing::error!(attempts, %error, "reconnect attempts exhausted");
                }
            }
        }
    }
    (next, actions)
}

/// The driver task: session pump plus the reconnect cycle.
async fn drive<T: Transport>(shared: Arc<Shared<T>>, mut connected: bool) {
    loop {
        if connected {
            let reason = run_session(&shared).await;
            // The session pump has returned (and with it any pending recv,
            // whose transport locks are now released), so the handle can be
            // torn down before the reconnect cycle starts.
            let _ = shared.transport.close().await;
            advance(&shared, ConnectionEvent::ConnectionLost { reason }).await;
            connected = false;
        }

        // Reconnect cycle. The StartReconnectTimer action the machine just
        // emitted is realized by the sleep below; StopHeartbeat fell out of
        // scope with the session's interval.
        loop {
            match *shared.machine.lock().await {
                ConnectionState::Reconnecting { .. } => {}
                // Terminal error or external teardown: the driver is done.
                _ => return,
            }

            sleep(shared.config.reconnect.delay).await;
            let (_, actions) = advance(&shared, ConnectionEvent::ReconnectTimerFired).await;
            if !actions.iter().any(|a| matches!(a, Action::Connect)) {
                return;
            }

            match shared.transport.connect(&shared.config.url).await {
                Ok(()) => {
                    advance(&shared, ConnectionEvent::ConnectSucceeded).await;
                    connected = true;
                    break;
                }
                Err(error) => {
                    let (state, _) = advance(
                        &shared,
                        ConnectionEvent::ConnectFailed {
                            error: error.to_string(),
                        },
                    )
                    .await;
                    if matches!(state, ConnectionState::Failed) {
                        return;
                    }
                }
            }
        }
    }
}

/// Pump one established session until it dies; returns the loss reason.
async fn run_session<T: Transport>(shared: &Arc<Shared<T>>) -> String {
    let period = shared.config.heartbeat_interval;
    let mut heartbeat = interval_at(Instant::now() + period, period);
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            frame = shared.transport.recv() => match frame {
                Ok(text) => {
                    if let Some(reason) = handle_frame(shared, &text).await {
                        return reason;
                    }
                }
                Err(error) => return format!("receive failed: {error}"),
            },
            _ = heartbeat.tick() => {
                let Ok(ping) = ClientMessage::Ping.to_json() else {
                    continue;
                };
                if shared.transport.send(&ping).await.is_err() {
                    // A probe that cannot be sent means the connection is
                    // already dead; tear it down rather than waiting for
                    // the transport to notice.
                    return "heartbeat send failed".to_owned();
                }
            }
        }
    }
}

/// Process one inbound frame. Returns `Some(reason)` when the session must
/// be torn down (resynchronization, or a failed liveness response).
async fn handle_frame<T: Transport>(shared: &Arc<Shared<T>>, text: &str) -> Option<String> {
    let message = match ServerMessage::from_json(text) {
        Ok(message) => message,
        Err(error) => {
            tracing::warn!(%error, "ignoring unparseable frame");
            return None;
        }
    };

    match message {
        // Liveness probes are transport plumbing: answer and swallow.
        ServerMessage::Ping => {
            let Ok(pong) = ClientMessage::Pong.to_json() else {
                return None;
            };
            if shared.transport.send(&pong).await.is_err() {
                return Some("liveness response send failed".to_owned());
            }
            None
        }
        ServerMessage::Pong => None,

        message => {
            let (effects, view) = {
                let mut controller = shared.controller.lock().await;
                let effects = controller.handle_message(&message);
                (effects, controller.store().view())
            };

            let mut teardown = None;
            let mut changed = false;
            for effect in effects {
                match effect {
                    SyncEffect::StateChanged => changed = true,
                    SyncEffect::ResyncNeeded => {
                        shared.resync_requests.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(
                            "version discontinuity; dropping session to obtain a fresh snapshot"
                        );
                        teardown = Some("resynchronization requested".to_owned());
                    }
                    SyncEffect::SurfaceError(message) => {
                        tracing::warn!(%message, "server error");
                    }
                    SyncEffect::UnknownEvent { kind } => {
                        tracing::warn!(%kind, "skipped unrecognized event");
                    }
                }
            }
            if changed {
                shared.state_tx.send_replace(view);
            }
            teardown
        }
    }
}

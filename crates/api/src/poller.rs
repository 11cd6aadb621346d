// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Periodic refresh of one queue.
//!
//! The first fetch starts immediately, then one per interval. Each fetch runs
//! on its own task, so a slow backend never delays the next tick. Responses
//! are tagged with a sequence number and only the newest is delivered.

use crate::backend::HelpdeskBackend;
use crate::config::PollerConfig;
use crate::error::{ApiError, ApiErrorKind};
use crate::session::Session;
use helpdesk::{RequestSeq, SequenceGate};
use helpdesk_domain::QueueTickets;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// What the poller reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// A fresh queue snapshot.
    Updated {
        queue: String,
        seq: RequestSeq,
        data: QueueTickets,
    },
    /// A fetch failed; polling continues.
    Failed { error: ApiError, consecutive: u32 },
    /// Too many consecutive failures; polling has stopped.
    Stopped { error: ApiError, failures: u32 },
    /// The session was rejected; polling has stopped.
    SessionExpired(ApiError),
}

type FetchResult = (RequestSeq, Result<QueueTickets, ApiError>);

/// Polls one queue at a fixed interval.
///
/// At most one polling loop runs at a time: [`start`](Self::start),
/// [`update_queue`](Self::update_queue) and [`refresh`](Self::refresh)
/// replace the previous loop, and results of its in-flight fetches are
/// dropped.
pub struct TicketPoller<B> {
    backend: Arc<B>,
    session: Session,
    queue: String,
    config: PollerConfig,
    events: mpsc::UnboundedSender<PollEvent>,
    task: Option<JoinHandle<()>>,
}

impl<B> std::fmt::Debug for TicketPoller<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketPoller")
            .field("queue", &self.queue)
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl<B> TicketPoller<B> {
    /// Returns true while a polling loop is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    #[must_use]
    pub fn queue(&self) -> &str {
        &self.queue
    }

    /// Cancels the polling loop. In-flight fetches are abandoned.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(queue = %self.queue, "Poller stopped");
        }
    }
}

impl<B: HelpdeskBackend + 'static> TicketPoller<B> {
    /// Creates a stopped poller and the receiver its events arrive on.
    #[must_use]
    pub fn new(
        backend: Arc<B>,
        session: Session,
        queue: &str,
        config: PollerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PollEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let poller: Self = Self {
            backend,
            session,
            queue: queue.to_string(),
            config,
            events,
            task: None,
        };
        (poller, receiver)
    }

    /// Starts polling, replacing any loop already running.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        self.stop();
        info!(
            queue = %self.queue,
            interval_ms = u64::try_from(self.config.interval.as_millis()).unwrap_or(u64::MAX),
            "Poller started"
        );
        self.task = Some(tokio::spawn(run(
            Arc::clone(&self.backend),
            self.session.clone(),
            self.queue.clone(),
            self.config,
            self.events.clone(),
        )));
    }

    /// Switches to another queue and restarts polling.
    pub fn update_queue(&mut self, queue: &str) {
        self.queue = queue.to_string();
        self.start();
    }

    /// Forces an immediate fetch if the poller is running.
    pub fn refresh(&mut self) {
        if self.is_running() {
            self.start();
        }
    }
}

impl<B> Drop for TicketPoller<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<B: HelpdeskBackend + 'static>(
    backend: Arc<B>,
    session: Session,
    queue: String,
    config: PollerConfig,
    events: mpsc::UnboundedSender<PollEvent>,
) {
    let max_failures: u32 = config.max_consecutive_failures.max(1);
    let mut gate: SequenceGate = SequenceGate::new();
    let mut failures: u32 = 0;
    let mut fetches: JoinSet<()> = JoinSet::new();
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<FetchResult>();

    let mut ticker: tokio::time::Interval = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let seq: RequestSeq = gate.issue();
                let backend: Arc<B> = Arc::clone(&backend);
                let session: Session = session.clone();
                let queue: String = queue.clone();
                let results_tx: mpsc::UnboundedSender<FetchResult> = results_tx.clone();
                fetches.spawn(async move {
                    let result = backend.queue_tickets(&session, &queue).await;
                    // The loop may have ended; nothing to report then.
                    let _ = results_tx.send((seq, result));
                });
            }
            Some((seq, result)) = results_rx.recv() => {
                let event: PollEvent = match result {
                    Ok(data) => {
                        failures = 0;
                        if !gate.admit(seq) {
                            debug!(queue = %queue, seq = seq.value(), "Discarding stale response");
                            continue;
                        }
                        PollEvent::Updated { queue: queue.clone(), seq, data }
                    }
                    Err(error) if error.kind == ApiErrorKind::SessionExpired => {
                        warn!(queue = %queue, "Session expired while polling");
                        let _ = events.send(PollEvent::SessionExpired(error));
                        break;
                    }
                    Err(error) => {
                        failures += 1;
                        warn!(
                            queue = %queue,
                            failures,
                            kind = ?error.kind,
                            "Poll failed"
                        );
                        if failures >= max_failures {
                            warn!(queue = %queue, "Polling paused after repeated failures");
                            let _ = events.send(PollEvent::Stopped { error, failures });
                            break;
                        }
                        PollEvent::Failed { error, consecutive: failures }
                    }
                };
                if events.send(event).is_err() {
                    debug!(queue = %queue, "Event receiver dropped");
                    break;
                }
            }
            Some(_) = fetches.join_next() => {}
        }
    }
}

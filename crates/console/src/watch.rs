// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live queue view.
//!
//! A [`TicketPoller`] refreshes the queue in the background. Each snapshot
//! replaces the list and the screen is redrawn. Polling failures are logged
//! until the poller gives up, which ends the command with an error.

use crate::commands::Context;
use crate::error::ConsoleError;
use crate::render;
use helpdesk::{QueueView, authorize_queue};
use helpdesk_api::{ApiError, HelpdeskClient, PollEvent, PollerConfig, Session, TicketPoller};
use helpdesk_domain::{SlaPolicy, Ticket, TicketFilter};
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{info, warn};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// How the watch loop polls.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Overrides the poll interval.
    pub interval: Option<Duration>,
    /// Use the slower dashboard cadence.
    pub dashboard: bool,
}

impl WatchOptions {
    fn poller_config(self) -> PollerConfig {
        let base: PollerConfig = if self.dashboard {
            PollerConfig::dashboard()
        } else {
            PollerConfig::default()
        };
        match self.interval {
            Some(interval) => base.with_interval(interval),
            None => base,
        }
    }
}

/// Polls `queue` and redraws it until Ctrl-C or until polling gives up.
///
/// # Errors
///
/// Returns `PollingStopped` after repeated failures, or the backend error
/// if the session expires.
pub async fn watch(
    ctx: &Context,
    queue: Option<String>,
    filter: &TicketFilter,
    options: WatchOptions,
) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let queue: String = ctx.queue_name(&session, queue).await?;
    authorize_queue(session.role(), &queue).map_err(ApiError::from)?;

    let (mut poller, mut events): (
        TicketPoller<HelpdeskClient>,
        mpsc::UnboundedReceiver<PollEvent>,
    ) = TicketPoller::new(
        Arc::clone(&ctx.client),
        session,
        &queue,
        options.poller_config(),
    );
    poller.start();

    let mut view: QueueView = QueueView::new(&queue);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!(queue = %queue, "Watch interrupted");
                poller.stop();
                return Ok(());
            }
            event = events.recv() => {
                let Some(event) = event else {
                    return Ok(());
                };
                handle_event(&mut view, event, filter, &ctx.policy)?;
            }
        }
    }
}

fn handle_event(
    view: &mut QueueView,
    event: PollEvent,
    filter: &TicketFilter,
    policy: &SlaPolicy,
) -> Result<(), ConsoleError> {
    match event {
        PollEvent::Updated { queue, data, .. } => {
            // The poller already dropped stale responses.
            view.switch_queue(&queue);
            view.install(data);
            let visible: Vec<&Ticket> = view.visible(filter);
            print!(
                "{CLEAR_SCREEN}{}",
                render::queue_screen(
                    &queue,
                    &visible,
                    view.stats(),
                    policy,
                    OffsetDateTime::now_utc()
                )
            );
            Ok(())
        }
        PollEvent::Failed { error, consecutive } => {
            warn!(consecutive, error = %error, "Queue refresh failed");
            Ok(())
        }
        PollEvent::Stopped { error, failures } => Err(ConsoleError::PollingStopped {
            failures,
            last: error,
        }),
        PollEvent::SessionExpired(error) => Err(ConsoleError::Api(error)),
    }
}

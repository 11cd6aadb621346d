// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{QueueStats, QueueTickets, Ticket, TicketFilter, sorted_by_priority};

/// Sequence number of a queue fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing fetch numbers and admits responses only
/// when they are newer than the last admitted one.
///
/// Responses may arrive out of order; an older response arriving after a
/// newer one has been admitted is stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceGate {
    issued: u64,
    admitted: u64,
}

impl SequenceGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            admitted: 0,
        }
    }

    /// Issues the next sequence number.
    pub const fn issue(&mut self) -> RequestSeq {
        self.issued += 1;
        RequestSeq(self.issued)
    }

    /// Admits `seq` if it is newer than everything admitted so far.
    pub const fn admit(&mut self, seq: RequestSeq) -> bool {
        if seq.0 > self.admitted && seq.0 <= self.issued {
            self.admitted = seq.0;
            true
        } else {
            false
        }
    }

    /// Invalidates every sequence issued so far.
    pub const fn invalidate(&mut self) {
        self.admitted = self.issued;
    }

    /// Last issued sequence, if any.
    #[must_use]
    pub const fn last_issued(&self) -> Option<RequestSeq> {
        if self.issued == 0 {
            None
        } else {
            Some(RequestSeq(self.issued))
        }
    }
}

/// Result of applying a fetch response to a [`QueueView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response replaced the displayed list.
    Applied,
    /// A newer response was already applied, or the queue changed since the
    /// request was issued.
    Stale,
}

/// The single in-memory ticket list of an open queue view.
///
/// Tickets are always held in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueView {
    queue: Option<String>,
    gate: SequenceGate,
    tickets: Vec<Ticket>,
    stats: Option<QueueStats>,
}

impl QueueView {
    /// Creates an empty view showing `queue`.
    #[must_use]
    pub fn new(queue: &str) -> Self {
        Self {
            queue: Some(queue.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn queue(&self) -> Option<&str> {
        self.queue.as_deref()
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    #[must_use]
    pub const fn stats(&self) -> Option<&QueueStats> {
        self.stats.as_ref()
    }

    /// Tickets passing `filter`, in priority order.
    #[must_use]
    pub fn visible(&self, filter: &TicketFilter) -> Vec<&Ticket> {
        filter.apply(&self.tickets)
    }

    /// Issues the sequence number for a new fetch of the current queue.
    pub const fn begin_fetch(&mut self) -> RequestSeq {
        self.gate.issue()
    }

    /// Applies a fetch response if it is the newest seen for this queue.
    pub fn apply(&mut self, seq: RequestSeq, response: QueueTickets) -> ApplyOutcome {
        if !self.gate.admit(seq) {
            return ApplyOutcome::Stale;
        }
        self.install(response);
        ApplyOutcome::Applied
    }

    /// Replaces the list with a response that was already ordered by its source.
    pub fn install(&mut self, response: QueueTickets) {
        self.tickets = sorted_by_priority(response.tickets);
        self.stats = Some(response.stats);
    }

    /// Switches to another queue, clearing the list.
    ///
    /// Responses to fetches issued before the switch become stale. Switching
    /// to the queue already shown keeps the list.
    pub fn switch_queue(&mut self, queue: &str) {
        if self.queue.as_deref() == Some(queue) {
            return;
        }
        self.queue = Some(queue.to_string());
        self.gate.invalidate();
        self.tickets.clear();
        self.stats = None;
    }

    /// Replaces one ticket with the copy returned by the backend after an
    /// update. Returns false if the ticket is not in the list.
    pub fn replace_ticket(&mut self, ticket: Ticket) -> bool {
        let Some(slot) = self.tickets.iter_mut().find(|t| t.id == ticket.id) else {
            return false;
        };
        *slot = ticket;
        let tickets: Vec<Ticket> = std::mem::take(&mut self.tickets);
        self.tickets = sorted_by_priority(tickets);
        true
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket status states and the transition table.
//!
//! Every transition is operator-initiated; the client never advances a
//! ticket based on elapsed time. The table here mirrors the backend's rules
//! so the console can refuse illegal requests before sending them. The
//! backend remains authoritative: a mismatch between the two is a bug.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Statuses that demand a detailed justification (at least
/// [`MIN_DETAILED_JUSTIFICATION`] characters after trimming).
const DETAILED_JUSTIFICATION_STATUSES: [TicketStatus; 6] = [
    TicketStatus::InProgress,
    TicketStatus::WaitingClient,
    TicketStatus::WaitingThirdParty,
    TicketStatus::Resolved,
    TicketStatus::Closed,
    TicketStatus::Cancelled,
];

/// Minimum trimmed length of a detailed justification.
pub const MIN_DETAILED_JUSTIFICATION: usize = 10;

/// Lifecycle states of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Created through external intake, no category yet
    #[serde(rename = "nao-categorizado")]
    Uncategorized,
    /// Categorized and waiting for an operator
    #[serde(rename = "aberto")]
    Open,
    /// An operator is working on it
    #[serde(rename = "em-andamento")]
    InProgress,
    /// Waiting on information or approval from the client
    #[serde(rename = "aguardando-cliente")]
    WaitingClient,
    /// Waiting on a vendor or another team
    #[serde(rename = "aguardando-terceiro")]
    WaitingThirdParty,
    /// Solution applied, pending confirmation
    #[serde(rename = "resolvido")]
    Resolved,
    /// Terminal: confirmed and closed
    #[serde(rename = "fechado")]
    Closed,
    /// Terminal: cancelled
    #[serde(rename = "cancelado")]
    Cancelled,
    /// Brought back after being resolved or while waiting on the client
    #[serde(rename = "reaberto")]
    Reopened,
}

impl TicketStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 9] = [
        Self::Uncategorized,
        Self::Open,
        Self::InProgress,
        Self::WaitingClient,
        Self::WaitingThirdParty,
        Self::Resolved,
        Self::Closed,
        Self::Cancelled,
        Self::Reopened,
    ];

    /// Returns the wire representation used by the backend.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uncategorized => "nao-categorizado",
            Self::Open => "aberto",
            Self::InProgress => "em-andamento",
            Self::WaitingClient => "aguardando-cliente",
            Self::WaitingThirdParty => "aguardando-terceiro",
            Self::Resolved => "resolvido",
            Self::Closed => "fechado",
            Self::Cancelled => "cancelado",
            Self::Reopened => "reaberto",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Uncategorized => "Não Categorizado",
            Self::Open => "Aberto",
            Self::InProgress => "Em Andamento",
            Self::WaitingClient => "Aguardando Cliente",
            Self::WaitingThirdParty => "Aguardando Terceiro",
            Self::Resolved => "Resolvido",
            Self::Closed => "Fechado",
            Self::Cancelled => "Cancelado",
            Self::Reopened => "Reaberto",
        }
    }

    /// Parses a status from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a known status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                status: s.to_string(),
            })
    }

    /// Statuses reachable from this one in a single step.
    #[must_use]
    pub const fn allowed_transitions(&self) -> &'static [Self] {
        match self {
            Self::Uncategorized => &[Self::Open, Self::Cancelled],
            Self::Open => &[
                Self::InProgress,
                Self::WaitingClient,
                Self::WaitingThirdParty,
                Self::Cancelled,
            ],
            Self::InProgress => &[
                Self::WaitingClient,
                Self::WaitingThirdParty,
                Self::Resolved,
                Self::Cancelled,
            ],
            Self::WaitingClient => &[Self::InProgress, Self::Reopened, Self::Cancelled],
            Self::WaitingThirdParty => &[Self::InProgress, Self::Cancelled],
            Self::Resolved => &[Self::Closed, Self::Reopened],
            Self::Reopened => &[Self::InProgress, Self::WaitingClient],
            Self::Closed | Self::Cancelled => &[],
        }
    }

    /// Returns true if `target` is in this status' adjacency list.
    ///
    /// Self-transitions are never listed, so `s.can_transition_to(s)` is false.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        self.allowed_transitions().contains(&target)
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled)
    }

    /// Returns true once the ticket's work is over (resolved, closed or
    /// cancelled). Finalized tickets take no edits and no comments.
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed | Self::Cancelled)
    }

    /// Returns true if moving into this status needs a detailed justification.
    #[must_use]
    pub fn requires_detailed_justification(&self) -> bool {
        DETAILED_JUSTIFICATION_STATUSES.contains(self)
    }

    /// Name of the default backend queue listing tickets in this status.
    #[must_use]
    pub const fn queue_name(&self) -> &'static str {
        match self {
            Self::Uncategorized => "uncategorized",
            Self::Open | Self::Reopened => "open",
            Self::InProgress => "in-progress",
            Self::WaitingClient => "waiting-client",
            Self::WaitingThirdParty => "waiting-third-party",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if `target` is this
    /// status, this status is terminal, or the pair is not in the table.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        let reason: &str = if *self == target {
            "ticket is already in this status"
        } else if self.is_terminal() {
            "cannot transition from terminal state"
        } else if self.can_transition_to(target) {
            return Ok(());
        } else {
            "transition not permitted by status lifecycle rules"
        };

        Err(DomainError::InvalidStatusTransition {
            from: *self,
            to: target,
            reason: reason.to_string(),
        })
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Returns true iff `target` appears in the adjacency list of `current`.
#[must_use]
pub fn can_transition(current: TicketStatus, target: TicketStatus) -> bool {
    current.can_transition_to(target)
}

/// Statuses the console offers as next steps for a ticket in `current`.
///
/// The current status itself is never offered.
#[must_use]
pub fn transition_options(current: TicketStatus) -> Vec<TicketStatus> {
    current
        .allowed_transitions()
        .iter()
        .copied()
        .filter(|target| *target != current)
        .collect()
}

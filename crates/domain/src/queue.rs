// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-computed queues.
//!
//! Queues are recomputed by the backend on every fetch. The client keeps
//! only the latest response for the queue it is showing.

use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};

pub const MY_QUEUE: &str = "my-queue";
pub const ALL_QUEUE: &str = "all";
pub const UNCATEGORIZED_QUEUE: &str = "uncategorized";

/// Queue listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSummary {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub count: u64,
}

impl QueueSummary {
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn group(&self) -> QueueGroup {
        QueueGroup::of(&self.name)
    }
}

/// Counters the backend computes alongside a queue's tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub critical: u64,
    #[serde(default)]
    pub sla_breached: u64,
    #[serde(default)]
    pub sla_at_risk: u64,
}

/// Response of a queue fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueTickets {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub stats: QueueStats,
}

/// Sections the queue list is grouped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueueGroup {
    /// The operator's own queue
    Personal,
    /// Work in flight (open, in progress, waiting) and custom queues
    Active,
    /// Every ticket
    All,
    /// Resolved, closed and cancelled
    Finished,
    /// Tickets awaiting categorization
    Admin,
}

impl QueueGroup {
    /// Classifies a queue by name. Unknown names are active queues.
    #[must_use]
    pub fn of(name: &str) -> Self {
        match name {
            MY_QUEUE => Self::Personal,
            ALL_QUEUE => Self::All,
            "resolved" | "closed" | "cancelled" => Self::Finished,
            UNCATEGORIZED_QUEUE => Self::Admin,
            _ => Self::Active,
        }
    }
}

/// Queue selected when the console opens: `my-queue` if present, else the first.
#[must_use]
pub fn default_queue(queues: &[QueueSummary]) -> Option<&QueueSummary> {
    queues
        .iter()
        .find(|queue| queue.name == MY_QUEUE)
        .or_else(|| queues.first())
}

/// Queues grouped by section, preserving backend order within a group.
#[must_use]
pub fn group_queues(queues: &[QueueSummary]) -> Vec<(QueueGroup, Vec<&QueueSummary>)> {
    let mut groups: Vec<(QueueGroup, Vec<&QueueSummary>)> = Vec::new();
    for queue in queues {
        let group: QueueGroup = queue.group();
        match groups.iter_mut().find(|(existing, _)| *existing == group) {
            Some((_, members)) => members.push(queue),
            None => groups.push((group, vec![queue])),
        }
    }
    groups.sort_by_key(|(group, _)| *group);
    groups
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-side filtering of the displayed queue.

use crate::priority::Priority;
use crate::status::TicketStatus;
use crate::ticket::Ticket;

/// Assignee criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    #[default]
    Any,
    Unassigned,
    User(String),
}

/// Filters applied over an already fetched ticket list.
///
/// Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Case-insensitive text matched against number, title, description and client.
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub assignee: AssigneeFilter,
}

impl TicketFilter {
    /// Number of active criteria other than the text search.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            self.status.is_some(),
            self.priority.is_some(),
            self.department.is_some(),
            self.assignee != AssigneeFilter::Any,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Returns true if `ticket` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.matches_search(ticket)
            && self.status.is_none_or(|status| ticket.status == status)
            && self
                .priority
                .is_none_or(|priority| ticket.priority == priority)
            && self
                .department
                .as_deref()
                .is_none_or(|department| ticket.department() == Some(department))
            && self.matches_assignee(ticket)
    }

    fn matches_search(&self, ticket: &Ticket) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term: String = term.to_lowercase();

        ticket.ticket_number.to_string().contains(&term)
            || ticket.title.to_lowercase().contains(&term)
            || ticket.description.to_lowercase().contains(&term)
            || ticket.client.name.to_lowercase().contains(&term)
            || ticket.client.email.to_lowercase().contains(&term)
    }

    fn matches_assignee(&self, ticket: &Ticket) -> bool {
        match &self.assignee {
            AssigneeFilter::Any => true,
            AssigneeFilter::Unassigned => ticket.is_unassigned(),
            AssigneeFilter::User(user_id) => ticket.assignee_id() == Some(user_id.as_str()),
        }
    }

    /// Tickets matching the filter, in input order.
    #[must_use]
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
        tickets.iter().filter(|ticket| self.matches(ticket)).collect()
    }
}

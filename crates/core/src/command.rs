// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Permission, Priority, TicketStatus};

/// A command represents operator intent against one ticket, as data only.
///
/// Commands are checked by [`crate::prepare`] before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the ticket to another status.
    ChangeStatus {
        /// Requested status.
        target: TicketStatus,
        /// Justification recorded in the ticket history.
        description: String,
    },
    /// Assign the ticket to an operator.
    Assign {
        /// Operator receiving the ticket.
        user_id: String,
        /// Justification recorded in the ticket history.
        description: String,
    },
    /// Move the ticket to another department.
    TransferDepartment {
        /// Destination department.
        department_id: String,
        /// Why the ticket is moving.
        reason: String,
    },
    /// Add a comment, optionally hidden from the client.
    AddComment {
        /// Comment body.
        text: String,
        /// Internal comments are visible to staff only.
        internal: bool,
    },
    /// Override the ticket's priority.
    ChangePriority {
        /// New priority.
        priority: Priority,
    },
    /// Attach a category to an uncategorized ticket.
    Categorize {
        /// Category to apply.
        category_id: String,
    },
    /// Rewrite the ticket's title or description.
    Edit {
        /// New title. Must not be blank when given.
        title: Option<String>,
        /// New description.
        description: Option<String>,
    },
}

impl Command {
    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeStatus { .. } => "change_status",
            Self::Assign { .. } => "assign",
            Self::TransferDepartment { .. } => "transfer_department",
            Self::AddComment { .. } => "add_comment",
            Self::ChangePriority { .. } => "change_priority",
            Self::Categorize { .. } => "categorize",
            Self::Edit { .. } => "edit",
        }
    }

    /// Permission the acting role must hold, if any.
    #[must_use]
    pub const fn required_permission(&self) -> Option<Permission> {
        match self {
            Self::ChangeStatus { .. } => Some(Permission::ChangeStatus),
            Self::Assign { .. } => Some(Permission::AssignTicket),
            Self::TransferDepartment { .. } => Some(Permission::EditAnyTicket),
            Self::ChangePriority { .. } => Some(Permission::ChangePriority),
            Self::Categorize { .. } => Some(Permission::ViewUncategorized),
            Self::Edit { .. } => Some(Permission::EditAnyTicket),
            Self::AddComment { .. } => None,
        }
    }

    /// Narrower permission that suffices when the actor opened the ticket.
    #[must_use]
    pub const fn own_permission(&self) -> Option<Permission> {
        match self {
            Self::Edit { .. } => Some(Permission::EditOwnTicket),
            _ => None,
        }
    }
}

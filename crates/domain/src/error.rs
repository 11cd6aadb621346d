// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::TicketStatus;
use serde::{Deserialize, Serialize};

/// A validation problem tied to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field path, e.g. `client.email`.
    pub field: String,
    /// User-facing message.
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the ticket rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown status string.
    InvalidStatus {
        /// The rejected value.
        status: String,
    },
    /// Unknown priority string.
    InvalidPriority {
        /// The rejected value.
        priority: String,
    },
    /// Unknown role string.
    InvalidRole {
        /// The rejected value.
        role: String,
    },
    /// The transition is not in the status table.
    InvalidStatusTransition {
        /// Current status.
        from: TicketStatus,
        /// Requested status.
        to: TicketStatus,
        /// Why the transition was refused.
        reason: String,
    },
    /// An action that needs a justification was submitted without one.
    MissingJustification {
        /// The action being justified.
        action: String,
    },
    /// The justification is shorter than the target status requires.
    JustificationTooShort {
        /// Requested status.
        target: TicketStatus,
        /// Required trimmed length.
        minimum: usize,
        /// Trimmed length received.
        actual: usize,
    },
    /// One or more input fields are invalid.
    ValidationFailed {
        /// Every problem found.
        errors: Vec<FieldError>,
    },
    /// The ticket is resolved, closed or cancelled and takes no further input.
    TicketFinalized {
        /// The refused action.
        action: String,
        /// Current status.
        status: TicketStatus,
    },
    /// A referenced category does not exist or is not available.
    CategoryUnavailable {
        /// The category id.
        category_id: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus { status } => write!(f, "Invalid ticket status: '{status}'"),
            Self::InvalidPriority { priority } => write!(f, "Invalid priority: '{priority}'"),
            Self::InvalidRole { role } => write!(f, "Invalid role: '{role}'"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::MissingJustification { action } => {
                write!(f, "A description is required for {action}")
            }
            Self::JustificationTooShort {
                target,
                minimum,
                actual,
            } => write!(
                f,
                "Changing status to '{target}' requires at least {minimum} characters of description (got {actual})"
            ),
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: ")?;
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            Self::TicketFinalized { action, status } => {
                write!(f, "Cannot {action} a ticket in status '{status}'")
            }
            Self::CategoryUnavailable { category_id } => {
                write!(f, "Category '{category_id}' is not available")
            }
        }
    }
}

impl std::error::Error for DomainError {}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Console roles and the permissions each one grants.
//!
//! Like the transition table, this is a client-side copy used to hide or
//! refuse actions early. The backend enforces authorization.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Role of an authenticated console user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative authority, including catalog and user management.
    Master,
    /// Works tickets across queues: assigns, transitions, reprioritizes.
    Operator,
    /// Opens tickets and edits their own.
    Agent,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Operator => "operator",
            Self::Agent => "agent",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Master => "Master",
            Self::Operator => "Operador",
            Self::Agent => "Agente",
        }
    }

    /// Permissions granted to this role.
    #[must_use]
    pub const fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Master => &Permission::ALL,
            Self::Operator => &[
                Permission::ViewAllTickets,
                Permission::ViewAllQueues,
                Permission::CreateTicket,
                Permission::EditAnyTicket,
                Permission::DeleteOwnTicket,
                Permission::AssignTicket,
                Permission::ChangeStatus,
                Permission::ChangePriority,
            ],
            Self::Agent => &[
                Permission::CreateTicket,
                Permission::EditOwnTicket,
                Permission::DeleteOwnTicket,
            ],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "master" => Ok(Self::Master),
            "operator" => Ok(Self::Operator),
            "agent" => Ok(Self::Agent),
            _ => Err(DomainError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

/// Individual console capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewUncategorized,
    ViewAllTickets,
    ViewAllQueues,
    CreateTicket,
    EditAnyTicket,
    EditOwnTicket,
    DeleteAnyTicket,
    DeleteOwnTicket,
    AssignTicket,
    ChangeStatus,
    ChangePriority,
    CreateCategory,
    EditCategory,
    DeleteCategory,
    CreateQueue,
    EditQueue,
    DeleteQueue,
    CreateUser,
    EditUser,
    DeleteUser,
    ManageSettings,
    ViewReports,
}

impl Permission {
    pub const ALL: [Self; 22] = [
        Self::ViewUncategorized,
        Self::ViewAllTickets,
        Self::ViewAllQueues,
        Self::CreateTicket,
        Self::EditAnyTicket,
        Self::EditOwnTicket,
        Self::DeleteAnyTicket,
        Self::DeleteOwnTicket,
        Self::AssignTicket,
        Self::ChangeStatus,
        Self::ChangePriority,
        Self::CreateCategory,
        Self::EditCategory,
        Self::DeleteCategory,
        Self::CreateQueue,
        Self::EditQueue,
        Self::DeleteQueue,
        Self::CreateUser,
        Self::EditUser,
        Self::DeleteUser,
        Self::ManageSettings,
        Self::ViewReports,
    ];
}

/// Returns true if `role` grants `permission`.
#[must_use]
pub fn has_permission(role: Role, permission: Permission) -> bool {
    role.permissions().contains(&permission)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{DomainError, Permission, Role};

/// Errors raised while checking a command before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The acting role lacks the permission the command needs.
    PermissionDenied {
        /// The command that was attempted.
        action: String,
        /// The acting role.
        role: Role,
        /// The missing permission.
        required: Permission,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PermissionDenied {
                action,
                role,
                required,
            } => write!(
                f,
                "Role '{role}' may not perform '{action}' (requires {required:?})"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Role, Ticket, UserAccount};

/// The user a guard checks against.
///
/// Without a user id only role-wide permissions apply; "own ticket"
/// permissions need to know who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor<'a> {
    pub role: Role,
    pub user_id: Option<&'a str>,
}

impl<'a> Actor<'a> {
    #[must_use]
    pub const fn new(role: Role, user_id: Option<&'a str>) -> Self {
        Self { role, user_id }
    }

    /// Returns true if this actor opened `ticket`.
    #[must_use]
    pub fn owns(&self, ticket: &Ticket) -> bool {
        self.user_id.is_some_and(|user_id| ticket.is_owned_by(user_id))
    }
}

impl From<Role> for Actor<'static> {
    fn from(role: Role) -> Self {
        Self::new(role, None)
    }
}

impl<'a> From<&'a UserAccount> for Actor<'a> {
    fn from(user: &'a UserAccount) -> Self {
        Self::new(user.role, Some(user.id.as_str()))
    }
}

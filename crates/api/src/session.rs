// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Role, UserAccount};
use serde::Deserialize;

/// An authenticated console session.
///
/// Passed explicitly to every authenticated call. When a call fails with
/// [`crate::ApiErrorKind::SessionExpired`] the session must be discarded.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: UserAccount,
}

impl Session {
    #[must_use]
    pub const fn new(token: String, user: UserAccount) -> Self {
        Self { token, user }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn user(&self) -> &UserAccount {
        &self.user
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.user.role
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user.email)
            .field("role", &self.user.role)
            .finish()
    }
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub user: UserAccount,
}

/// `GET /auth/me` answers either with the bare user or wrapped in `user`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MeResponse {
    Wrapped { user: UserAccount },
    Bare(UserAccount),
}

impl MeResponse {
    pub(crate) fn into_user(self) -> UserAccount {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

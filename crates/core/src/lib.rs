// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod actor;
mod admin;
mod apply;
mod command;
mod error;
mod request;
mod state;

#[cfg(test)]
mod tests;

pub use actor::Actor;
pub use admin::{
    ActivationRequest, AdminCommand, PasswordResetRequest, PreparedAdmin, ReorderRequest,
    prepare_admin,
};
pub use apply::{
    authorize, authorize_queue, prepare, prepare_delete, prepare_external_ticket,
    prepare_new_ticket,
};
pub use command::Command;
pub use error::CoreError;
pub use request::{
    AssignRequest, CategorizeRequest, CommentRequest, EditRequest, ExternalTicketRequest,
    NewTicketRequest, PreparedRequest, PriorityRequest, StatusChangeRequest, TransferRequest,
};
pub use state::{ApplyOutcome, QueueView, RequestSeq, SequenceGate};

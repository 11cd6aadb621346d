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

mod backend;
mod client;
mod config;
mod error;
mod poller;
mod session;
mod workflow;

#[cfg(test)]
mod tests;

pub use backend::HelpdeskBackend;
pub use client::{
    AdvancedSearch, ExportFilter, ExportFormat, HelpdeskClient, Pagination, SortOrder, TicketPage,
    TicketQuery,
};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PollerConfig};
pub use error::{
    ApiError, ApiErrorKind, FALLBACK_MESSAGE, SESSION_EXPIRED_NOTICE, translate_core_error,
    translate_domain_error,
};
pub use poller::{PollEvent, TicketPoller};
pub use session::Session;
pub use workflow::TicketWorkflow;

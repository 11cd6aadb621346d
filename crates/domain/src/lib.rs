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

mod admin;
mod catalog;
mod error;
mod filter;
mod ordering;
mod priority;
mod queue;
mod role;
mod sla;
mod status;
mod template;
mod ticket;
mod validation;

#[cfg(test)]
mod tests;

pub use admin::{
    CategoryDraft, DEFAULT_DEPARTMENT_COLOR, DEFAULT_DEPARTMENT_ICON, DepartmentDraft,
    MIN_FIRST_RESPONSE_HOURS, MIN_PASSWORD_LENGTH, MIN_RESOLUTION_HOURS, QueueDraft,
    TemplateDraft, UserChanges, UserDraft, validate_category_draft, validate_department_draft,
    validate_password, validate_queue_draft, validate_template_draft, validate_user_changes,
    validate_user_draft,
};
pub use catalog::{Category, Department, SlaHours, UserAccount, assignable_operators};
pub use error::{DomainError, FieldError};
pub use filter::{AssigneeFilter, TicketFilter};
pub use ordering::{priority_order, sort_by_priority, sorted_by_priority};
pub use priority::Priority;
pub use queue::{
    ALL_QUEUE, MY_QUEUE, QueueGroup, QueueStats, QueueSummary, QueueTickets, UNCATEGORIZED_QUEUE,
    default_queue, group_queues,
};
pub use role::{Permission, Role, has_permission};
pub use sla::{
    DEFAULT_AT_RISK_THRESHOLD, SlaPolicy, SlaStatus, SlaTarget, TicketSla, TimeRemaining,
    format_optional_remaining, format_remaining, sla_status, sla_status_now, time_remaining,
};
pub use status::{MIN_DETAILED_JUSTIFICATION, TicketStatus, can_transition, transition_options};
pub use template::{DEFAULT_CLIENT_NAME, ResponseTemplate, TemplateCategory, TemplateVariables};
pub use ticket::{
    AssignedOperator, CategoryRef, ClientInfo, Comment, HistoryEntry, Ticket, TicketFile, UserRef,
};
pub use validation::{
    MAX_TITLE_LENGTH, NewTicketDraft, is_plausible_email, validate_justification,
    validate_new_ticket, validate_reason,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runs ticket commands end to end: guard, send, refetch.

use crate::backend::HelpdeskBackend;
use crate::error::{ApiError, translate_core_error};
use crate::session::Session;
use helpdesk::{
    AdminCommand, Command, NewTicketRequest, PreparedAdmin, PreparedRequest, prepare,
    prepare_admin, prepare_delete, prepare_new_ticket,
};
use helpdesk_domain::{Category, NewTicketDraft, Ticket};
use std::sync::Arc;
use tracing::{info, warn};

/// Applies commands to tickets through a backend.
///
/// A command refused by the guard never reaches the backend. A command the
/// backend refuses leaves the caller's ticket untouched; the error is
/// returned as the backend reported it.
#[derive(Debug)]
pub struct TicketWorkflow<B> {
    backend: Arc<B>,
}

impl<B> Clone for TicketWorkflow<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: HelpdeskBackend> TicketWorkflow<B> {
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub const fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Applies `command` to `ticket` and returns the ticket as the backend
    /// now holds it.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the guard refuses the command, or the backend's
    /// error if sending or refetching fails.
    pub async fn execute(
        &self,
        session: &Session,
        ticket: &Ticket,
        command: Command,
    ) -> Result<Ticket, ApiError> {
        let action: &'static str = command.name();
        let request: PreparedRequest =
            prepare(ticket, command, session.user()).map_err(|err| {
                info!(
                    ticket = ticket.ticket_number,
                    action,
                    reason = %err,
                    "Command refused before sending"
                );
                translate_core_error(err)
            })?;

        if let Err(err) = self.backend.submit(session, &ticket.id, &request).await {
            warn!(
                ticket = ticket.ticket_number,
                action,
                kind = ?err.kind,
                "Backend refused command"
            );
            return Err(err);
        }

        info!(ticket = ticket.ticket_number, action, "Command applied");
        self.backend.ticket(session, &ticket.id).await
    }

    /// Deletes `ticket` if the session may delete it.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the guard refuses, or the backend's error.
    pub async fn delete(&self, session: &Session, ticket: &Ticket) -> Result<(), ApiError> {
        if let Err(err) = prepare_delete(ticket, session.user()) {
            info!(
                ticket = ticket.ticket_number,
                action = "delete",
                reason = %err,
                "Command refused before sending"
            );
            return Err(translate_core_error(err));
        }

        if let Err(err) = self.backend.delete_ticket(session, &ticket.id).await {
            warn!(
                ticket = ticket.ticket_number,
                action = "delete",
                kind = ?err.kind,
                "Backend refused command"
            );
            return Err(err);
        }

        info!(ticket = ticket.ticket_number, "Ticket deleted");
        Ok(())
    }

    /// Guards and sends an administrative change.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the guard refuses the command, or the backend's
    /// error.
    pub async fn administer(
        &self,
        session: &Session,
        command: AdminCommand,
    ) -> Result<(), ApiError> {
        let action: &'static str = command.name();
        let target: Option<String> = command.target_id().map(ToString::to_string);
        let prepared: PreparedAdmin = prepare_admin(command, session.role()).map_err(|err| {
            info!(action, target = ?target, reason = %err, "Command refused before sending");
            translate_core_error(err)
        })?;

        if let Err(err) = self.backend.administer(session, &prepared).await {
            warn!(action, target = ?target, kind = ?err.kind, "Backend refused command");
            return Err(err);
        }

        info!(action, target = ?target, "Administrative change applied");
        Ok(())
    }

    /// Validates `draft` and creates the ticket with the category's default
    /// priority.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if the draft is invalid or the category cannot be
    /// used, or the backend's error.
    pub async fn create(&self, session: &Session, draft: &NewTicketDraft) -> Result<Ticket, ApiError> {
        let categories: Vec<Category> = self.backend.categories_for_creation(session).await?;
        let request: NewTicketRequest =
            prepare_new_ticket(draft, &categories, session.role()).map_err(translate_core_error)?;

        let ticket: Ticket = self.backend.create_ticket(session, &request).await?;
        info!(
            ticket = ticket.ticket_number,
            category = %request.category_id,
            priority = request.priority.as_str(),
            "Ticket created"
        );
        Ok(ticket)
    }
}

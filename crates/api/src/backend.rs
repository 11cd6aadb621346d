// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::client::HelpdeskClient;
use crate::error::ApiError;
use crate::session::Session;
use helpdesk::{NewTicketRequest, PreparedAdmin, PreparedRequest};
use helpdesk_domain::{Category, QueueTickets, Ticket};

/// The backend calls the workflow runner and the poller depend on.
#[async_trait::async_trait]
pub trait HelpdeskBackend: Send + Sync {
    /// Fetches a queue's tickets and counters.
    async fn queue_tickets(&self, session: &Session, queue: &str)
    -> Result<QueueTickets, ApiError>;

    /// Fetches one ticket.
    async fn ticket(&self, session: &Session, id: &str) -> Result<Ticket, ApiError>;

    /// Categories available for manual ticket creation.
    async fn categories_for_creation(&self, session: &Session) -> Result<Vec<Category>, ApiError>;

    /// Creates a ticket.
    async fn create_ticket(
        &self,
        session: &Session,
        request: &NewTicketRequest,
    ) -> Result<Ticket, ApiError>;

    /// Sends a request prepared for ticket `id`.
    async fn submit(
        &self,
        session: &Session,
        id: &str,
        request: &PreparedRequest,
    ) -> Result<(), ApiError>;

    /// Deletes ticket `id`.
    async fn delete_ticket(&self, session: &Session, id: &str) -> Result<(), ApiError>;

    /// Sends an administrative change.
    async fn administer(&self, session: &Session, prepared: &PreparedAdmin)
    -> Result<(), ApiError>;
}

#[async_trait::async_trait]
impl HelpdeskBackend for HelpdeskClient {
    async fn queue_tickets(
        &self,
        session: &Session,
        queue: &str,
    ) -> Result<QueueTickets, ApiError> {
        Self::queue_tickets(self, session, queue).await
    }

    async fn ticket(&self, session: &Session, id: &str) -> Result<Ticket, ApiError> {
        Self::ticket(self, session, id).await
    }

    async fn categories_for_creation(&self, session: &Session) -> Result<Vec<Category>, ApiError> {
        Self::categories_for_creation(self, session).await
    }

    async fn create_ticket(
        &self,
        session: &Session,
        request: &NewTicketRequest,
    ) -> Result<Ticket, ApiError> {
        Self::create_ticket(self, session, request).await
    }

    async fn submit(
        &self,
        session: &Session,
        id: &str,
        request: &PreparedRequest,
    ) -> Result<(), ApiError> {
        match request {
            PreparedRequest::ChangeStatus(body) => self.change_status(session, id, body).await,
            PreparedRequest::Assign(body) => self.assign(session, id, body).await,
            PreparedRequest::TransferDepartment(body) => {
                self.transfer_department(session, id, body).await
            }
            PreparedRequest::AddComment(body) => self.add_comment(session, id, body).await,
            PreparedRequest::ChangePriority(body) => self.change_priority(session, id, body).await,
            PreparedRequest::Categorize(body) => self.categorize(session, id, body).await,
            PreparedRequest::Edit(body) => self.edit_ticket(session, id, body).await,
        }
    }

    async fn delete_ticket(&self, session: &Session, id: &str) -> Result<(), ApiError> {
        Self::delete_ticket(self, session, id).await
    }

    async fn administer(
        &self,
        session: &Session,
        prepared: &PreparedAdmin,
    ) -> Result<(), ApiError> {
        Self::administer(self, session, prepared).await
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory backend and fixtures shared by the workflow and poller tests.

use crate::{ApiError, ApiErrorKind, HelpdeskBackend, Session};
use helpdesk::{AdminCommand, NewTicketRequest, PreparedAdmin, PreparedRequest};
use helpdesk_domain::{
    AssignedOperator, Category, ClientInfo, Priority, QueueStats, QueueTickets, Role, SlaHours,
    Ticket, TicketSla, TicketStatus, UserAccount,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use time::macros::datetime;

pub fn test_session(role: Role) -> Session {
    Session::new(
        String::from("tok-1"),
        UserAccount {
            id: String::from("u-1"),
            email: String::from("ana@example.com"),
            display_name: Some(String::from("Ana")),
            role,
            is_active: true,
        },
    )
}

pub fn create_test_ticket(number: u64, status: TicketStatus, priority: Priority) -> Ticket {
    Ticket {
        id: format!("t-{number}"),
        ticket_number: number,
        title: format!("Ticket {number}"),
        description: String::from("Impressora não imprime"),
        status,
        priority,
        category: None,
        assigned_to: None,
        client: ClientInfo {
            name: String::from("Maria Souza"),
            email: String::from("maria@example.com"),
            company: None,
            phone: None,
        },
        created_by: None,
        sla: TicketSla::default(),
        tags: Vec::new(),
        files: Vec::new(),
        created_at: datetime!(2026-03-10 08:00 UTC),
        updated_at: None,
    }
}

pub fn create_test_category(id: &str, default_priority: Priority) -> Category {
    Category {
        id: id.to_string(),
        department: String::from("TI"),
        kind: String::from("Suporte"),
        system: String::from("Impressoras"),
        description: None,
        default_priority,
        sla: SlaHours::default(),
        is_active: true,
        is_master_only: false,
        allow_manual_creation: true,
    }
}

pub fn snapshot(numbers: &[u64]) -> QueueTickets {
    QueueTickets {
        tickets: numbers
            .iter()
            .map(|number| create_test_ticket(*number, TicketStatus::Open, Priority::Media))
            .collect(),
        stats: QueueStats {
            total: u64::try_from(numbers.len()).unwrap(),
            ..QueueStats::default()
        },
    }
}

pub fn server_error() -> ApiError {
    ApiError::from_response(500, b"", false)
}

pub fn expired() -> ApiError {
    ApiError::from_response(401, b"", false)
}

/// One scripted answer to a queue fetch.
pub struct Scripted {
    pub delay: Duration,
    pub result: Result<QueueTickets, ApiError>,
}

impl Scripted {
    pub fn ok(numbers: &[u64]) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(snapshot(numbers)),
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Backend double that applies submitted requests to an in-memory store.
pub struct FakeBackend {
    pub queue_calls: AtomicUsize,
    pub queues_requested: Mutex<Vec<String>>,
    script: Mutex<VecDeque<Scripted>>,
    fallback: Result<QueueTickets, ApiError>,
    pub tickets: Mutex<HashMap<String, Ticket>>,
    pub submitted: Mutex<Vec<(String, PreparedRequest)>>,
    pub submit_error: Mutex<Option<ApiError>>,
    pub categories: Vec<Category>,
    pub created: Mutex<Vec<NewTicketRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub administered: Mutex<Vec<AdminCommand>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::with_fallback(Ok(snapshot(&[])))
    }

    pub fn with_fallback(fallback: Result<QueueTickets, ApiError>) -> Self {
        Self {
            queue_calls: AtomicUsize::new(0),
            queues_requested: Mutex::new(Vec::new()),
            script: Mutex::new(VecDeque::new()),
            fallback,
            tickets: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
            submit_error: Mutex::new(None),
            categories: vec![
                create_test_category("cat-1", Priority::Baixa),
                create_test_category("cat-2", Priority::Critica),
            ],
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            administered: Mutex::new(Vec::new()),
        }
    }

    pub fn script(self, answers: Vec<Scripted>) -> Self {
        self.script.lock().unwrap().extend(answers);
        self
    }

    pub fn store(&self, ticket: Ticket) {
        self.tickets
            .lock()
            .unwrap()
            .insert(ticket.id.clone(), ticket);
    }

    pub fn stored(&self, id: &str) -> Ticket {
        self.tickets.lock().unwrap().get(id).cloned().unwrap()
    }

    pub fn fail_submissions_with(&self, error: ApiError) {
        *self.submit_error.lock().unwrap() = Some(error);
    }
}

#[async_trait::async_trait]
impl HelpdeskBackend for FakeBackend {
    async fn queue_tickets(
        &self,
        _session: &Session,
        queue: &str,
    ) -> Result<QueueTickets, ApiError> {
        self.queue_calls.fetch_add(1, Ordering::SeqCst);
        self.queues_requested.lock().unwrap().push(queue.to_string());
        let next: Option<Scripted> = self.script.lock().unwrap().pop_front();
        let Some(scripted) = next else {
            return self.fallback.clone();
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }

    async fn ticket(&self, _session: &Session, id: &str) -> Result<Ticket, ApiError> {
        self.tickets
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::from_response(404, b"", false))
    }

    async fn categories_for_creation(
        &self,
        _session: &Session,
    ) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories.clone())
    }

    async fn create_ticket(
        &self,
        _session: &Session,
        request: &NewTicketRequest,
    ) -> Result<Ticket, ApiError> {
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        let mut ticket = create_test_ticket(
            u64::try_from(created.len()).unwrap(),
            request.status,
            request.priority,
        );
        ticket.title.clone_from(&request.title);
        drop(created);
        self.store(ticket.clone());
        Ok(ticket)
    }

    async fn submit(
        &self,
        _session: &Session,
        id: &str,
        request: &PreparedRequest,
    ) -> Result<(), ApiError> {
        if let Some(error) = self.submit_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.submitted
            .lock()
            .unwrap()
            .push((id.to_string(), request.clone()));

        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .get_mut(id)
            .ok_or_else(|| ApiError::new(ApiErrorKind::NotFound, "Recurso não encontrado."))?;
        match request {
            PreparedRequest::ChangeStatus(body) => ticket.status = body.status,
            PreparedRequest::Assign(body) => {
                ticket.assigned_to = Some(AssignedOperator {
                    user_id: Some(body.assign_to_user_id.clone()),
                    display_name: None,
                    email: None,
                });
            }
            PreparedRequest::ChangePriority(body) => ticket.priority = body.priority,
            PreparedRequest::Categorize(_) => ticket.status = TicketStatus::Open,
            PreparedRequest::Edit(body) => {
                if let Some(title) = &body.title {
                    ticket.title.clone_from(title);
                }
                if let Some(description) = &body.description {
                    ticket.description.clone_from(description);
                }
            }
            PreparedRequest::TransferDepartment(_) | PreparedRequest::AddComment(_) => {}
        }
        drop(tickets);
        Ok(())
    }

    async fn delete_ticket(&self, _session: &Session, id: &str) -> Result<(), ApiError> {
        if let Some(error) = self.submit_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.tickets.lock().unwrap().remove(id);
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn administer(
        &self,
        _session: &Session,
        prepared: &PreparedAdmin,
    ) -> Result<(), ApiError> {
        if let Some(error) = self.submit_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.administered
            .lock()
            .unwrap()
            .push(prepared.command().clone());
        Ok(())
    }
}

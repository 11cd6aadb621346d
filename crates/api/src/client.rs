// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP client for the help desk REST backend.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::{LoginResponse, MeResponse, Session};
use helpdesk::{
    ActivationRequest, AdminCommand, AssignRequest, CategorizeRequest, CommentRequest,
    EditRequest, ExternalTicketRequest, NewTicketRequest, PasswordResetRequest, PreparedAdmin,
    PriorityRequest, ReorderRequest, StatusChangeRequest, TransferRequest,
};
use helpdesk_domain::{
    Category, Comment, Department, HistoryEntry, Priority, QueueSummary, QueueTickets,
    ResponseTemplate, SlaStatus, TemplateVariables, Ticket, TicketStatus, UserAccount,
    assignable_operators,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, warn};

const LOGIN_PATH: &str = "/auth/login";

/// Query parameters accepted by `GET /tickets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TicketQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(department) = &self.department {
            pairs.push(("department", department.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Pagination block attached to ticket listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

/// A page of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPage {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Filters accepted by the export endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

impl ExportFilter {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(department) = &self.department {
            pairs.push(("department", department.clone()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.to_string()));
        }
        pairs
    }
}

/// Sort direction for advanced search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters for `POST /tickets/search/advanced`.
///
/// Unset and empty filters are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvancedSearch {
    pub text: Option<String>,
    /// Fields the text is matched against (`title`, `description`, ...).
    pub search_in: Vec<String>,
    /// `createdAt` or `updatedAt`.
    pub date_field: Option<String>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
    pub statuses: Vec<TicketStatus>,
    pub priorities: Vec<Priority>,
    pub departments: Vec<String>,
    pub assigned_to: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_company: Option<String>,
    pub sla_status: Option<SlaStatus>,
    pub has_attachments: Option<bool>,
    /// `web`, `email`, `api` or `phone`.
    pub source: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl AdvancedSearch {
    fn to_body(&self) -> serde_json::Map<String, serde_json::Value> {
        use serde_json::Value;

        type Body = serde_json::Map<String, Value>;

        fn text(body: &mut Body, key: &str, value: Option<&String>) {
            if let Some(value) = value.map(|value| value.trim()).filter(|v| !v.is_empty()) {
                body.insert(key.to_string(), Value::from(value));
            }
        }

        fn list<T: AsRef<str>>(body: &mut Body, key: &str, items: &[T]) {
            if !items.is_empty() {
                let items: Vec<Value> = items.iter().map(|i| Value::from(i.as_ref())).collect();
                body.insert(key.to_string(), Value::Array(items));
            }
        }

        let mut body: Body = Body::new();
        text(&mut body, "text", self.text.as_ref());
        list(&mut body, "searchIn", &self.search_in);
        text(&mut body, "dateField", self.date_field.as_ref());
        if let Some(from) = self.date_from {
            body.insert(String::from("dateFrom"), Value::from(from.to_string()));
        }
        if let Some(to) = self.date_to {
            body.insert(String::from("dateTo"), Value::from(to.to_string()));
        }
        let statuses: Vec<&str> = self.statuses.iter().map(TicketStatus::as_str).collect();
        list(&mut body, "statuses", &statuses);
        let priorities: Vec<&str> = self.priorities.iter().map(Priority::as_str).collect();
        list(&mut body, "priorities", &priorities);
        list(&mut body, "departments", &self.departments);
        text(&mut body, "assignedTo", self.assigned_to.as_ref());
        text(&mut body, "clientName", self.client_name.as_ref());
        text(&mut body, "clientEmail", self.client_email.as_ref());
        text(&mut body, "clientCompany", self.client_company.as_ref());
        if let Some(sla) = self.sla_status {
            let wire: &str = match sla {
                SlaStatus::Within => "ok",
                SlaStatus::AtRisk | SlaStatus::Breached => sla.as_str(),
            };
            body.insert(String::from("slaStatus"), Value::from(wire));
        }
        if let Some(has_attachments) = self.has_attachments {
            body.insert(String::from("hasAttachments"), Value::Bool(has_attachments));
        }
        text(&mut body, "source", self.source.as_ref());
        text(&mut body, "sortBy", self.sort_by.as_ref());
        if let Some(order) = self.sort_order {
            body.insert(String::from("sortOrder"), Value::from(order.as_str()));
        }
        if let Some(page) = self.page {
            body.insert(String::from("page"), Value::from(page));
        }
        if let Some(limit) = self.limit {
            body.insert(String::from("limit"), Value::from(limit));
        }
        body
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

/// Created tickets come back either bare or wrapped in `ticket`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TicketEnvelope {
    Wrapped { ticket: Ticket },
    Bare(Ticket),
}

impl TicketEnvelope {
    fn into_ticket(self) -> Ticket {
        match self {
            Self::Wrapped { ticket } | Self::Bare(ticket) => ticket,
        }
    }
}

/// Category listings come back either bare or wrapped in `categories`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryList {
    Wrapped { categories: Vec<Category> },
    Bare(Vec<Category>),
}

impl CategoryList {
    fn into_categories(self) -> Vec<Category> {
        match self {
            Self::Wrapped { categories } | Self::Bare(categories) => categories,
        }
    }
}

/// Template listings come back either bare or wrapped in `templates`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateList {
    Wrapped { templates: Vec<ResponseTemplate> },
    Bare(Vec<ResponseTemplate>),
}

/// Single templates come back either bare or wrapped in `template`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateEnvelope {
    Wrapped { template: ResponseTemplate },
    Bare(ResponseTemplate),
}

impl TemplateEnvelope {
    fn into_template(self) -> ResponseTemplate {
        match self {
            Self::Wrapped { template } | Self::Bare(template) => template,
        }
    }
}

#[derive(Serialize)]
struct TemplateUse<'a> {
    variables: &'a TemplateVariables,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessedTemplate {
    processed_content: String,
}

/// Client for the help desk REST backend.
///
/// Every failure is returned as a normalized [`ApiError`]. Requests are
/// never retried.
#[derive(Debug, Clone)]
pub struct HelpdeskClient {
    http: reqwest::Client,
    base_url: String,
}

impl HelpdeskClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::from_transport(&err))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<(u16, Vec<u8>), ApiError> {
        let url: String = format!("{}{path}", self.base_url);
        debug!(method = %method, path, "Sending request");

        let mut request: reqwest::RequestBuilder = self.http.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response: reqwest::Response = request.send().await.map_err(|err| {
            warn!(method = %method, path, error = %err, "Request failed before a response");
            ApiError::from_transport(&err)
        })?;

        let status: u16 = response.status().as_u16();
        let success: bool = response.status().is_success();
        let bytes: Vec<u8> = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_transport(&err))?
            .to_vec();

        if success {
            Ok((status, bytes))
        } else {
            let err: ApiError = ApiError::from_response(status, &bytes, path == LOGIN_PATH);
            warn!(
                method = %method,
                path,
                status,
                kind = ?err.kind,
                "Backend returned an error"
            );
            Err(err)
        }
    }

    async fn fetch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let (status, bytes): (u16, Vec<u8>) =
            self.execute(method, path, token, query, body).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(path, error = %err, "Could not decode response body");
            ApiError::decode(status, &err.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        self.fetch(Method::GET, path, Some(session.token()), query, None::<&()>)
            .await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute(method, path, Some(session.token()), &[], Some(body))
            .await
            .map(|_| ())
    }

    async fn send_empty(
        &self,
        session: &Session,
        method: Method,
        path: &str,
    ) -> Result<(), ApiError> {
        self.execute(method, path, Some(session.token()), &[], None::<&()>)
            .await
            .map(|_| ())
    }

    // ========== AUTH ==========

    /// Authenticates and opens a session.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if the backend refuses the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let credentials: Credentials<'_> = Credentials {
            email: email.trim(),
            password,
        };
        let response: LoginResponse = self
            .fetch(Method::POST, LOGIN_PATH, None, &[], Some(&credentials))
            .await?;
        debug!(user = %response.user.email, role = response.user.role.as_str(), "Logged in");
        Ok(Session::new(response.token, response.user))
    }

    /// Rebuilds a session from a previously issued token.
    ///
    /// # Errors
    ///
    /// Returns `SessionExpired` if the token is no longer accepted.
    pub async fn resume(&self, token: &str) -> Result<Session, ApiError> {
        let response: MeResponse = self
            .fetch(Method::GET, "/auth/me", Some(token), &[], None::<&()>)
            .await?;
        Ok(Session::new(token.to_string(), response.into_user()))
    }

    /// Fetches the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn me(&self, session: &Session) -> Result<UserAccount, ApiError> {
        let response: MeResponse = self.get(session, "/auth/me", &[]).await?;
        Ok(response.into_user())
    }

    /// Changes the authenticated user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the change.
    pub async fn change_password(
        &self,
        session: &Session,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body: PasswordChange<'_> = PasswordChange {
            old_password,
            new_password,
        };
        self.send(session, Method::POST, "/auth/change-password", &body)
            .await
    }

    // ========== TICKETS ==========

    /// Lists tickets visible to the session's user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn tickets(
        &self,
        session: &Session,
        query: &TicketQuery,
    ) -> Result<TicketPage, ApiError> {
        self.get(session, "/tickets", &query.to_pairs()).await
    }

    /// Fetches one ticket.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ticket does not exist.
    pub async fn ticket(&self, session: &Session, id: &str) -> Result<Ticket, ApiError> {
        let envelope: TicketEnvelope = self.get(session, &format!("/tickets/{id}"), &[]).await?;
        Ok(envelope.into_ticket())
    }

    /// Searches every ticket by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_global(
        &self,
        session: &Session,
        text: &str,
        page: u32,
        limit: u32,
    ) -> Result<TicketPage, ApiError> {
        let query: [(&'static str, String); 3] = [
            ("q", text.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        self.get(session, "/tickets/search/global", &query).await
    }

    /// Creates a ticket from the console.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the ticket.
    pub async fn create_ticket(
        &self,
        session: &Session,
        request: &NewTicketRequest,
    ) -> Result<Ticket, ApiError> {
        let envelope: TicketEnvelope = self
            .fetch(
                Method::POST,
                "/tickets",
                Some(session.token()),
                &[],
                Some(request),
            )
            .await?;
        Ok(envelope.into_ticket())
    }

    /// Opens an uncategorized ticket through the external intake endpoint.
    ///
    /// This endpoint takes no session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the ticket.
    pub async fn create_external_ticket(
        &self,
        request: &ExternalTicketRequest,
    ) -> Result<Ticket, ApiError> {
        let envelope: TicketEnvelope = self
            .fetch(Method::POST, "/external/tickets", None, &[], Some(request))
            .await?;
        Ok(envelope.into_ticket())
    }

    /// Searches tickets with structured filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_advanced(
        &self,
        session: &Session,
        search: &AdvancedSearch,
    ) -> Result<TicketPage, ApiError> {
        self.fetch(
            Method::POST,
            "/tickets/search/advanced",
            Some(session.token()),
            &[],
            Some(&search.to_body()),
        )
        .await
    }

    /// Rewrites a ticket's title or description.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn edit_ticket(
        &self,
        session: &Session,
        id: &str,
        request: &EditRequest,
    ) -> Result<(), ApiError> {
        self.send(session, Method::PATCH, &format!("/tickets/{id}"), request)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the backend refuses the deletion.
    pub async fn delete_ticket(&self, session: &Session, id: &str) -> Result<(), ApiError> {
        self.send_empty(session, Method::DELETE, &format!("/tickets/{id}"))
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the backend refuses the transition.
    pub async fn change_status(
        &self,
        session: &Session,
        id: &str,
        request: &StatusChangeRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::PATCH,
            &format!("/tickets/{id}/status"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the backend refuses the assignment.
    pub async fn assign(
        &self,
        session: &Session,
        id: &str,
        request: &AssignRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::PATCH,
            &format!("/tickets/{id}/assign"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn change_priority(
        &self,
        session: &Session,
        id: &str,
        request: &PriorityRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::PATCH,
            &format!("/tickets/{id}/priority"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categorize(
        &self,
        session: &Session,
        id: &str,
        request: &CategorizeRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::PATCH,
            &format!("/tickets/{id}/categorize"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn transfer_department(
        &self,
        session: &Session,
        id: &str,
        request: &TransferRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::PATCH,
            &format!("/tickets/{id}/transfer-department"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_comment(
        &self,
        session: &Session,
        id: &str,
        request: &CommentRequest,
    ) -> Result<(), ApiError> {
        self.send(
            session,
            Method::POST,
            &format!("/tickets/{id}/comments"),
            request,
        )
        .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn comments(&self, session: &Session, id: &str) -> Result<Vec<Comment>, ApiError> {
        self.get(session, &format!("/tickets/{id}/comments"), &[])
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn history(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Vec<HistoryEntry>, ApiError> {
        self.get(session, &format!("/tickets/{id}/history"), &[])
            .await
    }

    /// Downloads a ticket export as raw file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn export(
        &self,
        session: &Session,
        format: ExportFormat,
        filter: &ExportFilter,
    ) -> Result<Vec<u8>, ApiError> {
        let path: String = format!("/tickets/export/{}", format.as_str());
        let (_, bytes): (u16, Vec<u8>) = self
            .execute(
                Method::GET,
                &path,
                Some(session.token()),
                &filter.to_pairs(),
                None::<&()>,
            )
            .await?;
        Ok(bytes)
    }

    // ========== QUEUES ==========

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn queues(&self, session: &Session) -> Result<Vec<QueueSummary>, ApiError> {
        self.get(session, "/queues", &[]).await
    }

    /// Fetches a queue's tickets and counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn queue_tickets(
        &self,
        session: &Session,
        queue: &str,
    ) -> Result<QueueTickets, ApiError> {
        self.get(session, &format!("/queues/{queue}/tickets"), &[])
            .await
    }

    // ========== CATALOG ==========

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories(&self, session: &Session) -> Result<Vec<Category>, ApiError> {
        let list: CategoryList = self.get(session, "/categories", &[]).await?;
        Ok(list.into_categories())
    }

    /// Categories the backend allows for manual ticket creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn categories_for_creation(
        &self,
        session: &Session,
    ) -> Result<Vec<Category>, ApiError> {
        let query: [(&'static str, String); 1] = [("forCreation", String::from("true"))];
        let list: CategoryList = self.get(session, "/categories", &query).await?;
        Ok(list.into_categories())
    }

    /// Active departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn departments(&self, session: &Session) -> Result<Vec<Department>, ApiError> {
        self.get(session, "/departments", &[]).await
    }

    /// Every department, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn all_departments(&self, session: &Session) -> Result<Vec<Department>, ApiError> {
        self.get(session, "/departments/all", &[]).await
    }

    /// # Errors
    ///
    /// Returns `Forbidden` unless the session belongs to a master.
    pub async fn users(&self, session: &Session) -> Result<Vec<UserAccount>, ApiError> {
        self.get(session, "/admin/users", &[]).await
    }

    /// Active operators and masters, the users a ticket can be assigned to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn operators(&self, session: &Session) -> Result<Vec<UserAccount>, ApiError> {
        let users: Vec<UserAccount> = self.users(session).await?;
        Ok(assignable_operators(&users).into_iter().cloned().collect())
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub async fn user(&self, session: &Session, id: &str) -> Result<UserAccount, ApiError> {
        let response: MeResponse = self
            .get(session, &format!("/admin/users/{id}"), &[])
            .await?;
        Ok(response.into_user())
    }

    // ========== TEMPLATES ==========

    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn templates(&self, session: &Session) -> Result<Vec<ResponseTemplate>, ApiError> {
        let list: TemplateList = self.get(session, "/templates", &[]).await?;
        Ok(match list {
            TemplateList::Wrapped { templates } | TemplateList::Bare(templates) => templates,
        })
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the template does not exist.
    pub async fn template(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<ResponseTemplate, ApiError> {
        let envelope: TemplateEnvelope = self
            .get(session, &format!("/templates/{id}"), &[])
            .await?;
        Ok(envelope.into_template())
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no template has this shortcut.
    pub async fn template_by_shortcut(
        &self,
        session: &Session,
        shortcut: &str,
    ) -> Result<ResponseTemplate, ApiError> {
        let envelope: TemplateEnvelope = self
            .get(session, &format!("/templates/shortcut/{shortcut}"), &[])
            .await?;
        Ok(envelope.into_template())
    }

    /// Fills a template's placeholders and returns the resulting text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn use_template(
        &self,
        session: &Session,
        id: &str,
        variables: &TemplateVariables,
    ) -> Result<String, ApiError> {
        let processed: ProcessedTemplate = self
            .fetch(
                Method::POST,
                &format!("/templates/{id}/use"),
                Some(session.token()),
                &[],
                Some(&TemplateUse { variables }),
            )
            .await?;
        Ok(processed.processed_content)
    }

    // ========== ADMINISTRATION ==========

    /// Sends an administrative change that passed its guard.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it refuses the change.
    pub async fn administer(
        &self,
        session: &Session,
        prepared: &PreparedAdmin,
    ) -> Result<(), ApiError> {
        match prepared.command() {
            AdminCommand::CreateUser(draft) => {
                self.send(session, Method::POST, "/admin/users", draft).await
            }
            AdminCommand::UpdateUser { id, changes } => {
                self.send(session, Method::PATCH, &format!("/admin/users/{id}"), changes)
                    .await
            }
            AdminCommand::ToggleUserActive { id } => {
                self.send_empty(
                    session,
                    Method::PATCH,
                    &format!("/admin/users/{id}/toggle-active"),
                )
                .await
            }
            AdminCommand::ResetPassword { id, new_password } => {
                let body: PasswordResetRequest = PasswordResetRequest {
                    new_password: new_password.clone(),
                };
                self.send(
                    session,
                    Method::POST,
                    &format!("/admin/users/{id}/reset-password"),
                    &body,
                )
                .await
            }
            AdminCommand::DeleteUser { id } => {
                self.send_empty(session, Method::DELETE, &format!("/admin/users/{id}"))
                    .await
            }
            AdminCommand::CreateCategory(draft) => {
                self.send(session, Method::POST, "/categories", draft).await
            }
            AdminCommand::UpdateCategory { id, draft } => {
                self.send(session, Method::PATCH, &format!("/categories/{id}"), draft)
                    .await
            }
            AdminCommand::DeleteCategory { id } => {
                self.send_empty(session, Method::DELETE, &format!("/categories/{id}"))
                    .await
            }
            AdminCommand::CreateQueue(draft) => {
                self.send(session, Method::POST, "/queues", draft).await
            }
            AdminCommand::UpdateQueue { id, draft } => {
                self.send(session, Method::PATCH, &format!("/queues/{id}"), draft)
                    .await
            }
            AdminCommand::DeleteQueue { id } => {
                self.send_empty(session, Method::DELETE, &format!("/queues/{id}"))
                    .await
            }
            AdminCommand::CreateDepartment(draft) => {
                self.send(session, Method::POST, "/departments", draft).await
            }
            AdminCommand::UpdateDepartment { id, draft } => {
                self.send(session, Method::PATCH, &format!("/departments/{id}"), draft)
                    .await
            }
            AdminCommand::SetDepartmentActive { id, active } => {
                let body: ActivationRequest = ActivationRequest { is_active: *active };
                self.send(session, Method::PATCH, &format!("/departments/{id}"), &body)
                    .await
            }
            AdminCommand::DeleteDepartment { id } => {
                self.send_empty(session, Method::DELETE, &format!("/departments/{id}"))
                    .await
            }
            AdminCommand::ReorderDepartments { order } => {
                let body: ReorderRequest = ReorderRequest {
                    order: order.clone(),
                };
                self.send(session, Method::PATCH, "/departments/reorder", &body)
                    .await
            }
            AdminCommand::CreateTemplate(draft) => {
                self.send(session, Method::POST, "/templates", draft).await
            }
            AdminCommand::UpdateTemplate { id, draft } => {
                self.send(session, Method::PATCH, &format!("/templates/{id}"), draft)
                    .await
            }
            AdminCommand::DeleteTemplate { id } => {
                self.send_empty(session, Method::DELETE, &format!("/templates/{id}"))
                    .await
            }
        }
    }

    /// Dashboard counters, passed through as returned by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn dashboard_stats(&self, session: &Session) -> Result<serde_json::Value, ApiError> {
        self.get(session, "/stats/dashboard", &[]).await
    }
}

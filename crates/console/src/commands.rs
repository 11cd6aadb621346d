// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand handlers.

use crate::error::ConsoleError;
use crate::render;
use helpdesk::{
    AdminCommand, Command, QueueView, authorize, authorize_queue, prepare_external_ticket,
};
use helpdesk_api::{
    AdvancedSearch, ApiError, ExportFilter, ExportFormat, HelpdeskClient, Session, TicketPage,
    TicketQuery, TicketWorkflow,
};
use helpdesk_domain::{
    ClientInfo, NewTicketDraft, Permission, QueueSummary, QueueTickets, ResponseTemplate,
    SlaPolicy, TemplateVariables, Ticket, TicketFilter, default_queue,
};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Everything a subcommand needs.
pub struct Context {
    pub client: Arc<HelpdeskClient>,
    pub token: Option<String>,
    pub policy: SlaPolicy,
}

impl Context {
    /// Rebuilds the session from the configured token.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` without a token, or the backend's error if the
    /// token is refused.
    pub async fn session(&self) -> Result<Session, ConsoleError> {
        let token: &str = self.token.as_deref().ok_or(ConsoleError::NotLoggedIn)?;
        let session: Session = self.client.resume(token).await?;
        debug!(user = %session.user().email, "Session resumed");
        Ok(session)
    }

    /// Refuses the command locally when the session's role lacks `permission`.
    ///
    /// # Errors
    ///
    /// Returns a `Rejected` error naming the missing permission.
    pub fn authorize(
        session: &Session,
        permission: Permission,
        action: &str,
    ) -> Result<(), ConsoleError> {
        authorize(session.role(), permission, action).map_err(ApiError::from)?;
        Ok(())
    }

    fn workflow(&self) -> TicketWorkflow<HelpdeskClient> {
        TicketWorkflow::new(Arc::clone(&self.client))
    }

    /// Resolves an explicit queue name or falls back to the default queue.
    ///
    /// # Errors
    ///
    /// Returns `NoQueue` if the backend lists no queues.
    pub async fn queue_name(
        &self,
        session: &Session,
        requested: Option<String>,
    ) -> Result<String, ConsoleError> {
        if let Some(queue) = requested {
            return Ok(queue);
        }
        let queues: Vec<QueueSummary> = self.client.queues(session).await?;
        default_queue(&queues)
            .map(|queue| queue.name.clone())
            .ok_or(ConsoleError::NoQueue)
    }
}

/// Ticket fields collected from the command line.
pub struct TicketInput {
    pub title: String,
    pub description: String,
    pub client: ClientInfo,
    pub category_id: Option<String>,
    /// Open through the intake endpoint, without category or session.
    pub external: bool,
}

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), ConsoleError> {
    let session: Session = ctx.client.login(email, password).await?;
    info!(user = %session.user().email, "Logged in");
    eprintln!(
        "Bem-vindo, {} ({}). Exporte o token abaixo em HELPDESK_TOKEN.",
        session.user().name(),
        session.role().label()
    );
    println!("{}", session.token());
    Ok(())
}

pub async fn me(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    println!("{}", render::user_line(session.user()));
    Ok(())
}

pub async fn change_password(
    ctx: &Context,
    current: &str,
    new_password: &str,
) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    ctx.client
        .change_password(&session, current, new_password)
        .await?;
    println!("Senha alterada.");
    Ok(())
}

pub async fn queues(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let queues: Vec<QueueSummary> = ctx.client.queues(&session).await?;
    print!("{}", render::queue_list(&queues));
    Ok(())
}

pub async fn list(
    ctx: &Context,
    queue: Option<String>,
    filter: &TicketFilter,
) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let queue: String = ctx.queue_name(&session, queue).await?;
    authorize_queue(session.role(), &queue).map_err(ApiError::from)?;

    let mut view: QueueView = QueueView::new(&queue);
    let seq = view.begin_fetch();
    let snapshot: QueueTickets = ctx.client.queue_tickets(&session, &queue).await?;
    view.apply(seq, snapshot);

    let visible: Vec<&Ticket> = view.visible(filter);
    print!(
        "{}",
        render::queue_screen(
            &queue,
            &visible,
            view.stats(),
            &ctx.policy,
            OffsetDateTime::now_utc()
        )
    );
    Ok(())
}

pub async fn search(ctx: &Context, text: &str, page: u32, limit: u32) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    Context::authorize(&session, Permission::ViewAllTickets, "search")?;
    let results: TicketPage = ctx
        .client
        .search_global(&session, text, page, limit)
        .await?;
    print!(
        "{}",
        render::ticket_page(&results, &ctx.policy, OffsetDateTime::now_utc())
    );
    Ok(())
}

pub async fn search_advanced(ctx: &Context, search: &AdvancedSearch) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    Context::authorize(&session, Permission::ViewAllTickets, "advanced_search")?;
    let results: TicketPage = ctx.client.search_advanced(&session, search).await?;
    print!(
        "{}",
        render::ticket_page(&results, &ctx.policy, OffsetDateTime::now_utc())
    );
    Ok(())
}

pub async fn tickets(ctx: &Context, query: &TicketQuery) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    Context::authorize(&session, Permission::ViewAllTickets, "tickets")?;
    let page: TicketPage = ctx.client.tickets(&session, query).await?;
    print!(
        "{}",
        render::ticket_page(&page, &ctx.policy, OffsetDateTime::now_utc())
    );
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let (ticket, comments, history) = futures::try_join!(
        ctx.client.ticket(&session, id),
        ctx.client.comments(&session, id),
        ctx.client.history(&session, id),
    )?;
    print!(
        "{}",
        render::ticket_detail(
            &ticket,
            &comments,
            &history,
            &ctx.policy,
            OffsetDateTime::now_utc()
        )
    );
    Ok(())
}

pub async fn create(ctx: &Context, input: TicketInput) -> Result<(), ConsoleError> {
    let draft: NewTicketDraft = NewTicketDraft {
        title: input.title,
        description: input.description,
        client: input.client,
        category_id: input.category_id,
    };

    let ticket: Ticket = if input.external {
        let request = prepare_external_ticket(&draft).map_err(ApiError::from)?;
        ctx.client.create_external_ticket(&request).await?
    } else {
        let session: Session = ctx.session().await?;
        ctx.workflow().create(&session, &draft).await?
    };

    println!(
        "Ticket #{} criado ({}, prioridade {}).",
        ticket.ticket_number,
        ticket.status.label(),
        ticket.priority.label()
    );
    Ok(())
}

/// Fetches the ticket, runs `command` through the guard and the backend,
/// and prints the ticket as it now stands.
pub async fn apply(ctx: &Context, id: &str, command: Command) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let ticket: Ticket = ctx.client.ticket(&session, id).await?;
    let updated: Ticket = ctx.workflow().execute(&session, &ticket, command).await?;
    println!(
        "{}",
        render::ticket_line(&updated, &ctx.policy, OffsetDateTime::now_utc())
    );
    Ok(())
}

pub async fn delete(ctx: &Context, id: &str) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let ticket: Ticket = ctx.client.ticket(&session, id).await?;
    ctx.workflow().delete(&session, &ticket).await?;
    println!("Ticket #{} excluído.", ticket.ticket_number);
    Ok(())
}

/// Which template a reply uses.
pub enum TemplatePick {
    Id(String),
    Shortcut(String),
}

/// Answers ticket `id` with a template filled for its client.
pub async fn reply(
    ctx: &Context,
    id: &str,
    pick: TemplatePick,
    internal: bool,
) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let ticket: Ticket = ctx.client.ticket(&session, id).await?;
    let template: ResponseTemplate = match pick {
        TemplatePick::Id(template_id) => ctx.client.template(&session, &template_id).await?,
        TemplatePick::Shortcut(shortcut) => {
            let shortcut: &str = shortcut.trim_start_matches('/');
            ctx.client.template_by_shortcut(&session, shortcut).await?
        }
    };

    let variables: TemplateVariables = TemplateVariables::for_ticket(&ticket, session.user());
    let text: String = ctx
        .client
        .use_template(&session, &template.id, &variables)
        .await?;
    debug!(ticket = ticket.ticket_number, template = %template.id, "Template filled");

    let updated: Ticket = ctx
        .workflow()
        .execute(&session, &ticket, Command::AddComment { text, internal })
        .await?;
    println!(
        "{}",
        render::ticket_line(&updated, &ctx.policy, OffsetDateTime::now_utc())
    );
    Ok(())
}

pub async fn templates(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    for template in ctx
        .client
        .templates(&session)
        .await?
        .iter()
        .filter(|template| template.is_active)
    {
        println!("{}", render::template_line(template));
    }
    Ok(())
}

/// Runs a user or catalog change through its guard and the backend.
pub async fn administer(ctx: &Context, command: AdminCommand) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let action: &'static str = command.name();
    ctx.workflow().administer(&session, command).await?;
    println!("{}", render::admin_done(action));
    Ok(())
}

pub async fn users(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    for user in ctx.client.users(&session).await? {
        println!("{}", render::user_line(&user));
    }
    Ok(())
}

pub async fn operators(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    for user in ctx.client.operators(&session).await? {
        println!("{}", render::user_line(&user));
    }
    Ok(())
}

pub async fn categories(ctx: &Context, for_creation: bool) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let categories = if for_creation {
        ctx.client.categories_for_creation(&session).await?
    } else {
        ctx.client.categories(&session).await?
    };
    for category in &categories {
        println!("{}", render::category_line(category));
    }
    Ok(())
}

pub async fn departments(ctx: &Context, include_inactive: bool) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    let departments = if include_inactive {
        Context::authorize(&session, Permission::ManageSettings, "all_departments")?;
        ctx.client.all_departments(&session).await?
    } else {
        ctx.client.departments(&session).await?
    };
    for department in &departments {
        println!("{}", render::department_line(department));
    }
    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    Context::authorize(&session, Permission::ViewReports, "stats")?;
    let stats: serde_json::Value = ctx.client.dashboard_stats(&session).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string())
    );
    Ok(())
}

/// Default export file name: `tickets-YYYY-MM-DD.<format>`.
pub fn export_file_name(format: ExportFormat, today: time::Date) -> String {
    format!("tickets-{today}.{}", format.as_str())
}

pub async fn export(
    ctx: &Context,
    format: ExportFormat,
    filter: &ExportFilter,
    output: Option<String>,
) -> Result<(), ConsoleError> {
    let session: Session = ctx.session().await?;
    Context::authorize(&session, Permission::ViewReports, "export")?;
    let bytes: Vec<u8> = ctx.client.export(&session, format, filter).await?;
    let path: String =
        output.unwrap_or_else(|| export_file_name(format, OffsetDateTime::now_utc().date()));

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ConsoleError::Io {
            path: path.clone(),
            source,
        })?;
    info!(path = %path, bytes = bytes.len(), "Export written");
    println!("Exportação concluída: {path}");
    Ok(())
}

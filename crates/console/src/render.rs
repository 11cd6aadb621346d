// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of backend data for the terminal.

use helpdesk_api::{ApiError, SESSION_EXPIRED_NOTICE, TicketPage};
use helpdesk_domain::{
    Category, Comment, Department, HistoryEntry, QueueGroup, QueueStats, QueueSummary,
    ResponseTemplate, SlaPolicy, SlaStatus, Ticket, TicketStatus, UserAccount,
    format_optional_remaining, group_queues,
};
use std::fmt::Write;
use time::OffsetDateTime;
use time::macros::format_description;

const TITLE_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// `dd/mm/yyyy hh:mm`, the way dates are shown to operators.
pub fn timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!("[day]/[month]/[year] [hour]:[minute]"))
        .unwrap_or_else(|_| at.to_string())
}

fn pending_deadline(ticket: &Ticket) -> Option<OffsetDateTime> {
    [&ticket.sla.first_response, &ticket.sla.resolution]
        .into_iter()
        .find(|target| !target.is_completed() && target.deadline.is_some())
        .and_then(|target| target.deadline)
}

/// Short SLA indicator for list rows.
///
/// Finished tickets report whether the SLA held. Waiting tickets within
/// their deadline show as paused.
pub fn sla_badge(ticket: &Ticket, policy: &SlaPolicy, now: OffsetDateTime) -> String {
    match ticket.status {
        TicketStatus::Resolved | TicketStatus::Closed => {
            if ticket.sla.first_response.deadline.is_none() {
                String::from("-")
            } else if ticket.sla.any_breached() {
                String::from("SLA Estourado")
            } else {
                String::from("SLA OK")
            }
        }
        TicketStatus::Cancelled => String::from("-"),
        status => {
            let countdown: String = format_optional_remaining(pending_deadline(ticket), now);
            match ticket.sla_overview(policy, now) {
                None => countdown,
                Some(SlaStatus::Breached) => SlaStatus::Breached.label().to_string(),
                Some(SlaStatus::AtRisk) => format!("{} ({countdown})", SlaStatus::AtRisk.label()),
                Some(SlaStatus::Within)
                    if matches!(
                        status,
                        TicketStatus::WaitingClient | TicketStatus::WaitingThirdParty
                    ) =>
                {
                    String::from("Pausado")
                }
                Some(SlaStatus::Within) => countdown,
            }
        }
    }
}

fn assignee_name(ticket: &Ticket) -> &str {
    match &ticket.assigned_to {
        Some(operator) if !ticket.is_unassigned() => operator.name(),
        _ => "Não atribuído",
    }
}

/// One list row.
pub fn ticket_line(ticket: &Ticket, policy: &SlaPolicy, now: OffsetDateTime) -> String {
    let assignee: &str = assignee_name(ticket);
    format!(
        "#{:<6} {:<8} {:<19} {:<width$} {:<20} {}",
        ticket.ticket_number,
        ticket.priority.label(),
        ticket.status.label(),
        truncate(&ticket.title, TITLE_WIDTH),
        truncate(assignee, 20),
        sla_badge(ticket, policy, now),
        width = TITLE_WIDTH,
    )
}

fn stats_line(stats: &QueueStats) -> String {
    format!(
        "total {} | críticos {} | SLA estourado {} | em risco {}",
        stats.total, stats.critical, stats.sla_breached, stats.sla_at_risk
    )
}

/// A queue's header followed by its rows.
pub fn queue_screen(
    queue: &str,
    tickets: &[&Ticket],
    stats: Option<&QueueStats>,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> String {
    let mut out: String = format!("Fila: {queue}");
    if let Some(stats) = stats {
        let _ = write!(out, " ({})", stats_line(stats));
    }
    out.push('\n');

    if tickets.is_empty() {
        out.push_str("Nenhum ticket nesta fila.\n");
        return out;
    }
    for ticket in tickets {
        out.push_str(&ticket_line(ticket, policy, now));
        out.push('\n');
    }
    out
}

const fn group_label(group: QueueGroup) -> &'static str {
    match group {
        QueueGroup::Personal => "Pessoal",
        QueueGroup::Active => "Em atendimento",
        QueueGroup::All => "Todos",
        QueueGroup::Finished => "Finalizados",
        QueueGroup::Admin => "Administração",
    }
}

/// Queues grouped by section.
pub fn queue_list(queues: &[QueueSummary]) -> String {
    let mut out: String = String::new();
    for (group, members) in group_queues(queues) {
        let _ = writeln!(out, "{}", group_label(group));
        for queue in members {
            let _ = writeln!(out, "  {:<24} {:>5}  ({})", queue.title(), queue.count, queue.name);
        }
    }
    out
}

/// Search or listing results with pagination, when present.
pub fn ticket_page(page: &TicketPage, policy: &SlaPolicy, now: OffsetDateTime) -> String {
    let mut out: String = String::new();
    for ticket in &page.tickets {
        out.push_str(&ticket_line(ticket, policy, now));
        out.push('\n');
    }
    match page.pagination {
        Some(pagination) => {
            let _ = writeln!(
                out,
                "{} resultado(s), página {} de {}",
                pagination.total,
                pagination.page,
                pagination.pages.max(1)
            );
        }
        None => {
            let _ = writeln!(out, "{} resultado(s)", page.tickets.len());
        }
    }
    out
}

/// Full ticket view with comments and history.
pub fn ticket_detail(
    ticket: &Ticket,
    comments: &[Comment],
    history: &[HistoryEntry],
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> String {
    let mut out: String = String::new();
    let _ = writeln!(out, "#{} {}", ticket.ticket_number, ticket.title);
    let _ = writeln!(
        out,
        "Status: {} | Prioridade: {} | SLA: {}",
        ticket.status.label(),
        ticket.priority.label(),
        sla_badge(ticket, policy, now)
    );
    let category: String = ticket
        .category
        .as_ref()
        .map_or_else(|| String::from("Não Categorizado"), |category| category.path());
    let _ = writeln!(out, "Categoria: {category}");
    let _ = writeln!(
        out,
        "Responsável: {}",
        assignee_name(ticket)
    );
    let _ = writeln!(out, "Solicitante: {} <{}>", ticket.client.name, ticket.client.email);
    let _ = writeln!(out, "Aberto em: {}", timestamp(ticket.created_at));
    let _ = writeln!(
        out,
        "Primeira resposta: {} | Resolução: {}",
        format_optional_remaining(ticket.sla.first_response.deadline, now),
        format_optional_remaining(ticket.sla.resolution.deadline, now)
    );
    let _ = writeln!(out, "\n{}", ticket.description);

    if !comments.is_empty() {
        let _ = writeln!(out, "\nComentários");
        for comment in comments {
            let author: &str = comment
                .created_by
                .as_ref()
                .and_then(|user| user.name())
                .unwrap_or("Sistema");
            let marker: &str = if comment.is_internal { " [interno]" } else { "" };
            let _ = writeln!(
                out,
                "  {} {author}{marker}: {}",
                timestamp(comment.created_at),
                comment.text
            );
        }
    }

    if !history.is_empty() {
        let _ = writeln!(out, "\nHistórico");
        for entry in history {
            let detail: &str = entry.description.as_deref().unwrap_or(&entry.action);
            let _ = writeln!(
                out,
                "  {} {}: {detail}",
                timestamp(entry.timestamp),
                entry.author()
            );
        }
    }
    out
}

pub fn user_line(user: &UserAccount) -> String {
    format!(
        "{:<24} {:<32} {:<9} {}",
        user.name(),
        user.email,
        user.role.label(),
        if user.is_active { "ativo" } else { "inativo" }
    )
}

pub fn category_line(category: &Category) -> String {
    format!(
        "{:<24} {:<48} {:<8} {}h / {}h",
        category.id,
        category.to_ref().path(),
        category.default_priority.label(),
        category.sla.first_response_hours,
        category.sla.resolution_hours
    )
}

pub fn department_line(department: &Department) -> String {
    let line: String = format!("{:<24} {}", department.id, department.title());
    if department.is_active {
        line
    } else {
        format!("{line} (inativo)")
    }
}

pub fn template_line(template: &ResponseTemplate) -> String {
    format!(
        "{:<24} {:<14} {:<10} {} ({} usos)",
        template.id,
        template.category.label(),
        template.shortcut.as_deref().unwrap_or("-"),
        template.title(),
        template.usage_count
    )
}

/// Confirmation printed after an administrative change.
pub fn admin_done(action: &str) -> String {
    let label: &str = match action {
        "create_user" => "Usuário criado",
        "update_user" => "Usuário atualizado",
        "toggle_user_active" => "Status do usuário alterado",
        "reset_password" => "Senha redefinida",
        "delete_user" => "Usuário excluído",
        "create_category" => "Categoria criada",
        "update_category" => "Categoria atualizada",
        "delete_category" => "Categoria excluída",
        "create_queue" => "Fila criada",
        "update_queue" => "Fila atualizada",
        "delete_queue" => "Fila excluída",
        "create_department" => "Departamento criado",
        "update_department" | "set_department_active" => "Departamento atualizado",
        "delete_department" => "Departamento desativado",
        "reorder_departments" => "Ordem dos departamentos atualizada",
        "create_template" => "Template criado",
        "update_template" => "Template atualizado",
        "delete_template" => "Template desativado",
        _ => "Alteração aplicada",
    };
    format!("{label}.")
}

/// What the user sees when a command fails.
pub fn error_report(err: &ApiError) -> String {
    let mut out: String = err.message.clone();
    for detail in &err.errors {
        let _ = write!(out, "\n  - {detail}");
    }
    if err.is_session_expired() {
        let _ = write!(out, "\n{SESSION_EXPIRED_NOTICE}");
    }
    out
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-side guards.
//!
//! Nothing here mutates a ticket. A guard either refuses the command or
//! yields the request body to send; the ticket is only replaced once the
//! backend answers.

use crate::actor::Actor;
use crate::command::Command;
use crate::error::CoreError;
use crate::request::{
    AssignRequest, CategorizeRequest, CommentRequest, EditRequest, ExternalTicketRequest,
    NewTicketRequest, PreparedRequest, PriorityRequest, StatusChangeRequest, TransferRequest,
};
use helpdesk_domain::{
    Category, DomainError, FieldError, MAX_TITLE_LENGTH, MY_QUEUE, NewTicketDraft, Permission,
    Role, Ticket, TicketStatus, UNCATEGORIZED_QUEUE, has_permission, validate_justification,
    validate_new_ticket, validate_reason,
};

/// Refuses `action` unless `role` grants `permission`.
///
/// # Errors
///
/// Returns `CoreError::PermissionDenied` naming the missing permission.
pub fn authorize(role: Role, permission: Permission, action: &str) -> Result<(), CoreError> {
    if has_permission(role, permission) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied {
            action: action.to_string(),
            role,
            required: permission,
        })
    }
}

/// Like [`authorize`], but `own` suffices when the actor opened `ticket`.
fn authorize_on_ticket(
    actor: &Actor<'_>,
    ticket: &Ticket,
    any: Permission,
    own: Option<Permission>,
    action: &str,
) -> Result<(), CoreError> {
    let owner_allowed: bool =
        own.is_some_and(|own| has_permission(actor.role, own) && actor.owns(ticket));
    if owner_allowed {
        Ok(())
    } else {
        authorize(actor.role, any, action)
    }
}

/// Refuses to show a queue the role may not browse.
///
/// Everyone sees `my-queue`; `uncategorized` needs the triage permission
/// and every other queue needs [`Permission::ViewAllQueues`].
///
/// # Errors
///
/// Returns `CoreError::PermissionDenied` for a queue outside the role's reach.
pub fn authorize_queue(role: Role, queue: &str) -> Result<(), CoreError> {
    match queue {
        MY_QUEUE => Ok(()),
        UNCATEGORIZED_QUEUE => authorize(role, Permission::ViewUncategorized, "view_queue"),
        _ => authorize(role, Permission::ViewAllQueues, "view_queue"),
    }
}

fn require_non_empty(field: &str, value: &str, message: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::ValidationFailed {
            errors: vec![FieldError::new(field, message)],
        })
    } else {
        Ok(())
    }
}

fn refuse_finalized(ticket: &Ticket, action: &str) -> Result<(), DomainError> {
    if ticket.status.is_finalized() {
        Err(DomainError::TicketFinalized {
            action: action.to_string(),
            status: ticket.status,
        })
    } else {
        Ok(())
    }
}

fn validate_edit(title: Option<&str>, description: Option<&str>) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    if title.is_none() && description.is_none() {
        errors.push(FieldError::new("ticket", "Nenhuma alteração informada"));
    }
    if let Some(title) = title {
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "Título não pode estar vazio"));
        } else if title.trim().chars().count() > MAX_TITLE_LENGTH {
            errors.push(FieldError::new(
                "title",
                "Título não pode ter mais de 200 caracteres",
            ));
        }
    }
    if description.is_some_and(|description| description.trim().is_empty()) {
        errors.push(FieldError::new(
            "description",
            "Descrição não pode estar vazia",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationFailed { errors })
    }
}

/// Checks `command` against `ticket` and the acting user.
///
/// # Arguments
///
/// * `ticket` - The ticket as last fetched (immutable)
/// * `command` - The requested action
/// * `actor` - The authenticated user, or just a role when the user id is
///   unknown
///
/// # Returns
///
/// * `Ok(PreparedRequest)` with the trimmed request body
/// * `Err(CoreError)` if the command must not be sent
///
/// # Errors
///
/// Returns an error if:
/// - The role lacks the command's permission
/// - A status change is a self-transition or is not in the transition table
/// - A required justification is missing or too short
/// - A referenced id is blank
/// - An edit or comment targets a resolved, closed or cancelled ticket
/// - An edit changes nothing or blanks the title
pub fn prepare<'a>(
    ticket: &Ticket,
    command: Command,
    actor: impl Into<Actor<'a>>,
) -> Result<PreparedRequest, CoreError> {
    let actor: Actor<'a> = actor.into();
    if let Some(permission) = command.required_permission() {
        authorize_on_ticket(
            &actor,
            ticket,
            permission,
            command.own_permission(),
            command.name(),
        )?;
    }

    match command {
        Command::ChangeStatus {
            target,
            description,
        } => {
            ticket.status.validate_transition(target)?;
            validate_justification(target, &description)?;
            Ok(PreparedRequest::ChangeStatus(StatusChangeRequest {
                status: target,
                description: description.trim().to_string(),
            }))
        }
        Command::Assign {
            user_id,
            description,
        } => {
            require_non_empty("assignToUserId", &user_id, "Selecione um operador")?;
            validate_reason("assignment", &description)?;
            Ok(PreparedRequest::Assign(AssignRequest {
                assign_to_user_id: user_id,
                description: description.trim().to_string(),
            }))
        }
        Command::TransferDepartment {
            department_id,
            reason,
        } => {
            require_non_empty("departmentId", &department_id, "Selecione um departamento")?;
            validate_reason("department transfer", &reason)?;
            Ok(PreparedRequest::TransferDepartment(TransferRequest {
                department_id,
                reason: reason.trim().to_string(),
            }))
        }
        Command::AddComment { text, internal } => {
            refuse_finalized(ticket, "comment on")?;
            validate_reason("comment", &text)?;
            Ok(PreparedRequest::AddComment(CommentRequest {
                text: text.trim().to_string(),
                is_internal: internal,
            }))
        }
        Command::ChangePriority { priority } => {
            Ok(PreparedRequest::ChangePriority(PriorityRequest { priority }))
        }
        Command::Categorize { category_id } => {
            if ticket.status != TicketStatus::Uncategorized {
                return Err(DomainError::InvalidStatusTransition {
                    from: ticket.status,
                    to: TicketStatus::Open,
                    reason: "only uncategorized tickets can be categorized".to_string(),
                }
                .into());
            }
            require_non_empty("categoryId", &category_id, "Categoria é obrigatória")?;
            Ok(PreparedRequest::Categorize(CategorizeRequest { category_id }))
        }
        Command::Edit { title, description } => {
            refuse_finalized(ticket, "edit")?;
            validate_edit(title.as_deref(), description.as_deref())?;
            Ok(PreparedRequest::Edit(EditRequest {
                title: title.map(|title| title.trim().to_string()),
                description: description.map(|description| description.trim().to_string()),
            }))
        }
    }
}

/// Checks that the acting user may delete `ticket`.
///
/// Holders of [`Permission::DeleteAnyTicket`] may delete any ticket; holders
/// of [`Permission::DeleteOwnTicket`] only tickets they opened.
///
/// # Errors
///
/// Returns `CoreError::PermissionDenied` otherwise.
pub fn prepare_delete<'a>(
    ticket: &Ticket,
    actor: impl Into<Actor<'a>>,
) -> Result<(), CoreError> {
    authorize_on_ticket(
        &actor.into(),
        ticket,
        Permission::DeleteAnyTicket,
        Some(Permission::DeleteOwnTicket),
        "delete",
    )
}

/// Builds the creation request for a ticket opened from the console.
///
/// Console tickets start `aberto` and inherit the selected category's
/// default priority.
///
/// # Errors
///
/// Returns an error if:
/// - The role may not create tickets
/// - The draft fails validation
/// - The selected category is unknown or unavailable to `role`
pub fn prepare_new_ticket(
    draft: &NewTicketDraft,
    categories: &[Category],
    role: Role,
) -> Result<NewTicketRequest, CoreError> {
    authorize(role, Permission::CreateTicket, "create_ticket")?;
    validate_new_ticket(draft)?;

    let category_id: &str = draft.category_id.as_deref().unwrap_or_default().trim();
    let category: &Category = categories
        .iter()
        .find(|category| category.id == category_id && category.available_for_creation(role))
        .ok_or_else(|| DomainError::CategoryUnavailable {
            category_id: category_id.to_string(),
        })?;

    Ok(NewTicketRequest {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        client: draft.client.clone(),
        category_id: category.id.clone(),
        priority: category.default_priority,
        status: TicketStatus::Open,
    })
}

/// Builds the intake request for a ticket that arrives without a category.
///
/// Intake tickets start `nao-categorizado`; the backend assigns priority
/// and SLA when a master categorizes them.
///
/// # Errors
///
/// Returns an error if the draft fails validation on any field other than
/// the category.
pub fn prepare_external_ticket(draft: &NewTicketDraft) -> Result<ExternalTicketRequest, CoreError> {
    if let Err(DomainError::ValidationFailed { errors }) = validate_new_ticket(draft) {
        let errors: Vec<FieldError> = errors
            .into_iter()
            .filter(|error| error.field != "categoryId")
            .collect();
        if !errors.is_empty() {
            return Err(DomainError::ValidationFailed { errors }.into());
        }
    }

    Ok(ExternalTicketRequest {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        client: draft.client.clone(),
        status: TicketStatus::Uncategorized,
    })
}

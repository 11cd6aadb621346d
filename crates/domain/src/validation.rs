// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, FieldError};
use crate::status::{MIN_DETAILED_JUSTIFICATION, TicketStatus};
use crate::ticket::ClientInfo;

/// Maximum title length accepted by the backend.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Ticket data entered in the console before a category is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicketDraft {
    pub title: String,
    pub description: String,
    pub client: ClientInfo,
    pub category_id: Option<String>,
}

/// Returns true if `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index + 1 < domain.len())
}

/// Validates a new ticket draft, collecting every field error.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing all problems found.
pub fn validate_new_ticket(draft: &NewTicketDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Título é obrigatório"));
    } else if draft.title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(FieldError::new(
            "title",
            "Título não pode ter mais de 200 caracteres",
        ));
    }

    if draft.description.trim().is_empty() {
        errors.push(FieldError::new("description", "Descrição é obrigatória"));
    }

    if draft.client.name.trim().is_empty() {
        errors.push(FieldError::new(
            "client.name",
            "Nome do solicitante é obrigatório",
        ));
    }

    let email: &str = draft.client.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(
            "client.email",
            "Email do solicitante é obrigatório",
        ));
    } else if !is_plausible_email(email) {
        errors.push(FieldError::new("client.email", "Email inválido"));
    }

    if draft
        .category_id
        .as_deref()
        .is_none_or(|id| id.trim().is_empty())
    {
        errors.push(FieldError::new("categoryId", "Categoria é obrigatória"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationFailed { errors })
    }
}

/// Validates the free-text justification accompanying a status change.
///
/// Every transition needs a non-blank justification. Moving into a status
/// that closes, parks or starts work needs at least
/// [`MIN_DETAILED_JUSTIFICATION`] characters.
///
/// # Errors
///
/// Returns `DomainError::MissingJustification` or
/// `DomainError::JustificationTooShort`.
pub fn validate_justification(target: TicketStatus, text: &str) -> Result<(), DomainError> {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingJustification {
            action: format!("status change to {target}"),
        });
    }

    let length: usize = trimmed.chars().count();
    if target.requires_detailed_justification() && length < MIN_DETAILED_JUSTIFICATION {
        return Err(DomainError::JustificationTooShort {
            target,
            minimum: MIN_DETAILED_JUSTIFICATION,
            actual: length,
        });
    }

    Ok(())
}

/// Validates a non-blank reason for `action` (assignment, transfer, comment).
///
/// # Errors
///
/// Returns `DomainError::MissingJustification` if `text` is blank.
pub fn validate_reason(action: &str, text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        Err(DomainError::MissingJustification {
            action: action.to_string(),
        })
    } else {
        Ok(())
    }
}

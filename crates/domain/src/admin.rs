// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drafts entered on the administration screens and their field rules.
//!
//! Each draft doubles as the request body: it serializes with the field
//! names the backend expects. Validation collects every field error, like
//! [`crate::validate_new_ticket`].

use crate::catalog::SlaHours;
use crate::error::{DomainError, FieldError};
use crate::role::Role;
use crate::template::TemplateCategory;
use crate::validation::is_plausible_email;
use serde::{Deserialize, Serialize};

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Smallest first-response target a category may carry, in hours.
pub const MIN_FIRST_RESPONSE_HOURS: f64 = 0.5;

/// Smallest resolution target a category may carry, in hours.
pub const MIN_RESOLUTION_HOURS: f64 = 1.0;

pub const DEFAULT_DEPARTMENT_COLOR: &str = "#3b82f6";
pub const DEFAULT_DEPARTMENT_ICON: &str = "bx-buildings";

fn collect(errors: Vec<FieldError>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationFailed { errors })
    }
}

fn check_required(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

fn check_email(errors: &mut Vec<FieldError>, field: &str, email: &str, required: bool) {
    let email: &str = email.trim();
    if email.is_empty() {
        if required {
            errors.push(FieldError::new(field, "Email é obrigatório"));
        }
    } else if !is_plausible_email(email) {
        errors.push(FieldError::new(field, "Email inválido"));
    }
}

fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Validates a password set by a master or by the user.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`].
pub fn validate_password(field: &str, password: &str) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_password(&mut errors, field, password);
    collect(errors)
}

fn check_password(errors: &mut Vec<FieldError>, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            field,
            "Senha deve ter pelo menos 6 caracteres",
        ));
    }
}

/// A console user to be created by a master.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub department_id: Option<String>,
}

impl UserDraft {
    /// Copy with surrounding whitespace removed and blank optionals dropped.
    /// The password is kept as typed.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            display_name: self.display_name.trim().to_string(),
            name: trimmed(self.name.as_ref()),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
            department_id: trimmed(self.department_id.as_ref()),
        }
    }
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("department_id", &self.department_id)
            .finish_non_exhaustive()
    }
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing all problems found.
pub fn validate_user_draft(draft: &UserDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(
        &mut errors,
        "displayName",
        &draft.display_name,
        "Nome de exibição é obrigatório",
    );
    check_email(&mut errors, "email", &draft.email, true);
    check_password(&mut errors, "password", &draft.password);
    collect(errors)
}

/// Profile fields a master may change on an existing user.
///
/// Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

impl UserChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.department_id.is_none()
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            display_name: self.display_name.as_ref().map(|v| v.trim().to_string()),
            name: self.name.as_ref().map(|v| v.trim().to_string()),
            email: self.email.as_ref().map(|v| v.trim().to_string()),
            role: self.role,
            department_id: self.department_id.as_ref().map(|v| v.trim().to_string()),
        }
    }
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` if nothing changes, the display
/// name is set blank, or the email is malformed.
pub fn validate_user_changes(changes: &UserChanges) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    if changes.is_empty() {
        errors.push(FieldError::new("user", "Nenhuma alteração informada"));
    }
    if let Some(display_name) = &changes.display_name {
        check_required(
            &mut errors,
            "displayName",
            display_name,
            "Nome de exibição é obrigatório",
        );
    }
    if let Some(email) = &changes.email {
        check_email(&mut errors, "email", email, true);
    }
    collect(errors)
}

/// A category as edited on the catalog screen.
///
/// Sent whole on both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub department: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sla: SlaHours,
    #[serde(default)]
    pub is_master_only: bool,
    #[serde(default = "crate::catalog::default_true")]
    pub allow_manual_creation: bool,
    #[serde(default = "crate::catalog::default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible_team: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

impl CategoryDraft {
    /// A new active category with the default SLA.
    #[must_use]
    pub fn new(department: &str, kind: &str, system: &str) -> Self {
        Self {
            department: department.to_string(),
            kind: kind.to_string(),
            system: system.to_string(),
            description: None,
            sla: SlaHours::default(),
            is_master_only: false,
            allow_manual_creation: true,
            is_active: true,
            responsible_team: None,
            display_order: 0,
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            department: self.department.trim().to_string(),
            kind: self.kind.trim().to_string(),
            system: self.system.trim().to_string(),
            description: trimmed(self.description.as_ref()),
            responsible_team: trimmed(self.responsible_team.as_ref()),
            ..self.clone()
        }
    }
}

fn below(value: f64, minimum: f64) -> bool {
    value.is_nan() || value < minimum
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing all problems found.
pub fn validate_category_draft(draft: &CategoryDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(
        &mut errors,
        "department",
        &draft.department,
        "Departamento é obrigatório",
    );
    check_required(&mut errors, "type", &draft.kind, "Tipo é obrigatório");
    check_required(&mut errors, "system", &draft.system, "Sistema é obrigatório");
    if below(draft.sla.first_response_hours, MIN_FIRST_RESPONSE_HOURS) {
        errors.push(FieldError::new(
            "sla.firstResponseHours",
            "Primeira resposta deve ser de pelo menos 0,5 hora",
        ));
    }
    if below(draft.sla.resolution_hours, MIN_RESOLUTION_HOURS) {
        errors.push(FieldError::new(
            "sla.resolutionHours",
            "Resolução deve ser de pelo menos 1 hora",
        ));
    }
    collect(errors)
}

/// A department as edited on the departments screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDraft {
    /// Internal code, stored upper-case (e.g. `SUPORTE`).
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl DepartmentDraft {
    #[must_use]
    pub fn new(name: &str, display_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: None,
            color: DEFAULT_DEPARTMENT_COLOR.to_string(),
            icon: DEFAULT_DEPARTMENT_ICON.to_string(),
            email: None,
        }
    }

    /// Trims every field and upper-cases the code.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_uppercase(),
            display_name: self.display_name.trim().to_string(),
            description: trimmed(self.description.as_ref()),
            color: self.color.trim().to_string(),
            icon: self.icon.trim().to_string(),
            email: trimmed(self.email.as_ref()),
        }
    }
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing all problems found.
pub fn validate_department_draft(draft: &DepartmentDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(&mut errors, "name", &draft.name, "Código é obrigatório");
    check_required(
        &mut errors,
        "displayName",
        &draft.display_name,
        "Nome de exibição é obrigatório",
    );
    if let Some(email) = &draft.email {
        check_email(&mut errors, "email", email, false);
    }
    collect(errors)
}

/// A custom queue definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl QueueDraft {
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            display_name: trimmed(self.display_name.as_ref()),
            description: trimmed(self.description.as_ref()),
            icon: trimmed(self.icon.as_ref()),
        }
    }
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` if the queue has no name.
pub fn validate_queue_draft(draft: &QueueDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(&mut errors, "name", &draft.name, "Nome da fila é obrigatório");
    collect(errors)
}

/// A response template as edited on the templates screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub name: String,
    pub short_title: String,
    pub content: String,
    #[serde(default)]
    pub category: TemplateCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl TemplateDraft {
    /// Trims the single-line fields. Content keeps its inner layout.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            short_title: self.short_title.trim().to_string(),
            content: self.content.trim().to_string(),
            category: self.category,
            shortcut: trimmed(self.shortcut.as_ref()),
            department: trimmed(self.department.as_ref()),
        }
    }
}

/// # Errors
///
/// Returns `DomainError::ValidationFailed` naming each blank required field.
pub fn validate_template_draft(draft: &TemplateDraft) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(&mut errors, "name", &draft.name, "Nome é obrigatório");
    check_required(
        &mut errors,
        "shortTitle",
        &draft.short_title,
        "Título curto é obrigatório",
    );
    check_required(&mut errors, "content", &draft.content, "Conteúdo é obrigatório");
    collect(errors)
}

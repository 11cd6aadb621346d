// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Guards for user and catalog administration.
//!
//! Same contract as [`crate::prepare`]: a command is checked against the
//! acting role and its drafts are validated and normalized before anything
//! is sent. Only a [`PreparedAdmin`] can reach the backend.

use crate::apply::authorize;
use crate::error::CoreError;
use helpdesk_domain::{
    CategoryDraft, DepartmentDraft, DomainError, FieldError, Permission, QueueDraft, Role,
    TemplateDraft, UserChanges, UserDraft, validate_category_draft, validate_department_draft,
    validate_password, validate_queue_draft, validate_template_draft, validate_user_changes,
    validate_user_draft,
};
use serde::{Deserialize, Serialize};

/// An administrative change, as data only.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    CreateUser(UserDraft),
    UpdateUser { id: String, changes: UserChanges },
    ToggleUserActive { id: String },
    ResetPassword { id: String, new_password: String },
    DeleteUser { id: String },
    CreateCategory(CategoryDraft),
    UpdateCategory { id: String, draft: CategoryDraft },
    DeleteCategory { id: String },
    CreateQueue(QueueDraft),
    UpdateQueue { id: String, draft: QueueDraft },
    DeleteQueue { id: String },
    CreateDepartment(DepartmentDraft),
    UpdateDepartment { id: String, draft: DepartmentDraft },
    SetDepartmentActive { id: String, active: bool },
    /// The backend deactivates rather than erases departments.
    DeleteDepartment { id: String },
    /// Department ids in their new display order.
    ReorderDepartments { order: Vec<String> },
    CreateTemplate(TemplateDraft),
    UpdateTemplate { id: String, draft: TemplateDraft },
    /// The backend deactivates rather than erases templates.
    DeleteTemplate { id: String },
}

impl AdminCommand {
    /// Short name used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateUser(_) => "create_user",
            Self::UpdateUser { .. } => "update_user",
            Self::ToggleUserActive { .. } => "toggle_user_active",
            Self::ResetPassword { .. } => "reset_password",
            Self::DeleteUser { .. } => "delete_user",
            Self::CreateCategory(_) => "create_category",
            Self::UpdateCategory { .. } => "update_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::CreateQueue(_) => "create_queue",
            Self::UpdateQueue { .. } => "update_queue",
            Self::DeleteQueue { .. } => "delete_queue",
            Self::CreateDepartment(_) => "create_department",
            Self::UpdateDepartment { .. } => "update_department",
            Self::SetDepartmentActive { .. } => "set_department_active",
            Self::DeleteDepartment { .. } => "delete_department",
            Self::ReorderDepartments { .. } => "reorder_departments",
            Self::CreateTemplate(_) => "create_template",
            Self::UpdateTemplate { .. } => "update_template",
            Self::DeleteTemplate { .. } => "delete_template",
        }
    }

    /// Permission the acting role must hold.
    #[must_use]
    pub const fn required_permission(&self) -> Permission {
        match self {
            Self::CreateUser(_) => Permission::CreateUser,
            Self::UpdateUser { .. } | Self::ToggleUserActive { .. } | Self::ResetPassword { .. } => {
                Permission::EditUser
            }
            Self::DeleteUser { .. } => Permission::DeleteUser,
            Self::CreateCategory(_) => Permission::CreateCategory,
            Self::UpdateCategory { .. } => Permission::EditCategory,
            Self::DeleteCategory { .. } => Permission::DeleteCategory,
            Self::CreateQueue(_) => Permission::CreateQueue,
            Self::UpdateQueue { .. } => Permission::EditQueue,
            Self::DeleteQueue { .. } => Permission::DeleteQueue,
            Self::CreateDepartment(_)
            | Self::UpdateDepartment { .. }
            | Self::SetDepartmentActive { .. }
            | Self::DeleteDepartment { .. }
            | Self::ReorderDepartments { .. }
            | Self::CreateTemplate(_)
            | Self::UpdateTemplate { .. }
            | Self::DeleteTemplate { .. } => Permission::ManageSettings,
        }
    }

    /// Id of the record the command targets, if it targets one.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::UpdateUser { id, .. }
            | Self::ToggleUserActive { id }
            | Self::ResetPassword { id, .. }
            | Self::DeleteUser { id }
            | Self::UpdateCategory { id, .. }
            | Self::DeleteCategory { id }
            | Self::UpdateQueue { id, .. }
            | Self::DeleteQueue { id }
            | Self::UpdateDepartment { id, .. }
            | Self::SetDepartmentActive { id, .. }
            | Self::DeleteDepartment { id }
            | Self::UpdateTemplate { id, .. }
            | Self::DeleteTemplate { id } => Some(id.as_str()),
            Self::CreateUser(_)
            | Self::CreateCategory(_)
            | Self::CreateQueue(_)
            | Self::CreateDepartment(_)
            | Self::ReorderDepartments { .. }
            | Self::CreateTemplate(_) => None,
        }
    }
}

/// An administrative command that passed its guard.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAdmin(AdminCommand);

impl PreparedAdmin {
    #[must_use]
    pub const fn command(&self) -> &AdminCommand {
        &self.0
    }
}

/// Body of `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub new_password: String,
}

/// Body of `PATCH /departments/{id}` when only the active flag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRequest {
    pub is_active: bool,
}

/// Body of `PATCH /departments/reorder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<String>,
}

fn validate_order(order: &[String]) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    if order.is_empty() {
        errors.push(FieldError::new("order", "Informe a nova ordem"));
    }
    if order.iter().any(|id| id.trim().is_empty()) {
        errors.push(FieldError::new("order", "Departamento inválido na ordem"));
    }
    let duplicated: bool = order
        .iter()
        .enumerate()
        .any(|(index, id)| order[..index].contains(id));
    if duplicated {
        errors.push(FieldError::new("order", "Departamento repetido na ordem"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::ValidationFailed { errors })
    }
}

/// Checks `command` against the acting `role` and validates its payload.
///
/// # Errors
///
/// Returns an error if:
/// - The role lacks the command's permission
/// - The targeted id is blank
/// - A draft fails validation (every field error is reported)
/// - A reset password is shorter than six characters
/// - A department order is empty or repeats an id
pub fn prepare_admin(command: AdminCommand, role: Role) -> Result<PreparedAdmin, CoreError> {
    authorize(role, command.required_permission(), command.name())?;

    if command.target_id().is_some_and(|id| id.trim().is_empty()) {
        return Err(DomainError::ValidationFailed {
            errors: vec![FieldError::new("id", "Identificador é obrigatório")],
        }
        .into());
    }

    let command: AdminCommand = match command {
        AdminCommand::CreateUser(draft) => {
            validate_user_draft(&draft)?;
            AdminCommand::CreateUser(draft.normalized())
        }
        AdminCommand::UpdateUser { id, changes } => {
            validate_user_changes(&changes)?;
            AdminCommand::UpdateUser {
                id,
                changes: changes.normalized(),
            }
        }
        AdminCommand::ResetPassword { id, new_password } => {
            validate_password("newPassword", &new_password)?;
            AdminCommand::ResetPassword { id, new_password }
        }
        AdminCommand::CreateCategory(draft) => {
            validate_category_draft(&draft)?;
            AdminCommand::CreateCategory(draft.normalized())
        }
        AdminCommand::UpdateCategory { id, draft } => {
            validate_category_draft(&draft)?;
            AdminCommand::UpdateCategory {
                id,
                draft: draft.normalized(),
            }
        }
        AdminCommand::CreateQueue(draft) => {
            validate_queue_draft(&draft)?;
            AdminCommand::CreateQueue(draft.normalized())
        }
        AdminCommand::UpdateQueue { id, draft } => {
            validate_queue_draft(&draft)?;
            AdminCommand::UpdateQueue {
                id,
                draft: draft.normalized(),
            }
        }
        AdminCommand::CreateDepartment(draft) => {
            validate_department_draft(&draft)?;
            AdminCommand::CreateDepartment(draft.normalized())
        }
        AdminCommand::UpdateDepartment { id, draft } => {
            validate_department_draft(&draft)?;
            AdminCommand::UpdateDepartment {
                id,
                draft: draft.normalized(),
            }
        }
        AdminCommand::ReorderDepartments { order } => {
            validate_order(&order)?;
            AdminCommand::ReorderDepartments { order }
        }
        AdminCommand::CreateTemplate(draft) => {
            validate_template_draft(&draft)?;
            AdminCommand::CreateTemplate(draft.normalized())
        }
        AdminCommand::UpdateTemplate { id, draft } => {
            validate_template_draft(&draft)?;
            AdminCommand::UpdateTemplate {
                id,
                draft: draft.normalized(),
            }
        }
        other @ (AdminCommand::ToggleUserActive { .. }
        | AdminCommand::DeleteUser { .. }
        | AdminCommand::DeleteCategory { .. }
        | AdminCommand::DeleteQueue { .. }
        | AdminCommand::SetDepartmentActive { .. }
        | AdminCommand::DeleteDepartment { .. }
        | AdminCommand::DeleteTemplate { .. }) => other,
    };

    Ok(PreparedAdmin(command))
}

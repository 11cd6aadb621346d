// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line shapes of the user and catalog administration commands.

use clap::{Args as ClapArgs, Subcommand};
use helpdesk::AdminCommand;
use helpdesk_domain::{
    CategoryDraft, DEFAULT_DEPARTMENT_COLOR, DEFAULT_DEPARTMENT_ICON, DepartmentDraft, QueueDraft,
    Role, SlaHours, TemplateCategory, TemplateDraft, UserChanges, UserDraft,
};

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user
    Create {
        #[arg(long)]
        display_name: String,
        /// Full name, when different from the display name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HELPDESK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        department: Option<String>,
    },
    /// Change a user's profile or role
    Update {
        id: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Activate or deactivate a user
    Toggle { id: String },
    /// Set a new password for a user
    ResetPassword {
        id: String,
        #[arg(long, env = "HELPDESK_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Delete a user
    Delete { id: String },
}

impl From<UserCommand> for AdminCommand {
    fn from(command: UserCommand) -> Self {
        match command {
            UserCommand::Create {
                display_name,
                name,
                email,
                password,
                role,
                department,
            } => Self::CreateUser(UserDraft {
                display_name,
                name,
                email,
                password,
                role,
                department_id: department,
            }),
            UserCommand::Update {
                id,
                display_name,
                name,
                email,
                role,
                department,
            } => Self::UpdateUser {
                id,
                changes: UserChanges {
                    display_name,
                    name,
                    email,
                    role,
                    department_id: department,
                },
            },
            UserCommand::Toggle { id } => Self::ToggleUserActive { id },
            UserCommand::ResetPassword { id, password } => Self::ResetPassword {
                id,
                new_password: password,
            },
            UserCommand::Delete { id } => Self::DeleteUser { id },
        }
    }
}

/// Category fields shared by create and update.
#[derive(ClapArgs, Debug)]
pub struct CategoryFields {
    #[arg(long)]
    department: String,
    /// Service type, the middle level of the category path
    #[arg(long = "type")]
    kind: String,
    #[arg(long)]
    system: String,
    #[arg(long)]
    description: Option<String>,
    /// Hours until the first response is due
    #[arg(long, default_value_t = 4.0)]
    first_response_hours: f64,
    /// Hours until the resolution is due
    #[arg(long, default_value_t = 24.0)]
    resolution_hours: f64,
    /// Only masters may open tickets in this category
    #[arg(long)]
    master_only: bool,
    /// Hide the category from manual ticket creation
    #[arg(long)]
    no_manual_creation: bool,
    #[arg(long)]
    inactive: bool,
    #[arg(long)]
    team: Option<String>,
    #[arg(long, default_value_t = 0)]
    order: i32,
}

impl CategoryFields {
    fn into_draft(self) -> CategoryDraft {
        CategoryDraft {
            description: self.description,
            sla: SlaHours {
                first_response_hours: self.first_response_hours,
                resolution_hours: self.resolution_hours,
            },
            is_master_only: self.master_only,
            allow_manual_creation: !self.no_manual_creation,
            is_active: !self.inactive,
            responsible_team: self.team,
            display_order: self.order,
            ..CategoryDraft::new(&self.department, &self.kind, &self.system)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Replace a category's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category
    Delete { id: String },
}

impl From<CategoryCommand> for AdminCommand {
    fn from(command: CategoryCommand) -> Self {
        match command {
            CategoryCommand::Create { fields } => Self::CreateCategory(fields.into_draft()),
            CategoryCommand::Update { id, fields } => Self::UpdateCategory {
                id,
                draft: fields.into_draft(),
            },
            CategoryCommand::Delete { id } => Self::DeleteCategory { id },
        }
    }
}

/// Queue fields shared by create and update.
#[derive(ClapArgs, Debug)]
pub struct QueueFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    display_name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    icon: Option<String>,
}

impl From<QueueFields> for QueueDraft {
    fn from(fields: QueueFields) -> Self {
        Self {
            name: fields.name,
            display_name: fields.display_name,
            description: fields.description,
            icon: fields.icon,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum QueueCommand {
    /// Create a queue
    Create {
        #[command(flatten)]
        fields: QueueFields,
    },
    /// Replace a queue's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: QueueFields,
    },
    /// Delete a queue
    Delete { id: String },
}

impl From<QueueCommand> for AdminCommand {
    fn from(command: QueueCommand) -> Self {
        match command {
            QueueCommand::Create { fields } => Self::CreateQueue(fields.into()),
            QueueCommand::Update { id, fields } => Self::UpdateQueue {
                id,
                draft: fields.into(),
            },
            QueueCommand::Delete { id } => Self::DeleteQueue { id },
        }
    }
}

/// Department fields shared by create and update.
#[derive(ClapArgs, Debug)]
pub struct DepartmentFields {
    /// Short code, stored upper-cased
    #[arg(long)]
    code: String,
    #[arg(long)]
    display_name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value = DEFAULT_DEPARTMENT_COLOR)]
    color: String,
    #[arg(long, default_value = DEFAULT_DEPARTMENT_ICON)]
    icon: String,
    /// Mailbox that receives the department's tickets
    #[arg(long)]
    email: Option<String>,
}

impl From<DepartmentFields> for DepartmentDraft {
    fn from(fields: DepartmentFields) -> Self {
        Self {
            description: fields.description,
            color: fields.color,
            icon: fields.icon,
            email: fields.email,
            ..Self::new(&fields.code, &fields.display_name)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DepartmentCommand {
    /// Create a department
    Create {
        #[command(flatten)]
        fields: DepartmentFields,
    },
    /// Replace a department's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: DepartmentFields,
    },
    /// Reactivate a department
    Activate { id: String },
    /// Deactivate a department
    Deactivate { id: String },
    /// Deactivate a department through the delete route
    Delete { id: String },
    /// Set the display order, first to last
    Reorder {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

impl From<DepartmentCommand> for AdminCommand {
    fn from(command: DepartmentCommand) -> Self {
        match command {
            DepartmentCommand::Create { fields } => Self::CreateDepartment(fields.into()),
            DepartmentCommand::Update { id, fields } => Self::UpdateDepartment {
                id,
                draft: fields.into(),
            },
            DepartmentCommand::Activate { id } => Self::SetDepartmentActive { id, active: true },
            DepartmentCommand::Deactivate { id } => Self::SetDepartmentActive { id, active: false },
            DepartmentCommand::Delete { id } => Self::DeleteDepartment { id },
            DepartmentCommand::Reorder { ids } => Self::ReorderDepartments { order: ids },
        }
    }
}

/// Template fields shared by create and update.
#[derive(ClapArgs, Debug)]
pub struct TemplateFields {
    #[arg(long)]
    name: String,
    /// Label shown in the picker
    #[arg(long)]
    short_title: String,
    /// Body; `{{cliente}}`, `{{ticket}}` and `{{operador}}` are filled on use
    #[arg(long)]
    content: String,
    #[arg(long, default_value_t = TemplateCategory::Outros)]
    category: TemplateCategory,
    #[arg(long)]
    shortcut: Option<String>,
    #[arg(long)]
    department: Option<String>,
}

impl From<TemplateFields> for TemplateDraft {
    fn from(fields: TemplateFields) -> Self {
        Self {
            name: fields.name,
            short_title: fields.short_title,
            content: fields.content,
            category: fields.category,
            shortcut: fields.shortcut,
            department: fields.department,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create a response template
    Create {
        #[command(flatten)]
        fields: TemplateFields,
    },
    /// Replace a template's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: TemplateFields,
    },
    /// Deactivate a template
    Delete { id: String },
}

impl From<TemplateCommand> for AdminCommand {
    fn from(command: TemplateCommand) -> Self {
        match command {
            TemplateCommand::Create { fields } => Self::CreateTemplate(fields.into()),
            TemplateCommand::Update { id, fields } => Self::UpdateTemplate {
                id,
                draft: fields.into(),
            },
            TemplateCommand::Delete { id } => Self::DeleteTemplate { id },
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Categories, departments and user accounts.

use crate::priority::Priority;
use crate::role::Role;
use crate::ticket::CategoryRef;
use serde::{Deserialize, Serialize};

const fn default_first_response_hours() -> f64 {
    4.0
}

const fn default_resolution_hours() -> f64 {
    24.0
}

pub(crate) const fn default_true() -> bool {
    true
}

/// SLA hours configured on a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaHours {
    #[serde(default = "default_first_response_hours")]
    pub first_response_hours: f64,
    #[serde(default = "default_resolution_hours")]
    pub resolution_hours: f64,
}

impl Default for SlaHours {
    fn default() -> Self {
        Self {
            first_response_hours: default_first_response_hours(),
            resolution_hours: default_resolution_hours(),
        }
    }
}

/// A department/type/system triple with its default priority and SLA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub department: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub system: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_priority: Priority,
    #[serde(default)]
    pub sla: SlaHours,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_master_only: bool,
    #[serde(default = "default_true")]
    pub allow_manual_creation: bool,
}

impl Category {
    /// The reference stored on tickets of this category.
    #[must_use]
    pub fn to_ref(&self) -> CategoryRef {
        CategoryRef {
            category_id: Some(self.id.clone()),
            department: self.department.clone(),
            kind: self.kind.clone(),
            system: self.system.clone(),
        }
    }

    /// Returns true if `role` may open tickets in this category from the console.
    #[must_use]
    pub fn available_for_creation(&self, role: Role) -> bool {
        self.is_active && self.allow_manual_creation && (!self.is_master_only || role == Role::Master)
    }
}

/// Organizational unit used to route tickets and operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
}

impl Department {
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// A console user (agent, operator or master).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UserAccount {
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    /// Operators and masters can receive ticket assignments.
    #[must_use]
    pub fn can_receive_tickets(&self) -> bool {
        self.is_active && matches!(self.role, Role::Operator | Role::Master)
    }
}

/// Active users eligible for assignment, in input order.
#[must_use]
pub fn assignable_operators(users: &[UserAccount]) -> Vec<&UserAccount> {
    users.iter().filter(|user| user.can_receive_tickets()).collect()
}

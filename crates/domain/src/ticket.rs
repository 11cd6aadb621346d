// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket records as fetched from the backend.
//!
//! These are transient, read-mostly copies: the backend owns persistence,
//! and the console replaces its copy on every fetch.

use crate::priority::Priority;
use crate::sla::{SlaPolicy, SlaStatus, TicketSla};
use crate::status::TicketStatus;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Department marker the backend uses for tickets that still need triage.
pub const UNCATEGORIZED_DEPARTMENT: &str = "NAO-CATEGORIZADO";

/// Department/type/system classification of a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: String,
}

impl CategoryRef {
    /// Returns true for the triage placeholder department.
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.department == UNCATEGORIZED_DEPARTMENT
    }

    /// `department / type / system`, the way categories are shown in lists.
    /// Missing parts read `N/A`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.is_uncategorized() {
            return String::from("Não Categorizado");
        }
        format!(
            "{} / {} / {}",
            or_placeholder(&self.department),
            or_placeholder(&self.kind),
            or_placeholder(&self.system)
        )
    }
}

fn or_placeholder(part: &str) -> &str {
    if part.trim().is_empty() { "N/A" } else { part }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Operator a ticket is assigned to.
///
/// Unassigned tickets may still carry the object with a null or missing id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedOperator {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AssignedOperator {
    /// The operator's id, if one is set.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Display name, falling back to email and then the id.
    #[must_use]
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .or_else(|| self.id())
            .unwrap_or("-")
    }
}

/// The person who opened the ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// File attached to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFile {
    pub file_name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub mimetype: Option<String>,
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: String,
    pub ticket_number: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default, deserialize_with = "crate::priority::lenient")]
    pub priority: Priority,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub assigned_to: Option<AssignedOperator>,
    #[serde(default)]
    pub client: ClientInfo,
    /// The console user who opened the ticket. Intake tickets have none.
    #[serde(default, deserialize_with = "user_ref_or_id")]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub sla: TicketSla,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub files: Vec<TicketFile>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Ticket {
    /// Most urgent pending SLA classification, if any deadline is pending.
    #[must_use]
    pub fn sla_overview(&self, policy: &SlaPolicy, now: OffsetDateTime) -> Option<SlaStatus> {
        self.sla.overview(policy, now)
    }

    /// Returns true if the ticket has no assigned operator.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assignee_id().is_none()
    }

    /// Id of the assigned operator, if any.
    #[must_use]
    pub fn assignee_id(&self) -> Option<&str> {
        self.assigned_to.as_ref().and_then(AssignedOperator::id)
    }

    /// Returns true if `user_id` opened this ticket.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by
            .as_ref()
            .and_then(|author| author.id.as_deref())
            .is_some_and(|id| !id.is_empty() && id == user_id)
    }

    /// Department name, if categorized.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.category
            .as_ref()
            .filter(|category| !category.is_uncategorized() && !category.department.is_empty())
            .map(|category| category.department.as_str())
    }
}

/// Author reference on comments and history entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.email.as_deref())
    }
}

/// `createdBy` arrives populated or as a bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserRefOrId {
    Id(String),
    Populated(UserRef),
}

fn user_ref_or_id<'de, D>(deserializer: D) -> Result<Option<UserRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<UserRefOrId> = Option::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        UserRefOrId::Id(id) => UserRef {
            id: Some(id),
            ..UserRef::default()
        },
        UserRefOrId::Populated(user) => user,
    }))
}

/// A comment on a ticket. Internal comments are hidden from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One entry of a ticket's change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub action: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
    #[serde(default)]
    pub new_value: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub performed_by: Option<UserRef>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    /// Who performed the change; system actions have no author.
    #[must_use]
    pub fn author(&self) -> &str {
        self.performed_by
            .as_ref()
            .and_then(UserRef::name)
            .unwrap_or("Sistema")
    }
}

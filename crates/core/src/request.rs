// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request bodies produced by the workflow guard.

use helpdesk_domain::{ClientInfo, Priority, TicketStatus};
use serde::{Deserialize, Serialize};

/// Body of `PATCH /tickets/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: TicketStatus,
    pub description: String,
}

/// Body of `PATCH /tickets/{id}/assign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub assign_to_user_id: String,
    pub description: String,
}

/// Body of `PATCH /tickets/{id}/transfer-department`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub department_id: String,
    pub reason: String,
}

/// Body of `POST /tickets/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub text: String,
    pub is_internal: bool,
}

/// Body of `PATCH /tickets/{id}/priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRequest {
    pub priority: Priority,
}

/// Body of `PATCH /tickets/{id}/categorize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeRequest {
    pub category_id: String,
}

/// Body of `PATCH /tickets/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated request, ready to be sent for one ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedRequest {
    ChangeStatus(StatusChangeRequest),
    Assign(AssignRequest),
    TransferDepartment(TransferRequest),
    AddComment(CommentRequest),
    ChangePriority(PriorityRequest),
    Categorize(CategorizeRequest),
    Edit(EditRequest),
}

/// Body of `POST /tickets` (authenticated console creation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketRequest {
    pub title: String,
    pub description: String,
    pub client: ClientInfo,
    pub category_id: String,
    pub priority: Priority,
    pub status: TicketStatus,
}

/// Body of `POST /external/tickets` (intake without a category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalTicketRequest {
    pub title: String,
    pub description: String,
    pub client: ClientInfo,
    pub status: TicketStatus,
}

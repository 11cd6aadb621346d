// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canned responses operators paste into comments.
//!
//! Placeholders are substituted by the backend when a template is used;
//! the console only supplies the variable values.

use crate::catalog::UserAccount;
use crate::error::{DomainError, FieldError};
use crate::ticket::Ticket;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Client name used when the ticket carries none.
pub const DEFAULT_CLIENT_NAME: &str = "Cliente";

/// Grouping shown in the template picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Saudacao,
    Acompanhamento,
    Solicitacao,
    Resolucao,
    Encerramento,
    #[default]
    Outros,
}

impl TemplateCategory {
    pub const ALL: [Self; 6] = [
        Self::Saudacao,
        Self::Acompanhamento,
        Self::Solicitacao,
        Self::Resolucao,
        Self::Encerramento,
        Self::Outros,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Saudacao => "saudacao",
            Self::Acompanhamento => "acompanhamento",
            Self::Solicitacao => "solicitacao",
            Self::Resolucao => "resolucao",
            Self::Encerramento => "encerramento",
            Self::Outros => "outros",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Saudacao => "Saudação",
            Self::Acompanhamento => "Acompanhamento",
            Self::Solicitacao => "Solicitação",
            Self::Resolucao => "Resolução",
            Self::Encerramento => "Encerramento",
            Self::Outros => "Outros",
        }
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DomainError::ValidationFailed {
                errors: vec![FieldError::new(
                    "category",
                    &format!("Categoria de template inválida: {s}"),
                )],
            })
    }
}

/// Unknown or missing template categories land in `outros`.
fn lenient_category<'de, D>(deserializer: D) -> Result<TemplateCategory, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .and_then(|raw| raw.parse::<TemplateCategory>().ok())
        .unwrap_or_default())
}

/// A stored response template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTemplate {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: TemplateCategory,
    #[serde(default)]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "crate::catalog::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub usage_count: u64,
}

impl ResponseTemplate {
    /// Label shown in pickers: the short title, else the name.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.short_title.trim().is_empty() {
            &self.name
        } else {
            &self.short_title
        }
    }
}

/// Values substituted into a template's placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariables {
    pub cliente: String,
    pub ticket: String,
    pub operador: String,
}

impl TemplateVariables {
    /// Variables for answering `ticket` as `operator`.
    #[must_use]
    pub fn for_ticket(ticket: &Ticket, operator: &UserAccount) -> Self {
        let client: &str = ticket.client.name.trim();
        Self {
            cliente: if client.is_empty() {
                DEFAULT_CLIENT_NAME.to_string()
            } else {
                client.to_string()
            },
            ticket: ticket.ticket_number.to_string(),
            operador: operator.name().to_string(),
        }
    }
}

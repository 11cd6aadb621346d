// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Ticket priority.
///
/// Priority is set by the backend (from the category default or an explicit
/// update). The client only displays it and uses its rank for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critica,
    Alta,
    #[default]
    Media,
    Baixa,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Critica, Self::Alta, Self::Media, Self::Baixa];

    /// Sort rank: critical = 4 down to low = 1.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Critica => 4,
            Self::Alta => 3,
            Self::Media => 2,
            Self::Baixa => 1,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critica => "critica",
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Baixa => "baixa",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Critica => "Crítica",
            Self::Alta => "Alta",
            Self::Media => "Média",
            Self::Baixa => "Baixa",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| DomainError::InvalidPriority {
                priority: s.to_string(),
            })
    }
}

/// Reads a ticket priority, falling back to the default for `null` or an
/// unknown value instead of failing the whole payload.
///
/// # Errors
///
/// Only fails if the input is not valid JSON.
pub fn lenient<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|raw| raw.parse::<Priority>().ok())
        .unwrap_or_default())
}

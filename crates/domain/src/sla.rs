// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SLA urgency classification and countdown formatting.
//!
//! Deadlines and breached flags come from the backend. "At risk" is derived
//! here on every call from the current clock and is never stored.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Remaining time under which a deadline is considered at risk.
pub const DEFAULT_AT_RISK_THRESHOLD: Duration = Duration::minutes(120);

/// Urgency of a single SLA deadline.
///
/// Variants are ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    Within,
    AtRisk,
    Breached,
}

impl SlaStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Within => "within",
            Self::AtRisk => "at-risk",
            Self::Breached => "breached",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Within => "No prazo",
            Self::AtRisk => "Em risco",
            Self::Breached => "Estourado",
        }
    }
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds used to classify deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaPolicy {
    /// Deadlines closer than this are at risk.
    pub at_risk_threshold: Duration,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            at_risk_threshold: DEFAULT_AT_RISK_THRESHOLD,
        }
    }
}

impl SlaPolicy {
    /// Classifies a deadline at instant `now`.
    ///
    /// 1. `already_breached` wins regardless of the deadline.
    /// 2. A negative remaining time is breached.
    /// 3. Remaining time under the threshold is at risk.
    /// 4. Anything else is within.
    #[must_use]
    pub fn classify(
        &self,
        deadline: OffsetDateTime,
        already_breached: bool,
        now: OffsetDateTime,
    ) -> SlaStatus {
        if already_breached {
            return SlaStatus::Breached;
        }

        let remaining: Duration = deadline - now;
        if remaining.is_negative() {
            SlaStatus::Breached
        } else if remaining < self.at_risk_threshold {
            SlaStatus::AtRisk
        } else {
            SlaStatus::Within
        }
    }
}

/// Classifies a deadline with the default two-hour threshold.
#[must_use]
pub fn sla_status(
    deadline: OffsetDateTime,
    already_breached: bool,
    now: OffsetDateTime,
) -> SlaStatus {
    SlaPolicy::default().classify(deadline, already_breached, now)
}

/// Classifies a deadline against the current UTC clock.
#[must_use]
pub fn sla_status_now(deadline: OffsetDateTime, already_breached: bool) -> SlaStatus {
    sla_status(deadline, already_breached, OffsetDateTime::now_utc())
}

/// Whole hours and leftover minutes until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub expired: bool,
    pub hours: i64,
    pub minutes: i64,
}

/// Splits the time left until `deadline` into hours and minutes.
///
/// An expired deadline reports zero hours and minutes.
#[must_use]
pub fn time_remaining(deadline: OffsetDateTime, now: OffsetDateTime) -> TimeRemaining {
    let remaining: Duration = deadline - now;
    if remaining.is_negative() {
        return TimeRemaining {
            expired: true,
            hours: 0,
            minutes: 0,
        };
    }

    TimeRemaining {
        expired: false,
        hours: remaining.whole_hours(),
        minutes: remaining.whole_minutes() % 60,
    }
}

/// Compact countdown string: `Estourado`, `3d 4h`, `5h 12m` or `42m`.
#[must_use]
pub fn format_remaining(deadline: OffsetDateTime, now: OffsetDateTime) -> String {
    let left: TimeRemaining = time_remaining(deadline, now);

    if left.expired {
        String::from("Estourado")
    } else if left.hours > 24 {
        format!("{}d {}h", left.hours / 24, left.hours % 24)
    } else if left.hours > 0 {
        format!("{}h {}m", left.hours, left.minutes)
    } else {
        format!("{}m", left.minutes)
    }
}

/// Countdown for an optional deadline; a missing one reads `Sem prazo`.
#[must_use]
pub fn format_optional_remaining(deadline: Option<OffsetDateTime>, now: OffsetDateTime) -> String {
    deadline.map_or_else(
        || String::from("Sem prazo"),
        |deadline| format_remaining(deadline, now),
    )
}

/// One SLA deadline as reported by the backend.
///
/// `completed_at` is the first-response or resolution timestamp; it is set
/// once and never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaTarget {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deadline: Option<OffsetDateTime>,
    #[serde(default)]
    pub breached: bool,
    #[serde(
        default,
        alias = "respondedAt",
        alias = "resolvedAt",
        with = "time::serde::rfc3339::option"
    )]
    pub completed_at: Option<OffsetDateTime>,
}

impl SlaTarget {
    /// Returns true once the response or resolution has happened.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Classification of a pending target; `None` when completed or without deadline.
    #[must_use]
    pub fn pending_status(&self, policy: &SlaPolicy, now: OffsetDateTime) -> Option<SlaStatus> {
        if self.is_completed() {
            return None;
        }
        self.deadline
            .map(|deadline| policy.classify(deadline, self.breached, now))
    }
}

/// The two SLA deadlines carried by every categorized ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSla {
    #[serde(default)]
    pub first_response: SlaTarget,
    #[serde(default)]
    pub resolution: SlaTarget,
}

impl TicketSla {
    /// The most urgent classification among pending targets.
    #[must_use]
    pub fn overview(&self, policy: &SlaPolicy, now: OffsetDateTime) -> Option<SlaStatus> {
        [&self.first_response, &self.resolution]
            .into_iter()
            .filter_map(|target| target.pending_status(policy, now))
            .max()
    }

    /// Returns true if either deadline is flagged as breached.
    #[must_use]
    pub const fn any_breached(&self) -> bool {
        self.first_response.breached || self.resolution.breached
    }
}

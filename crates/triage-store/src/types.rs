//! Ticket types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use triage_core::{Priority, PriorityVerdict};

use crate::errors::StoreError;

/// Workflow status of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    /// Not yet picked up.
    #[default]
    New,
    /// Someone is working on it.
    InProgress,
    /// Done.
    Resolved,
}

impl TicketStatus {
    /// SQL string representation (matches the CHECK constraint values).
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TicketStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(StoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// What kind of message the customer sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    /// A support request.
    #[default]
    Support,
    /// Product feedback proposing a change.
    Suggestion,
    /// Product feedback recommending something.
    Recommendation,
}

impl TicketType {
    /// SQL string representation.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Suggestion => "suggestion",
            Self::Recommendation => "recommendation",
        }
    }

    /// Suggestions and recommendations are feedback rather than support.
    pub fn is_feedback(self) -> bool {
        matches!(self, Self::Suggestion | Self::Recommendation)
    }

    /// Reason prefix for feedback tickets, e.g. `[SUGGESTION] `.
    pub fn reason_prefix(self) -> Option<String> {
        self.is_feedback()
            .then(|| format!("[{}] ", self.as_sql().to_ascii_uppercase()))
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TicketType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "support" => Ok(Self::Support),
            "suggestion" => Ok(Self::Suggestion),
            "recommendation" => Ok(Self::Recommendation),
            other => Err(StoreError::InvalidTicketType(other.to_string())),
        }
    }
}

/// Parse a priority tier name into the store's error type.
pub fn parse_priority(s: &str) -> Result<Priority, StoreError> {
    s.trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| StoreError::InvalidPriority(s.trim().to_string()))
}

/// A stored ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Auto-increment id.
    pub id: i64,
    /// Customer display name.
    pub customer_name: String,
    /// Original message.
    pub message: String,
    /// Support or feedback.
    pub ticket_type: TicketType,
    /// Free-form category (`bug`, `ui`, ...).
    pub category: Option<String>,
    /// Triage verdict at intake time.
    #[serde(flatten)]
    pub verdict: PriorityVerdict,
    /// Workflow status.
    pub status: TicketStatus,
    /// RFC 3339 UTC.
    pub created_at: String,
    /// RFC 3339 UTC.
    pub updated_at: String,
}

/// Parameters for inserting a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Message text.
    pub message: String,
    /// Customer display name.
    pub customer_name: String,
    /// Support or feedback.
    pub ticket_type: TicketType,
    /// Optional category.
    pub category: Option<String>,
    /// Verdict to persist.
    pub verdict: PriorityVerdict,
}

/// Filter for listing tickets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketFilter {
    /// Only this status.
    pub status: Option<TicketStatus>,
    /// Only this tier.
    pub priority: Option<Priority>,
}

/// Tickets grouped by tier.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityGroups {
    /// `critical` tickets.
    pub critical: Vec<Ticket>,
    /// `high` tickets.
    pub high: Vec<Ticket>,
    /// `normal` tickets.
    pub normal: Vec<Ticket>,
}

impl PriorityGroups {
    /// Tickets for one tier.
    pub fn get(&self, priority: Priority) -> &[Ticket] {
        match priority {
            Priority::Critical => &self.critical,
            Priority::High => &self.high,
            Priority::Normal => &self.normal,
        }
    }
}

/// Tickets grouped into support and feedback.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeGroups {
    /// Support requests.
    pub support: Vec<Ticket>,
    /// Suggestions and recommendations.
    pub suggestion: Vec<Ticket>,
}

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    /// All tickets.
    pub total_tickets: i64,
    /// Status `new`.
    pub new: i64,
    /// Status `in-progress`.
    pub in_progress: i64,
    /// Tier `critical`.
    pub critical: i64,
    /// Tier `high`.
    pub high: i64,
    /// Mean compound, rounded to 3 decimals; 0 when empty.
    pub avg_sentiment: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_parses_and_displays() {
        assert_eq!("In-Progress".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::InProgress.to_string(), "in-progress");
        assert_matches!("closed".parse::<TicketStatus>(), Err(StoreError::InvalidStatus(s)) if s == "closed");
    }

    #[test]
    fn status_serde_matches_sql() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn ticket_type_prefix() {
        assert_eq!(TicketType::Support.reason_prefix(), None);
        assert_eq!(TicketType::Suggestion.reason_prefix().as_deref(), Some("[SUGGESTION] "));
        assert_eq!(
            TicketType::Recommendation.reason_prefix().as_deref(),
            Some("[RECOMMENDATION] ")
        );
        assert_matches!("bug".parse::<TicketType>(), Err(StoreError::InvalidTicketType(_)));
    }

    #[test]
    fn priority_parse_maps_error() {
        assert_eq!(parse_priority(" High ").unwrap(), Priority::High);
        assert_matches!(parse_priority("urgent"), Err(StoreError::InvalidPriority(s)) if s == "urgent");
    }
}

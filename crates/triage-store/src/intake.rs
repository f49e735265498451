//! Ticket intake: validate, prioritize, adjust for feedback, store.

use std::sync::Arc;

use tracing::debug;
use triage_core::Priority;
use triage_scoring::Analyzer;
use triage_settings::PrioritySettings;

use crate::errors::{Result, StoreError};
use crate::store::TicketStore;
use crate::types::{NewTicket, Ticket, TicketType};

/// Customer name used when none is given.
pub const ANONYMOUS: &str = "Anonymous";

/// An incoming message before triage.
#[derive(Debug, Clone, Default)]
pub struct TicketSubmission {
    /// Message text; must not be blank.
    pub message: String,
    /// Customer name; blank means [`ANONYMOUS`].
    pub customer_name: Option<String>,
    /// Support or feedback.
    pub ticket_type: TicketType,
    /// Optional category; blank is dropped.
    pub category: Option<String>,
}

impl TicketSubmission {
    /// A support ticket with only a message.
    pub fn support(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Prioritizes submissions and writes them to the store.
#[derive(Debug)]
pub struct TicketIntake {
    analyzer: Arc<Analyzer>,
    store: Arc<TicketStore>,
    suggestion_dampening: f64,
}

impl TicketIntake {
    /// Build an intake over a shared analyzer and store.
    pub fn new(analyzer: Arc<Analyzer>, store: Arc<TicketStore>, settings: &PrioritySettings) -> Self {
        Self {
            analyzer,
            store,
            suggestion_dampening: settings.suggestion_dampening,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &TicketStore {
        &self.store
    }

    /// Validate, prioritize and persist one submission.
    ///
    /// Feedback tickets keep `critical`/`high` tiers but a `normal` score is
    /// dampened, and every feedback reason is prefixed with its type.
    pub fn submit_ticket(&self, submission: TicketSubmission) -> Result<Ticket> {
        let message = submission.message.trim();
        if message.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let customer_name = submission
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string();
        let category = submission
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from);

        let mut verdict = self.analyzer.prioritize(message);
        if let Some(prefix) = submission.ticket_type.reason_prefix() {
            if verdict.priority == Priority::Normal {
                verdict.priority_score *= self.suggestion_dampening;
            }
            verdict.reason = format!("{prefix}{}", verdict.reason);
            debug!(ticket_type = %submission.ticket_type, "Feedback adjustments applied");
        }

        let id = self.store.add_ticket(&NewTicket {
            message: message.to_string(),
            customer_name,
            ticket_type: submission.ticket_type,
            category,
            verdict,
        })?;
        self.store.get_ticket(id)?.ok_or(StoreError::NotFound(id))
    }
}

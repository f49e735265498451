//! Connection-owning ticket store.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{debug, info};
use triage_core::Priority;

use crate::errors::Result;
use crate::migrations::run_migrations;
use crate::repository::TicketRepository;
use crate::types::{
    NewTicket, PriorityGroups, Ticket, TicketFilter, TicketStats, TicketStatus, TypeGroups,
};

/// SQLite-backed ticket store.
///
/// Holds one connection behind a mutex; every operation is a short
/// statement, so id assignment and status updates are serialized.
pub struct TicketStore {
    conn: Mutex<Connection>,
}

impl TicketStore {
    /// Open (or create) the database at `path`, creating parent directories
    /// and running migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        run_migrations(&conn)?;
        debug!(path = %path.display(), "Ticket store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// A private in-memory store.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a ticket and return its id.
    pub fn add_ticket(&self, ticket: &NewTicket) -> Result<i64> {
        let id = TicketRepository::add_ticket(&self.conn.lock(), ticket)?;
        info!(
            ticket_id = id,
            ticket_type = %ticket.ticket_type,
            priority = %ticket.verdict.priority,
            "Ticket created"
        );
        Ok(id)
    }

    /// Get a ticket by id.
    pub fn get_ticket(&self, id: i64) -> Result<Option<Ticket>> {
        TicketRepository::get_ticket(&self.conn.lock(), id)
    }

    /// List tickets matching `filter`.
    pub fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        TicketRepository::list_tickets(&self.conn.lock(), filter)
    }

    /// All tickets grouped by tier.
    pub fn tickets_by_priority(&self) -> Result<PriorityGroups> {
        let mut groups = PriorityGroups::default();
        for ticket in self.list_tickets(&TicketFilter::default())? {
            match ticket.verdict.priority {
                Priority::Critical => groups.critical.push(ticket),
                Priority::High => groups.high.push(ticket),
                Priority::Normal => groups.normal.push(ticket),
            }
        }
        Ok(groups)
    }

    /// All tickets grouped into support and feedback.
    pub fn tickets_by_type(&self) -> Result<TypeGroups> {
        let (suggestion, support) = self
            .list_tickets(&TicketFilter::default())?
            .into_iter()
            .partition(|t| t.ticket_type.is_feedback());
        Ok(TypeGroups {
            support,
            suggestion,
        })
    }

    /// Set a ticket's status.
    pub fn update_status(&self, id: i64, status: TicketStatus) -> Result<Option<Ticket>> {
        let updated = TicketRepository::update_status(&self.conn.lock(), id, status)?;
        if updated.is_some() {
            info!(ticket_id = id, %status, "Ticket status updated");
        }
        Ok(updated)
    }

    /// Delete a ticket. Returns whether it existed.
    pub fn delete_ticket(&self, id: i64) -> Result<bool> {
        let deleted = TicketRepository::delete_ticket(&self.conn.lock(), id)?;
        if deleted {
            info!(ticket_id = id, "Ticket deleted");
        }
        Ok(deleted)
    }

    /// Aggregate counts.
    pub fn stats(&self) -> Result<TicketStats> {
        TicketRepository::stats(&self.conn.lock())
    }
}

impl std::fmt::Debug for TicketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketStore").finish_non_exhaustive()
    }
}

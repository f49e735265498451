//! SQL data access for tickets.
//!
//! All methods take a `&Connection` and are stateless: pure functions that
//! translate between Rust types and SQL.

use std::collections::BTreeSet;

use rusqlite::{Connection, OptionalExtension, params};
use triage_core::{Intensity, OverrideVerdict, Priority, PriorityVerdict};

use crate::errors::{Result, StoreError};
use crate::types::{NewTicket, Ticket, TicketFilter, TicketStats, TicketStatus, TicketType};

/// Current UTC timestamp as RFC 3339.
fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse the flagged keyword JSON array.
fn parse_keywords(json: &str) -> BTreeSet<String> {
    serde_json::from_str(json).unwrap_or_default()
}

fn parse_override(json: Option<String>) -> Option<OverrideVerdict> {
    json.and_then(|s| serde_json::from_str(&s).ok())
}

const ORDER_BY: &str = "ORDER BY priority_score DESC, created_at DESC, id DESC";

/// Ticket repository for SQL CRUD operations.
pub struct TicketRepository;

impl TicketRepository {
    /// Insert a ticket and return its id.
    pub fn add_ticket(conn: &Connection, ticket: &NewTicket) -> Result<i64> {
        let now = now_iso();
        let v = &ticket.verdict;
        let keywords = serde_json::to_string(&v.flagged_keywords)?;
        let context_override = v
            .context_override
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let _ = conn.execute(
            "INSERT INTO tickets (customer_name, message, ticket_type, category,
             priority, priority_score, emotion, compound, intensity, urgency_flagged,
             flagged_keywords, reason, context_override, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?15)",
            params![
                ticket.customer_name,
                ticket.message,
                ticket.ticket_type.as_sql(),
                ticket.category,
                v.priority.as_str(),
                v.priority_score,
                v.emotion,
                v.compound,
                v.intensity.as_str(),
                v.urgency_flagged,
                keywords,
                v.reason,
                context_override,
                TicketStatus::New.as_sql(),
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a ticket by id.
    pub fn get_ticket(conn: &Connection, id: i64) -> Result<Option<Ticket>> {
        let ticket = conn
            .query_row("SELECT * FROM tickets WHERE id = ?1", params![id], |row| {
                Ok(ticket_from_row(row))
            })
            .optional()?;
        Ok(ticket)
    }

    /// List tickets matching `filter`, highest score first.
    pub fn list_tickets(conn: &Connection, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            values.push(Box::new(status.as_sql()));
        }
        if let Some(priority) = filter.priority {
            conditions.push("priority = ?");
            values.push(Box::new(priority.as_str()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT * FROM tickets {where_clause} {ORDER_BY}");
        let params: Vec<&dyn rusqlite::types::ToSql> = values.iter().map(AsRef::as_ref).collect();

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params.as_slice(), |row| Ok(ticket_from_row(row)))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Set a ticket's status. Returns the updated ticket, or `None` if not found.
    pub fn update_status(
        conn: &Connection,
        id: i64,
        status: TicketStatus,
    ) -> Result<Option<Ticket>> {
        let changed = conn.execute(
            "UPDATE tickets SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_sql(), now_iso(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Self::get_ticket(conn, id)
    }

    /// Delete a ticket. Returns whether a row was removed.
    pub fn delete_ticket(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM tickets WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Aggregate counts.
    pub fn stats(conn: &Connection) -> Result<TicketStats> {
        let stats = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(status = 'new'), 0),
                    COALESCE(SUM(status = 'in-progress'), 0),
                    COALESCE(SUM(priority = 'critical'), 0),
                    COALESCE(SUM(priority = 'high'), 0),
                    COALESCE(AVG(compound), 0.0)
             FROM tickets",
            [],
            |row| {
                let avg: f64 = row.get(5)?;
                Ok(TicketStats {
                    total_tickets: row.get(0)?,
                    new: row.get(1)?,
                    in_progress: row.get(2)?,
                    critical: row.get(3)?,
                    high: row.get(4)?,
                    avg_sentiment: (avg * 1000.0).round() / 1000.0,
                })
            },
        )?;
        Ok(stats)
    }

    /// Check that a ticket exists.
    pub fn require(conn: &Connection, id: i64) -> Result<Ticket> {
        Self::get_ticket(conn, id)?.ok_or(StoreError::NotFound(id))
    }
}

fn ticket_from_row(row: &rusqlite::Row<'_>) -> Ticket {
    let ticket_type: String = row.get_unwrap("ticket_type");
    let priority: String = row.get_unwrap("priority");
    let intensity: String = row.get_unwrap("intensity");
    let status: String = row.get_unwrap("status");
    let keywords: String = row.get_unwrap("flagged_keywords");

    Ticket {
        id: row.get_unwrap("id"),
        customer_name: row.get_unwrap("customer_name"),
        message: row.get_unwrap("message"),
        ticket_type: ticket_type.parse().unwrap_or_default(),
        category: row.get_unwrap("category"),
        verdict: PriorityVerdict {
            priority: priority.parse().unwrap_or(Priority::Normal),
            priority_score: row.get_unwrap("priority_score"),
            emotion: row.get_unwrap("emotion"),
            compound: row.get_unwrap("compound"),
            intensity: match intensity.as_str() {
                "mildly" => Intensity::Mildly,
                "moderately" => Intensity::Moderately,
                "very" => Intensity::Very,
                "severe" => Intensity::Severe,
                _ => Intensity::Neutral,
            },
            urgency_flagged: row.get_unwrap("urgency_flagged"),
            flagged_keywords: parse_keywords(&keywords),
            reason: row.get_unwrap("reason"),
            context_override: parse_override(row.get_unwrap("context_override")),
        },
        status: status.parse().unwrap_or_default(),
        created_at: row.get_unwrap("created_at"),
        updated_at: row.get_unwrap("updated_at"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! SQL DDL for the ticket table.

use rusqlite::Connection;

use crate::errors::Result;

/// Create the ticket schema. Idempotent (`IF NOT EXISTS`).
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(TICKETS_SCHEMA)?;
    Ok(())
}

const TICKETS_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_name TEXT NOT NULL DEFAULT 'Anonymous',
    message TEXT NOT NULL,
    ticket_type TEXT NOT NULL DEFAULT 'support'
        CHECK (ticket_type IN ('support', 'suggestion', 'recommendation')),
    category TEXT,
    priority TEXT NOT NULL CHECK (priority IN ('critical', 'high', 'normal')),
    priority_score REAL NOT NULL DEFAULT 0,
    emotion TEXT,
    compound REAL NOT NULL DEFAULT 0,
    intensity TEXT NOT NULL DEFAULT 'neutral',
    urgency_flagged INTEGER NOT NULL DEFAULT 0,
    flagged_keywords TEXT NOT NULL DEFAULT '[]',
    reason TEXT NOT NULL DEFAULT '',
    context_override TEXT,
    status TEXT NOT NULL DEFAULT 'new'
        CHECK (status IN ('new', 'in-progress', 'resolved')),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
CREATE INDEX IF NOT EXISTS idx_tickets_priority ON tickets(priority, priority_score DESC);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'tickets'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn status_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO tickets (message, priority, status, created_at, updated_at)
             VALUES ('x', 'normal', 'closed', '', '')",
            [],
        );
        assert!(result.is_err());
    }
}

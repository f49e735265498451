//! Subcommand handlers.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use triage_core::Priority;
use triage_scoring::{AnalysisMode, Analyzer};
use triage_settings::TriageSettings;
use triage_store::{
    StoreError, TicketFilter, TicketIntake, TicketStatus, TicketStore, TicketSubmission,
    TicketType,
};

use crate::render;

/// Sample messages used by `demo`.
pub const DEMO_MESSAGES: [&str; 5] = [
    "The entire system went down! We cannot access anything! HELP!!!",
    "Hi, quick question about the billing feature.",
    "Someone compromised my account. Please help immediately!",
    "Loved using your product, very satisfied!",
    "Weapon detected in the building",
];

/// Everything a handler needs.
pub struct Ctx {
    pub settings: TriageSettings,
    pub analyzer: Arc<Analyzer>,
    pub json: bool,
}

impl Ctx {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text(value).trim_end());
        }
        Ok(())
    }

    fn open_store(&self) -> Result<Arc<TicketStore>> {
        let path = self.settings.store.resolved_db_path();
        let store = TicketStore::open(&path)
            .with_context(|| format!("Failed to open ticket database {}", path.display()))?;
        Ok(Arc::new(store))
    }

    fn intake(&self, store: Arc<TicketStore>) -> TicketIntake {
        TicketIntake::new(Arc::clone(&self.analyzer), store, &self.settings.priority)
    }
}

pub fn analyze(ctx: &Ctx, text: &str, mode: Option<AnalysisMode>, structured: bool) -> Result<()> {
    let report = ctx.analyzer.analyze_with_mode(text, mode, structured);
    ctx.emit(&report, render::report)
}

pub fn prioritize(ctx: &Ctx, text: &str) -> Result<()> {
    let verdict = ctx.analyzer.prioritize(text);
    ctx.emit(&verdict, render::verdict)
}

pub fn interactive(ctx: &Ctx) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        if !ctx.json {
            print!("> ");
            stdout.flush()?;
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("quit") {
            break;
        }
        let report = ctx.analyzer.analyze(text);
        ctx.emit(&report, render::report)?;
    }
    Ok(())
}

pub fn ticket_submit(
    ctx: &Ctx,
    message: String,
    customer_name: Option<String>,
    ticket_type: TicketType,
    category: Option<String>,
) -> Result<()> {
    let intake = ctx.intake(ctx.open_store()?);
    let ticket = intake.submit_ticket(TicketSubmission {
        message,
        customer_name,
        ticket_type,
        category,
    })?;
    ctx.emit(&ticket, render::ticket)
}

pub fn ticket_list(ctx: &Ctx, status: Option<TicketStatus>, priority: Option<Priority>) -> Result<()> {
    let tickets = ctx
        .open_store()?
        .list_tickets(&TicketFilter { status, priority })?;
    ctx.emit(&tickets, |tickets| {
        if tickets.is_empty() {
            return "No tickets.".to_string();
        }
        tickets
            .iter()
            .map(render::ticket_line)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub fn ticket_show(ctx: &Ctx, id: i64) -> Result<()> {
    let ticket = ctx
        .open_store()?
        .get_ticket(id)?
        .ok_or(StoreError::NotFound(id))?;
    ctx.emit(&ticket, render::ticket)
}

pub fn ticket_status(ctx: &Ctx, id: i64, status: TicketStatus) -> Result<()> {
    let ticket = ctx
        .open_store()?
        .update_status(id, status)?
        .ok_or(StoreError::NotFound(id))?;
    ctx.emit(&ticket, render::ticket_line)
}

pub fn ticket_delete(ctx: &Ctx, id: i64) -> Result<()> {
    if !ctx.open_store()?.delete_ticket(id)? {
        return Err(StoreError::NotFound(id).into());
    }
    ctx.emit(&serde_json::json!({ "deleted": id }), |_| {
        format!("Deleted ticket #{id}")
    })
}

pub fn ticket_stats(ctx: &Ctx) -> Result<()> {
    let stats = ctx.open_store()?.stats()?;
    ctx.emit(&stats, render::stats)
}

pub fn demo(ctx: &Ctx) -> Result<()> {
    let store = Arc::new(TicketStore::in_memory()?);
    let intake = ctx.intake(Arc::clone(&store));

    let mut tickets = Vec::with_capacity(DEMO_MESSAGES.len());
    for message in DEMO_MESSAGES {
        tickets.push(intake.submit_ticket(TicketSubmission::support(message))?);
    }
    let stats = store.stats()?;
    let groups = store.tickets_by_priority()?;
    info!(
        tickets = stats.total_tickets,
        critical = stats.critical,
        high = stats.high,
        "Demo triage complete"
    );

    if ctx.json {
        let value = serde_json::json!({
            "tickets": tickets,
            "stats": stats,
            "byPriority": groups,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for ticket in &tickets {
        println!("{}", "-".repeat(72));
        println!("{}", ticket.message);
        println!("{}", render::verdict(&ticket.verdict).trim_end());
    }
    println!("{}", "-".repeat(72));
    println!("{}", render::stats(&stats));
    for priority in Priority::ALL {
        let ids: Vec<String> = groups
            .get(priority)
            .iter()
            .map(|t| format!("#{}", t.id))
            .collect();
        println!("{:<8}: {}", priority.as_str(), ids.join(" "));
    }
    Ok(())
}

//! # triage
//!
//! Command-line front end: analyze text, prioritize ticket messages and
//! manage the ticket store.

#![deny(unsafe_code)]

mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use triage_core::Priority;
use triage_core::logging::{init_json_subscriber, init_subscriber};
use triage_scoring::{AnalysisMode, Analyzer};
use triage_settings::{LogFormat, load_settings, load_settings_from_path};
use triage_store::{TicketStatus, TicketType, parse_priority};

use crate::commands::Ctx;

/// Sentiment analysis and priority triage for support tickets.
#[derive(Parser, Debug)]
#[command(name = "triage", version, about)]
struct Cli {
    /// Settings file (defaults to `~/.triage/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Ticket database path (overrides settings).
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Log level (overrides settings; `RUST_LOG` still wins).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON instead of the text layout.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full sentiment analysis with override, tone and summary.
    Analyze {
        /// Force a mode (`word`, `sentence` or `paragraph`).
        #[arg(long)]
        mode: Option<AnalysisMode>,

        /// Skip the per-word structure rows.
        #[arg(long)]
        no_structure: bool,

        /// Text to analyze.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Priority verdict for a ticket message.
    Prioritize {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Analyze stdin line by line; an empty line or `quit` exits.
    Interactive,
    /// Ticket store operations.
    #[command(subcommand)]
    Ticket(TicketCommand),
    /// Triage the sample messages into an in-memory store.
    Demo,
}

#[derive(Subcommand, Debug)]
enum TicketCommand {
    /// Prioritize and store a message.
    Submit {
        /// Customer name (defaults to `Anonymous`).
        #[arg(long)]
        customer: Option<String>,

        /// `support`, `suggestion` or `recommendation`.
        #[arg(long = "type", default_value = "support")]
        ticket_type: TicketType,

        /// Free-form category.
        #[arg(long)]
        category: Option<String>,

        /// Message text.
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// List tickets, highest score first.
    List {
        /// Only this status.
        #[arg(long)]
        status: Option<TicketStatus>,

        /// Only this tier.
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    /// Show one ticket.
    Show {
        /// Ticket id.
        id: i64,
    },
    /// Change a ticket's status.
    Status {
        /// Ticket id.
        id: i64,
        /// `new`, `in-progress` or `resolved`.
        status: TicketStatus,
    },
    /// Delete a ticket.
    Delete {
        /// Ticket id.
        id: i64,
    },
    /// Aggregate counts.
    Stats,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Analyze { .. } => "analyze",
            Self::Prioritize { .. } => "prioritize",
            Self::Interactive => "interactive",
            Self::Ticket(cmd) => match cmd {
                TicketCommand::Submit { .. } => "ticket submit",
                TicketCommand::List { .. } => "ticket list",
                TicketCommand::Show { .. } => "ticket show",
                TicketCommand::Status { .. } => "ticket status",
                TicketCommand::Delete { .. } => "ticket delete",
                TicketCommand::Stats => "ticket stats",
            },
            Self::Demo => "demo",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => load_settings().context("Failed to load settings")?,
    };
    if let Some(db_path) = &cli.db_path {
        settings.store.db_path = Some(db_path.display().to_string());
    }
    if let Some(level) = &cli.log_level {
        settings.logging.level.clone_from(level);
    }
    match settings.logging.format {
        LogFormat::Compact => init_subscriber(&settings.logging.level),
        LogFormat::Json => init_json_subscriber(&settings.logging.level),
    }

    let analyzer =
        Arc::new(Analyzer::from_settings(&settings).context("Failed to build analyzer")?);
    info!(
        command = cli.command.name(),
        json = cli.json,
        version = env!("CARGO_PKG_VERSION"),
        "triage starting"
    );
    let ctx = Ctx {
        settings,
        analyzer,
        json: cli.json,
    };

    match cli.command {
        Command::Analyze {
            mode,
            no_structure,
            text,
        } => commands::analyze(&ctx, &text.join(" "), mode, !no_structure),
        Command::Prioritize { text } => commands::prioritize(&ctx, &text.join(" ")),
        Command::Interactive => commands::interactive(&ctx),
        Command::Ticket(cmd) => match cmd {
            TicketCommand::Submit {
                customer,
                ticket_type,
                category,
                message,
            } => commands::ticket_submit(&ctx, message.join(" "), customer, ticket_type, category),
            TicketCommand::List { status, priority } => {
                commands::ticket_list(&ctx, status, priority)
            }
            TicketCommand::Show { id } => commands::ticket_show(&ctx, id),
            TicketCommand::Status { id, status } => commands::ticket_status(&ctx, id, status),
            TicketCommand::Delete { id } => commands::ticket_delete(&ctx, id),
            TicketCommand::Stats => commands::ticket_stats(&ctx),
        },
        Command::Demo => commands::demo(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "triage", "ticket", "list", "--status", "in-progress", "--priority", "High", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Ticket(TicketCommand::List { status, priority }) => {
                assert_eq!(status, Some(TicketStatus::InProgress));
                assert_eq!(priority, Some(Priority::High));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.command.name(), "ticket list");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(Cli::try_parse_from(["triage", "ticket", "status", "3", "closed"]).is_err());
        assert!(Cli::try_parse_from(["triage", "ticket", "submit", "--type", "bug", "hi"]).is_err());
        assert!(Cli::try_parse_from(["triage", "analyze", "--mode", "page", "hi"]).is_err());
        assert!(Cli::try_parse_from(["triage", "prioritize"]).is_err());
    }

    #[test]
    fn analyze_joins_words() {
        let cli = Cli::try_parse_from(["triage", "analyze", "--mode", "word", "not", "good"]).unwrap();
        match cli.command {
            Command::Analyze { mode, text, .. } => {
                assert_eq!(mode, Some(AnalysisMode::Word));
                assert_eq!(text.join(" "), "not good");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

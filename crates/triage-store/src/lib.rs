//! # triage-store
//!
//! SQLite persistence for triaged support tickets.
//!
//! - [`TicketRepository`]: stateless SQL functions over a `&Connection`
//! - [`TicketStore`]: owns the connection; the collaborator surface
//!   (`add`, `get`, `list`, groupings, status updates, delete, stats)
//! - [`TicketIntake`]: validates a submission, prioritizes it with the
//!   analyzer, applies the feedback adjustments and stores it
//!
//! Errors are typed ([`StoreError`]) and never swallowed.

#![deny(unsafe_code)]

pub mod errors;
pub mod intake;
pub mod migrations;
pub mod repository;
pub mod store;
pub mod types;

pub use errors::{Result, StoreError};
pub use intake::{ANONYMOUS, TicketIntake, TicketSubmission};
pub use repository::TicketRepository;
pub use store::TicketStore;
pub use types::{
    NewTicket, PriorityGroups, Ticket, TicketFilter, TicketStats, TicketStatus, TicketType,
    TypeGroups, parse_priority,
};

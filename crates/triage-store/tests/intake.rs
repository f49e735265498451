#![allow(missing_docs, unused_results)]
//! Ticket intake over a real analyzer and an in-memory store.

use std::sync::Arc;

use assert_matches::assert_matches;
use triage_core::Priority;
use triage_scoring::Analyzer;
use triage_settings::TriageSettings;
use triage_store::{
    StoreError, TicketFilter, TicketIntake, TicketStatus, TicketStore, TicketSubmission,
    TicketType,
};

fn intake() -> TicketIntake {
    let settings = TriageSettings::default();
    let analyzer = Arc::new(Analyzer::from_settings(&settings).unwrap());
    let store = Arc::new(TicketStore::in_memory().unwrap());
    TicketIntake::new(analyzer, store, &settings.priority)
}

fn submission(message: &str, ticket_type: TicketType) -> TicketSubmission {
    TicketSubmission {
        message: message.to_string(),
        customer_name: Some("Riley".to_string()),
        ticket_type,
        category: Some("ui".to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn blank_message_is_rejected() {
    let intake = intake();
    assert_matches!(
        intake.submit_ticket(TicketSubmission::support("   \n")),
        Err(StoreError::EmptyMessage)
    );
    assert_eq!(intake.store().stats().unwrap().total_tickets, 0);
}

#[test]
fn missing_name_defaults_to_anonymous() {
    let intake = intake();
    let mut sub = TicketSubmission::support("Where can I download my invoice?");
    sub.customer_name = Some("  ".to_string());
    sub.category = Some(String::new());
    let ticket = intake.submit_ticket(sub).unwrap();
    assert_eq!(ticket.customer_name, "Anonymous");
    assert!(ticket.category.is_none());
    assert_eq!(ticket.status, TicketStatus::New);
}

// ─────────────────────────────────────────────────────────────────────────────
// Feedback adjustments
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn support_ticket_keeps_verdict() {
    let intake = intake();
    let ticket = intake
        .submit_ticket(submission(
            "The entire system went down! We cannot access anything! HELP!!!",
            TicketType::Support,
        ))
        .unwrap();
    assert_eq!(ticket.verdict.priority, Priority::High);
    assert!(!ticket.verdict.reason.starts_with('['));
    assert_eq!(ticket.category.as_deref(), Some("ui"));
}

#[test]
fn normal_suggestion_is_dampened_and_tagged() {
    let intake = intake();
    let text = "Please add a dark mode, it would help at night";
    let raw = intake.submit_ticket(submission(text, TicketType::Support)).unwrap();
    let dampened = intake.submit_ticket(submission(text, TicketType::Suggestion)).unwrap();

    assert_eq!(raw.verdict.priority, Priority::Normal);
    assert_eq!(dampened.verdict.priority, Priority::Normal);
    assert!(raw.verdict.priority_score > 0.0);
    assert!((dampened.verdict.priority_score - raw.verdict.priority_score * 0.5).abs() < 1e-9);
    assert_eq!(
        dampened.verdict.reason,
        format!("[SUGGESTION] {}", raw.verdict.reason)
    );
    insta::assert_snapshot!(dampened.verdict.reason, @"[SUGGESTION] Urgent keywords: help");
}

#[test]
fn critical_recommendation_keeps_tier() {
    let intake = intake();
    let ticket = intake
        .submit_ticket(submission(
            "I recommend fixing this before someone gets hacked again",
            TicketType::Recommendation,
        ))
        .unwrap();
    assert_eq!(ticket.verdict.priority, Priority::Critical);
    assert!((ticket.verdict.priority_score - 1.0).abs() < f64::EPSILON);
    assert!(ticket.verdict.reason.starts_with("[RECOMMENDATION] Severe keywords detected:"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Store lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lifecycle_over_sample_messages() {
    let intake = intake();
    let messages = [
        "The entire system went down! We cannot access anything! HELP!!!",
        "Hi, quick question about the billing feature.",
        "Someone compromised my account. Please help immediately!",
        "Loved using your product, very satisfied!",
    ];
    let ids: Vec<i64> = messages
        .iter()
        .map(|m| intake.submit_ticket(TicketSubmission::support(*m)).unwrap().id)
        .collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let store = intake.store();
    let stats = store.stats().unwrap();
    assert_eq!(stats.total_tickets, 4);
    assert_eq!(stats.new, 4);
    assert_eq!(stats.critical, 1);
    assert_eq!(stats.high, 1);

    let listed = store.list_tickets(&TicketFilter::default()).unwrap();
    assert_eq!(listed.len(), 4);
    assert!(listed[0].verdict.priority_score >= listed[3].verdict.priority_score);

    store.update_status(ids[0], TicketStatus::InProgress).unwrap();
    assert!(store.delete_ticket(ids[1]).unwrap());

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_tickets, 3);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.new, 2);

    let groups = store.tickets_by_priority().unwrap();
    assert_eq!(groups.critical.len(), 1);
    assert_eq!(groups.high.len(), 1);
    assert_eq!(groups.normal.len(), 1);
}

#[test]
fn ticket_json_is_flat_camel_case() {
    let intake = intake();
    let ticket = intake
        .submit_ticket(TicketSubmission::support("Weapon detected in the building"))
        .unwrap();
    let json = serde_json::to_value(&ticket).unwrap();
    assert_eq!(json["priority"], "critical");
    assert_eq!(json["ticketType"], "support");
    assert_eq!(json["status"], "new");
    assert_eq!(json["contextOverride"]["severity"], "high");
    assert!(json["flaggedKeywords"].is_array());
}

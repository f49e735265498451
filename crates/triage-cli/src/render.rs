//! Plain-text layouts for the terminal.

use std::fmt::Write as _;

use triage_core::PriorityVerdict;
use triage_core::text::{format_score, truncate_str};
use triage_scoring::AnalysisReport;
use triage_store::{Ticket, TicketStats};

const MAX_STRUCTURE_ROWS: usize = 8;

fn join_or_none<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

/// Full analysis layout.
pub fn report(r: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Mode: {}", r.mode);

    let o = &r.overall;
    if let Some(ov) = &r.context.override_verdict {
        let _ = writeln!(out, "Context override: {} [{}]", ov.severity, join_or_none(&ov.tags));
        let _ = writeln!(out, "  Reason: {}", ov.reason);
        let _ = writeln!(
            out,
            "  Overall: {} ({}) -> {} ({})",
            o.original_label,
            format_score(o.original_compound),
            o.adjusted_label,
            format_score(o.adjusted_compound)
        );
    } else {
        let _ = writeln!(
            out,
            "Overall: {} (compound={}, pos={}, neu={}, neg={})",
            o.adjusted_label,
            format_score(o.scores.compound),
            format_score(o.scores.pos),
            format_score(o.scores.neu),
            format_score(o.scores.neg)
        );
    }
    let tone = &r.context.tone;
    let _ = writeln!(
        out,
        "Tone: {} | emotion: {} | targets: {}",
        tone.tone_label,
        tone.main_emotion.as_deref().unwrap_or("none"),
        join_or_none(&tone.main_targets)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", r.summary);

    for (i, seg) in r.segments.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "[{}] {} ({})",
            i + 1,
            truncate_str(&seg.text, 60),
            format_score(seg.polarity.compound)
        );
        let Some(structure) = &seg.structure else {
            continue;
        };
        for c in structure
            .contributions
            .iter()
            .filter(|c| c.is_meaningful())
            .take(MAX_STRUCTURE_ROWS)
        {
            let notes = if c.notes.is_empty() {
                String::new()
            } else {
                format!("  [{}]", c.notes.join(", "))
            };
            let _ = writeln!(
                out,
                "    {:<14} {:>7} -> {:>7}{notes}",
                c.token,
                format!("{:.2}", c.base_valence),
                format!("{:.2}", c.adjusted_valence)
            );
        }
    }
    out
}

/// Priority verdict layout.
pub fn verdict(v: &PriorityVerdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Priority:  {} ({})", v.priority, format_score(v.priority_score));
    let _ = writeln!(out, "Emotion:   {}", v.emotion.as_deref().unwrap_or("none"));
    let _ = writeln!(out, "Compound:  {}", format_score(v.compound));
    let _ = writeln!(out, "Intensity: {}", v.intensity);
    let _ = writeln!(out, "Keywords:  {}", join_or_none(&v.flagged_keywords));
    let _ = writeln!(out, "Reason:    {}", v.reason);
    out
}

/// One-line ticket listing entry.
pub fn ticket_line(t: &Ticket) -> String {
    format!(
        "#{:<4} {:<8} {:>5}  {:<11} {:<14} {}",
        t.id,
        t.verdict.priority.as_str(),
        format_score(t.verdict.priority_score),
        t.status.as_sql(),
        t.ticket_type.as_sql(),
        truncate_str(&t.message, 50)
    )
}

/// Detailed ticket layout.
pub fn ticket(t: &Ticket) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Ticket #{} ({}, {})", t.id, t.ticket_type, t.status);
    let _ = writeln!(out, "Customer:  {}", t.customer_name);
    if let Some(category) = &t.category {
        let _ = writeln!(out, "Category:  {category}");
    }
    let _ = writeln!(out, "Created:   {}", t.created_at);
    let _ = writeln!(out, "Updated:   {}", t.updated_at);
    let _ = writeln!(out, "Message:   {}", t.message);
    out.push_str(&verdict(&t.verdict));
    out
}

/// Store statistics layout.
pub fn stats(s: &TicketStats) -> String {
    format!(
        "Total: {}  New: {}  In progress: {}  Critical: {}  High: {}  Avg sentiment: {}",
        s.total_tickets,
        s.new,
        s.in_progress,
        s.critical,
        s.high,
        format_score(s.avg_sentiment)
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use triage_core::{Intensity, Priority};
    use triage_store::{TicketStatus, TicketType};

    use super::*;

    fn sample_verdict() -> PriorityVerdict {
        PriorityVerdict {
            priority: Priority::High,
            priority_score: 0.45,
            emotion: Some("anger".to_string()),
            compound: -0.2,
            intensity: Intensity::Mildly,
            urgency_flagged: true,
            flagged_keywords: BTreeSet::from(["broken".to_string(), "down".to_string()]),
            reason: "Angry/frustrated (emotion: anger) | Slightly negative sentiment (-0.20)"
                .to_string(),
            context_override: None,
        }
    }

    #[test]
    fn verdict_layout() {
        insta::assert_snapshot!(verdict(&sample_verdict()), @r"
        Priority:  high (0.450)
        Emotion:   anger
        Compound:  -0.200
        Intensity: mildly
        Keywords:  broken, down
        Reason:    Angry/frustrated (emotion: anger) | Slightly negative sentiment (-0.20)
        ");
    }

    #[test]
    fn verdict_without_keywords() {
        let mut v = sample_verdict();
        v.flagged_keywords.clear();
        v.emotion = None;
        let text = verdict(&v);
        assert!(text.contains("Keywords:  none"));
        assert!(text.contains("Emotion:   none"));
    }

    #[test]
    fn ticket_and_stats_lines() {
        let t = Ticket {
            id: 7,
            customer_name: "Anonymous".to_string(),
            message: "The export is broken".to_string(),
            ticket_type: TicketType::Support,
            category: None,
            verdict: sample_verdict(),
            status: TicketStatus::InProgress,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000Z".to_string(),
        };
        assert_eq!(
            ticket_line(&t),
            "#7    high     0.450  in-progress support        The export is broken"
        );

        let s = TicketStats {
            total_tickets: 3,
            new: 2,
            in_progress: 1,
            critical: 1,
            high: 1,
            avg_sentiment: -0.233,
        };
        insta::assert_snapshot!(
            stats(&s),
            @"Total: 3  New: 2  In progress: 1  Critical: 1  High: 1  Avg sentiment: -0.233"
        );
    }
}

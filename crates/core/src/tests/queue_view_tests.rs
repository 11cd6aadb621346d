// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_ticket, queue_response};
use crate::{ApplyOutcome, QueueView, SequenceGate};
use helpdesk_domain::{Priority, TicketFilter, TicketStatus};

#[test]
fn test_gate_admits_only_newer_sequences() {
    let mut gate = SequenceGate::new();
    let first = gate.issue();
    let second = gate.issue();

    assert!(gate.admit(second));
    assert!(!gate.admit(first));
    assert!(!gate.admit(second));
    assert_eq!(gate.last_issued(), Some(second));
}

#[test]
fn test_gate_rejects_unissued_sequence() {
    let mut issuer = SequenceGate::new();
    let foreign = issuer.issue();

    let mut gate = SequenceGate::new();

    assert!(!gate.admit(foreign));
}

#[test]
fn test_stale_response_is_discarded() {
    let mut view = QueueView::new("todos");
    let older = view.begin_fetch();
    let newer = view.begin_fetch();

    let fresh = queue_response(vec![create_test_ticket(2, TicketStatus::Open, Priority::Alta)]);
    let stale = queue_response(vec![
        create_test_ticket(1, TicketStatus::Open, Priority::Baixa),
        create_test_ticket(3, TicketStatus::Open, Priority::Baixa),
    ]);

    assert_eq!(view.apply(newer, fresh), ApplyOutcome::Applied);
    assert_eq!(view.apply(older, stale), ApplyOutcome::Stale);

    assert_eq!(view.tickets().len(), 1);
    assert_eq!(view.tickets()[0].ticket_number, 2);
    assert_eq!(view.stats().map(|stats| stats.total), Some(1));
}

#[test]
fn test_out_of_order_older_response_still_applies_first() {
    let mut view = QueueView::new("todos");
    let older = view.begin_fetch();
    let newer = view.begin_fetch();

    let first = queue_response(vec![create_test_ticket(1, TicketStatus::Open, Priority::Baixa)]);
    let second = queue_response(vec![create_test_ticket(2, TicketStatus::Open, Priority::Alta)]);

    assert_eq!(view.apply(older, first), ApplyOutcome::Applied);
    assert_eq!(view.apply(newer, second), ApplyOutcome::Applied);
    assert_eq!(view.tickets()[0].ticket_number, 2);
}

#[test]
fn test_switching_queue_discards_in_flight_responses() {
    let mut view = QueueView::new("todos");
    let before_switch = view.begin_fetch();

    view.switch_queue("meus-tickets");
    let outcome = view.apply(
        before_switch,
        queue_response(vec![create_test_ticket(1, TicketStatus::Open, Priority::Media)]),
    );

    assert_eq!(outcome, ApplyOutcome::Stale);
    assert_eq!(view.queue(), Some("meus-tickets"));
    assert!(view.tickets().is_empty());
    assert!(view.stats().is_none());

    let after_switch = view.begin_fetch();
    assert_eq!(
        view.apply(after_switch, queue_response(Vec::new())),
        ApplyOutcome::Applied
    );
}

#[test]
fn test_applied_tickets_are_priority_ordered() {
    let mut view = QueueView::new("todos");
    let seq = view.begin_fetch();

    view.apply(
        seq,
        queue_response(vec![
            create_test_ticket(1, TicketStatus::Open, Priority::Baixa),
            create_test_ticket(2, TicketStatus::Open, Priority::Critica),
            create_test_ticket(3, TicketStatus::Open, Priority::Media),
            create_test_ticket(4, TicketStatus::Open, Priority::Critica),
        ]),
    );

    let numbers: Vec<u64> = view.tickets().iter().map(|t| t.ticket_number).collect();
    assert_eq!(numbers, vec![2, 4, 3, 1]);
}

#[test]
fn test_replace_ticket_reorders_list() {
    let mut view = QueueView::new("todos");
    let seq = view.begin_fetch();
    view.apply(
        seq,
        queue_response(vec![
            create_test_ticket(1, TicketStatus::Open, Priority::Alta),
            create_test_ticket(2, TicketStatus::Open, Priority::Baixa),
        ]),
    );

    let mut updated = create_test_ticket(2, TicketStatus::InProgress, Priority::Critica);
    updated.title = String::from("Servidor fora do ar");

    assert!(view.replace_ticket(updated));
    assert_eq!(view.tickets()[0].ticket_number, 2);
    assert_eq!(view.tickets()[0].status, TicketStatus::InProgress);

    let missing = create_test_ticket(99, TicketStatus::Open, Priority::Media);
    assert!(!view.replace_ticket(missing));
    assert_eq!(view.tickets().len(), 2);
}

#[test]
fn test_visible_applies_filter() {
    let mut view = QueueView::new("todos");
    let seq = view.begin_fetch();
    view.apply(
        seq,
        queue_response(vec![
            create_test_ticket(1, TicketStatus::Open, Priority::Alta),
            create_test_ticket(2, TicketStatus::InProgress, Priority::Alta),
        ]),
    );

    let filter = TicketFilter {
        status: Some(TicketStatus::InProgress),
        ..TicketFilter::default()
    };

    let visible = view.visible(&filter);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].ticket_number, 2);
}

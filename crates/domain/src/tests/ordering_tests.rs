// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_ticket;
use crate::{Priority, Ticket, sort_by_priority, sorted_by_priority};

fn numbers(tickets: &[Ticket]) -> Vec<u64> {
    tickets.iter().map(|ticket| ticket.ticket_number).collect()
}

#[test]
fn test_critical_first_regardless_of_creation_order() {
    // The low priority ticket is older.
    let tickets = vec![
        create_test_ticket(1, Priority::Baixa, 600),
        create_test_ticket(2, Priority::Critica, 5),
    ];

    assert_eq!(numbers(&sorted_by_priority(tickets)), vec![2, 1]);
}

#[test]
fn test_equal_priority_oldest_first() {
    let tickets = vec![
        create_test_ticket(1, Priority::Media, 10),
        create_test_ticket(2, Priority::Media, 90),
    ];

    assert_eq!(numbers(&sorted_by_priority(tickets)), vec![2, 1]);
}

#[test]
fn test_full_ordering() {
    let mut tickets = vec![
        create_test_ticket(1, Priority::Media, 30),
        create_test_ticket(2, Priority::Alta, 10),
        create_test_ticket(3, Priority::Critica, 1),
        create_test_ticket(4, Priority::Baixa, 300),
        create_test_ticket(5, Priority::Alta, 50),
    ];

    sort_by_priority(&mut tickets);

    assert_eq!(numbers(&tickets), vec![3, 5, 2, 1, 4]);
}

#[test]
fn test_sort_is_stable_for_identical_keys() {
    let tickets = vec![
        create_test_ticket(7, Priority::Alta, 20),
        create_test_ticket(3, Priority::Alta, 20),
        create_test_ticket(9, Priority::Alta, 20),
    ];

    assert_eq!(numbers(&sorted_by_priority(tickets)), vec![7, 3, 9]);
}

#[test]
fn test_sort_empty_list() {
    assert!(sorted_by_priority(Vec::new()).is_empty());
}

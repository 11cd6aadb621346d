// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AssignedOperator, CategoryRef, ClientInfo, Priority, Ticket, TicketSla, TicketStatus,
};
use time::{Duration, OffsetDateTime, macros::datetime};

pub const BASE_TIME: OffsetDateTime = datetime!(2026-03-10 08:00 UTC);

pub fn create_test_ticket(number: u64, priority: Priority, age_minutes: i64) -> Ticket {
    Ticket {
        id: format!("t-{number}"),
        ticket_number: number,
        title: format!("Ticket {number}"),
        description: String::from("Impressora não imprime"),
        status: TicketStatus::Open,
        priority,
        category: Some(CategoryRef {
            category_id: Some(String::from("cat-1")),
            department: String::from("TI"),
            kind: String::from("Suporte"),
            system: String::from("Impressoras"),
        }),
        assigned_to: None,
        client: ClientInfo {
            name: String::from("Maria Souza"),
            email: String::from("maria@example.com"),
            company: Some(String::from("ACME")),
            phone: None,
        },
        created_by: None,
        sla: TicketSla::default(),
        tags: Vec::new(),
        files: Vec::new(),
        created_at: BASE_TIME - Duration::minutes(age_minutes),
        updated_at: None,
    }
}

pub fn assign(mut ticket: Ticket, user_id: &str) -> Ticket {
    ticket.assigned_to = Some(AssignedOperator {
        user_id: Some(user_id.to_string()),
        display_name: Some(format!("Operator {user_id}")),
        email: None,
    });
    ticket
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{
    Category, ClientInfo, NewTicketDraft, Priority, QueueStats, QueueTickets, SlaHours, Ticket,
    TicketSla, TicketStatus, UserRef,
};
use time::{Duration, OffsetDateTime, macros::datetime};

pub const BASE_TIME: OffsetDateTime = datetime!(2026-03-10 08:00 UTC);

pub const LONG_REASON: &str = "Cliente confirmou o problema por telefone";

pub fn create_test_client() -> ClientInfo {
    ClientInfo {
        name: String::from("Maria Souza"),
        email: String::from("maria@example.com"),
        company: Some(String::from("ACME")),
        phone: None,
    }
}

pub fn create_test_ticket(number: u64, status: TicketStatus, priority: Priority) -> Ticket {
    Ticket {
        id: format!("t-{number}"),
        ticket_number: number,
        title: format!("Ticket {number}"),
        description: String::from("Impressora não imprime"),
        status,
        priority,
        category: None,
        assigned_to: None,
        client: create_test_client(),
        created_by: None,
        sla: TicketSla::default(),
        tags: Vec::new(),
        files: Vec::new(),
        created_at: BASE_TIME - Duration::minutes(i64::try_from(number).unwrap()),
        updated_at: None,
    }
}

pub fn opened_by(mut ticket: Ticket, user_id: &str) -> Ticket {
    ticket.created_by = Some(UserRef {
        id: Some(user_id.to_string()),
        ..UserRef::default()
    });
    ticket
}

pub fn create_test_category(id: &str, default_priority: Priority) -> Category {
    Category {
        id: id.to_string(),
        department: String::from("TI"),
        kind: String::from("Suporte"),
        system: String::from("Impressoras"),
        description: None,
        default_priority,
        sla: SlaHours::default(),
        is_active: true,
        is_master_only: false,
        allow_manual_creation: true,
    }
}

pub fn create_test_draft(category_id: Option<&str>) -> NewTicketDraft {
    NewTicketDraft {
        title: String::from("  Impressora do financeiro parada  "),
        description: String::from("Não imprime desde ontem"),
        client: create_test_client(),
        category_id: category_id.map(ToString::to_string),
    }
}

pub fn queue_response(tickets: Vec<Ticket>) -> QueueTickets {
    let total: u64 = u64::try_from(tickets.len()).unwrap();
    QueueTickets {
        tickets,
        stats: QueueStats {
            total,
            ..QueueStats::default()
        },
    }
}

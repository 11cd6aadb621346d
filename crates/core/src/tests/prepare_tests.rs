// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{LONG_REASON, create_test_ticket};
use crate::{Command, CoreError, EditRequest, PreparedRequest, StatusChangeRequest, prepare};
use helpdesk_domain::{DomainError, Priority, Role, TicketStatus};

#[test]
fn test_status_change_trims_description() {
    let ticket = create_test_ticket(1, TicketStatus::Open, Priority::Media);
    let command = Command::ChangeStatus {
        target: TicketStatus::InProgress,
        description: format!("  {LONG_REASON}  "),
    };

    let request = prepare(&ticket, command, Role::Operator).unwrap();

    assert_eq!(
        request,
        PreparedRequest::ChangeStatus(StatusChangeRequest {
            status: TicketStatus::InProgress,
            description: LONG_REASON.to_string(),
        })
    );
}

#[test]
fn test_self_transition_is_refused() {
    let ticket = create_test_ticket(1, TicketStatus::Open, Priority::Media);
    let command = Command::ChangeStatus {
        target: TicketStatus::Open,
        description: LONG_REASON.to_string(),
    };

    let result = prepare(&ticket, command, Role::Master);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_transition_from_terminal_status_is_refused() {
    let ticket = create_test_ticket(1, TicketStatus::Closed, Priority::Media);
    let command = Command::ChangeStatus {
        target: TicketStatus::Reopened,
        description: LONG_REASON.to_string(),
    };

    let result = prepare(&ticket, command, Role::Master);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_short_justification_is_refused_for_detailed_statuses() {
    let ticket = create_test_ticket(1, TicketStatus::InProgress, Priority::Alta);
    let command = Command::ChangeStatus {
        target: TicketStatus::Resolved,
        description: String::from("  feito   "),
    };

    let result = prepare(&ticket, command, Role::Operator);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::JustificationTooShort {
                target: TicketStatus::Resolved,
                minimum: 10,
                actual: 5,
            }
        ))
    );
}

#[test]
fn test_short_justification_is_enough_for_reopen() {
    let ticket = create_test_ticket(1, TicketStatus::Resolved, Priority::Alta);
    let command = Command::ChangeStatus {
        target: TicketStatus::Reopened,
        description: String::from("voltou"),
    };

    assert!(prepare(&ticket, command, Role::Operator).is_ok());
}

#[test]
fn test_blank_justification_is_refused() {
    let ticket = create_test_ticket(1, TicketStatus::Resolved, Priority::Alta);
    let command = Command::ChangeStatus {
        target: TicketStatus::Reopened,
        description: String::from("   "),
    };

    let result = prepare(&ticket, command, Role::Operator);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::MissingJustification { .. }
        ))
    ));
}

#[test]
fn test_assign_requires_operator_and_reason() {
    let ticket = create_test_ticket(1, TicketStatus::Open, Priority::Media);

    let blank_user = prepare(
        &ticket,
        Command::Assign {
            user_id: String::from(" "),
            description: LONG_REASON.to_string(),
        },
        Role::Master,
    );
    assert!(matches!(
        blank_user,
        Err(CoreError::DomainViolation(DomainError::ValidationFailed { .. }))
    ));

    let blank_reason = prepare(
        &ticket,
        Command::Assign {
            user_id: String::from("u-7"),
            description: String::new(),
        },
        Role::Master,
    );
    assert!(matches!(
        blank_reason,
        Err(CoreError::DomainViolation(
            DomainError::MissingJustification { .. }
        ))
    ));
}

#[test]
fn test_internal_comment_is_prepared() {
    let ticket = create_test_ticket(1, TicketStatus::WaitingThirdParty, Priority::Baixa);

    let request = prepare(
        &ticket,
        Command::AddComment {
            text: String::from(" verificar com fornecedor "),
            internal: true,
        },
        Role::Agent,
    )
    .unwrap();

    match request {
        PreparedRequest::AddComment(comment) => {
            assert_eq!(comment.text, "verificar com fornecedor");
            assert!(comment.is_internal);
        }
        other => panic!("unexpected request: {other:?}"),
    }
}

#[test]
fn test_categorize_only_from_uncategorized() {
    let open = create_test_ticket(1, TicketStatus::Open, Priority::Media);
    let uncategorized = create_test_ticket(2, TicketStatus::Uncategorized, Priority::Media);
    let command = Command::Categorize {
        category_id: String::from("cat-1"),
    };

    assert!(prepare(&open, command.clone(), Role::Master).is_err());
    assert!(prepare(&uncategorized, command, Role::Master).is_ok());
}

#[test]
fn test_request_bodies_use_backend_field_names() {
    let ticket = create_test_ticket(1, TicketStatus::Open, Priority::Media);
    let request = prepare(
        &ticket,
        Command::Assign {
            user_id: String::from("u-7"),
            description: String::from("Plantão"),
        },
        Role::Master,
    )
    .unwrap();

    let PreparedRequest::Assign(body) = request else {
        panic!("unexpected request: {request:?}");
    };
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "assignToUserId": "u-7", "description": "Plantão" })
    );
}

#[test]
fn test_comment_on_finalized_ticket_is_refused() {
    for status in [
        TicketStatus::Resolved,
        TicketStatus::Closed,
        TicketStatus::Cancelled,
    ] {
        let ticket = create_test_ticket(1, status, Priority::Media);
        let result = prepare(
            &ticket,
            Command::AddComment {
                text: String::from("Obrigado"),
                internal: false,
            },
            Role::Master,
        );

        assert_eq!(
            result,
            Err(CoreError::DomainViolation(DomainError::TicketFinalized {
                action: String::from("comment on"),
                status,
            }))
        );
    }
}

#[test]
fn test_edit_trims_fields() {
    let ticket = create_test_ticket(1, TicketStatus::InProgress, Priority::Media);
    let command = Command::Edit {
        title: Some(String::from("  Impressora do RH parada  ")),
        description: None,
    };

    let request = prepare(&ticket, command, Role::Operator).unwrap();

    assert_eq!(
        request,
        PreparedRequest::Edit(EditRequest {
            title: Some(String::from("Impressora do RH parada")),
            description: None,
        })
    );
    let PreparedRequest::Edit(body) = request else {
        unreachable!();
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "title": "Impressora do RH parada" })
    );
}

#[test]
fn test_edit_of_closed_or_cancelled_ticket_is_refused() {
    for status in [TicketStatus::Closed, TicketStatus::Cancelled] {
        let ticket = create_test_ticket(1, status, Priority::Media);
        let command = Command::Edit {
            title: Some(String::from("Novo título")),
            description: None,
        };

        assert!(matches!(
            prepare(&ticket, command, Role::Master),
            Err(CoreError::DomainViolation(DomainError::TicketFinalized { .. }))
        ));
    }
}

#[test]
fn test_empty_edit_is_refused() {
    let ticket = create_test_ticket(1, TicketStatus::Open, Priority::Media);

    let nothing = prepare(
        &ticket,
        Command::Edit {
            title: None,
            description: None,
        },
        Role::Master,
    );
    let Err(CoreError::DomainViolation(DomainError::ValidationFailed { errors })) = nothing else {
        panic!("unexpected result: {nothing:?}");
    };
    assert_eq!(errors[0].field, "ticket");

    let blank_title = prepare(
        &ticket,
        Command::Edit {
            title: Some(String::from("   ")),
            description: Some(String::new()),
        },
        Role::Master,
    );
    let Err(CoreError::DomainViolation(DomainError::ValidationFailed { errors })) = blank_title
    else {
        panic!("unexpected result: {blank_title:?}");
    };
    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "description"]);
    assert_eq!(errors[0].message, "Título não pode estar vazio");
}

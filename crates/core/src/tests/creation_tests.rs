// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_category, create_test_draft};
use crate::{CoreError, prepare_external_ticket, prepare_new_ticket};
use helpdesk_domain::{Category, DomainError, Priority, Role, TicketStatus};

#[test]
fn test_new_ticket_inherits_category_priority() {
    let categories: Vec<Category> = vec![
        create_test_category("cat-1", Priority::Baixa),
        create_test_category("cat-2", Priority::Critica),
    ];
    let draft = create_test_draft(Some("cat-2"));

    let request = prepare_new_ticket(&draft, &categories, Role::Operator).unwrap();

    assert_eq!(request.category_id, "cat-2");
    assert_eq!(request.priority, Priority::Critica);
    assert_eq!(request.status, TicketStatus::Open);
    assert_eq!(request.title, "Impressora do financeiro parada");
}

#[test]
fn test_new_ticket_collects_all_field_errors() {
    let categories: Vec<Category> = vec![create_test_category("cat-1", Priority::Media)];
    let mut draft = create_test_draft(None);
    draft.title = String::from("   ");
    draft.client.email = String::from("maria@");

    let result = prepare_new_ticket(&draft, &categories, Role::Master);

    let Err(CoreError::DomainViolation(DomainError::ValidationFailed { errors })) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "client.email", "categoryId"]);
}

#[test]
fn test_master_only_category_is_unavailable_to_operator() {
    let mut category = create_test_category("cat-1", Priority::Alta);
    category.is_master_only = true;
    let categories: Vec<Category> = vec![category];
    let draft = create_test_draft(Some("cat-1"));

    assert_eq!(
        prepare_new_ticket(&draft, &categories, Role::Operator),
        Err(CoreError::DomainViolation(DomainError::CategoryUnavailable {
            category_id: String::from("cat-1"),
        }))
    );
    assert!(prepare_new_ticket(&draft, &categories, Role::Master).is_ok());
}

#[test]
fn test_inactive_category_is_unavailable() {
    let mut category = create_test_category("cat-1", Priority::Alta);
    category.is_active = false;
    let draft = create_test_draft(Some("cat-1"));

    assert!(matches!(
        prepare_new_ticket(&draft, &[category], Role::Master),
        Err(CoreError::DomainViolation(
            DomainError::CategoryUnavailable { .. }
        ))
    ));
}

#[test]
fn test_external_ticket_needs_no_category() {
    let draft = create_test_draft(None);

    let request = prepare_external_ticket(&draft).unwrap();

    assert_eq!(request.status, TicketStatus::Uncategorized);
}

#[test]
fn test_external_ticket_still_validates_client() {
    let mut draft = create_test_draft(None);
    draft.client.name = String::new();

    let result = prepare_external_ticket(&draft);

    let Err(CoreError::DomainViolation(DomainError::ValidationFailed { errors })) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "client.name");
}

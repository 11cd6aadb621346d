// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_ticket;
use crate::{
    CategoryDraft, DepartmentDraft, DomainError, Priority, QueueDraft, ResponseTemplate, Role,
    TemplateCategory, TemplateDraft, TemplateVariables, UserAccount, UserChanges, UserDraft,
    validate_category_draft, validate_department_draft, validate_password, validate_queue_draft,
    validate_template_draft, validate_user_changes, validate_user_draft,
};

fn error_fields(result: Result<(), DomainError>) -> Vec<String> {
    match result {
        Err(DomainError::ValidationFailed { errors }) => {
            errors.into_iter().map(|error| error.field).collect()
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

fn user_draft() -> UserDraft {
    UserDraft {
        display_name: String::from("Ana"),
        name: None,
        email: String::from("ana@empresa.com.br"),
        password: String::from("segredo"),
        role: Role::Operator,
        department_id: None,
    }
}

#[test]
fn test_user_draft_rules() {
    assert!(validate_user_draft(&user_draft()).is_ok());

    let draft = UserDraft {
        display_name: String::from("  "),
        email: String::from("ana@"),
        password: String::from("12345"),
        ..user_draft()
    };
    assert_eq!(
        error_fields(validate_user_draft(&draft)),
        vec!["displayName", "email", "password"]
    );
}

#[test]
fn test_password_needs_six_characters() {
    assert!(validate_password("newPassword", "123456").is_ok());
    assert_eq!(
        error_fields(validate_password("newPassword", "12345")),
        vec!["newPassword"]
    );
}

#[test]
fn test_user_draft_debug_hides_password() {
    let rendered: String = format!("{:?}", user_draft());
    assert!(!rendered.contains("segredo"));
}

#[test]
fn test_user_draft_sends_null_department() {
    let json = serde_json::to_value(user_draft().normalized()).unwrap();
    assert_eq!(json["departmentId"], serde_json::Value::Null);
    assert_eq!(json["role"], "operator");
    assert!(json.get("name").is_none());
}

#[test]
fn test_empty_user_changes_are_refused() {
    assert_eq!(
        error_fields(validate_user_changes(&UserChanges::default())),
        vec!["user"]
    );

    let changes = UserChanges {
        email: Some(String::from("sem-arroba")),
        ..UserChanges::default()
    };
    assert_eq!(error_fields(validate_user_changes(&changes)), vec!["email"]);

    let changes = UserChanges {
        role: Some(Role::Master),
        ..UserChanges::default()
    };
    assert!(validate_user_changes(&changes).is_ok());
}

#[test]
fn test_category_draft_rules() {
    let draft = CategoryDraft::new("TI", "Suporte", "Impressoras");
    assert!(validate_category_draft(&draft).is_ok());

    let mut draft = CategoryDraft::new("TI", " ", "");
    draft.sla.first_response_hours = 0.25;
    draft.sla.resolution_hours = f64::NAN;
    assert_eq!(
        error_fields(validate_category_draft(&draft)),
        vec![
            "type",
            "system",
            "sla.firstResponseHours",
            "sla.resolutionHours"
        ]
    );
}

#[test]
fn test_category_draft_uses_backend_names() {
    let json = serde_json::to_value(CategoryDraft::new("TI", "Suporte", "ERP")).unwrap();
    assert_eq!(json["type"], "Suporte");
    assert_eq!(json["sla"]["firstResponseHours"], 4.0);
    assert_eq!(json["allowManualCreation"], true);
}

#[test]
fn test_department_code_is_upper_cased() {
    let mut draft = DepartmentDraft::new(" suporte ", "Suporte Técnico");
    draft.email = Some(String::from("  "));
    let normalized = draft.normalized();

    assert_eq!(normalized.name, "SUPORTE");
    assert_eq!(normalized.email, None);
    assert_eq!(normalized.color, "#3b82f6");
    assert!(validate_department_draft(&normalized).is_ok());

    draft.email = Some(String::from("suporte"));
    assert_eq!(error_fields(validate_department_draft(&draft)), vec!["email"]);
}

#[test]
fn test_queue_needs_a_name() {
    assert_eq!(
        error_fields(validate_queue_draft(&QueueDraft::default())),
        vec!["name"]
    );
}

#[test]
fn test_template_requires_name_title_and_content() {
    assert_eq!(
        error_fields(validate_template_draft(&TemplateDraft::default())),
        vec!["name", "shortTitle", "content"]
    );
}

#[test]
fn test_template_decodes_unknown_category_as_other() {
    let template: ResponseTemplate = serde_json::from_str(
        r#"{"_id":"tpl-1","name":"Boas-vindas","shortTitle":"Olá","content":"Olá {{cliente}}","category":"marketing"}"#,
    )
    .unwrap();
    assert_eq!(template.category, TemplateCategory::Outros);
    assert_eq!(template.title(), "Olá");
    assert!(template.is_active);

    let template: ResponseTemplate =
        serde_json::from_str(r#"{"_id":"tpl-2","name":"Encerramento","category":"encerramento"}"#)
            .unwrap();
    assert_eq!(template.category, TemplateCategory::Encerramento);
    assert_eq!(template.title(), "Encerramento");
}

#[test]
fn test_template_variables_for_ticket() {
    let operator = UserAccount {
        id: String::from("u-1"),
        email: String::from("op@empresa.com.br"),
        display_name: None,
        role: Role::Operator,
        is_active: true,
    };
    let mut ticket = create_test_ticket(1042, Priority::Alta, 5);

    let variables = TemplateVariables::for_ticket(&ticket, &operator);
    assert_eq!(variables.cliente, "Maria Souza");
    assert_eq!(variables.ticket, "1042");
    assert_eq!(variables.operador, "op@empresa.com.br");

    ticket.client.name = String::from(" ");
    assert_eq!(
        TemplateVariables::for_ticket(&ticket, &operator).cliente,
        "Cliente"
    );
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::test_session;
use super::test_backend::{PASSWORD, TOKEN, spawn_backend};
use crate::{
    AdvancedSearch, ApiErrorKind, ClientConfig, ExportFilter, ExportFormat, FALLBACK_MESSAGE,
    HelpdeskClient, SortOrder,
};
use axum::http::Method;
use helpdesk::{AdminCommand, EditRequest, StatusChangeRequest, prepare_admin};
use helpdesk_domain::{
    Priority, QueueDraft, Role, SlaStatus, TemplateCategory, TemplateVariables, TicketStatus,
};
use serde_json::json;
use std::time::Duration;
use time::macros::date;

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_login_opens_session() {
    let (client, _) = spawn_backend(TIMEOUT).await;

    let session = client.login(" ana@example.com ", PASSWORD).await.unwrap();

    assert_eq!(session.token(), TOKEN);
    assert_eq!(session.role(), Role::Operator);
    assert_eq!(session.user().name(), "Ana");
}

#[tokio::test]
async fn test_login_rejection_is_invalid_credentials() {
    let (client, _) = spawn_backend(TIMEOUT).await;

    let err = client.login("ana@example.com", "errada").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::InvalidCredentials);
    assert_eq!(err.message, "Email ou senha incorretos");
    assert_eq!(err.status, 401);
}

#[tokio::test]
async fn test_resume_reads_wrapped_user() {
    let (client, _) = spawn_backend(TIMEOUT).await;

    let session = client.resume(TOKEN).await.unwrap();

    assert_eq!(session.role(), Role::Master);
    assert_eq!(session.token(), TOKEN);
}

#[tokio::test]
async fn test_unauthorized_outside_login_expires_session() {
    let (client, _) = spawn_backend(TIMEOUT).await;

    let err = client.resume("stale-token").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::SessionExpired);
    assert!(err.is_session_expired());
    assert_eq!(err.message, "Token inválido");
}

#[tokio::test]
async fn test_queue_tickets_decodes_snapshot() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);

    let queues = client.queues(&session).await.unwrap();
    let snapshot = client.queue_tickets(&session, "todos").await.unwrap();

    assert_eq!(queues.len(), 2);
    assert_eq!(queues[0].title(), "Meus Tickets");
    assert_eq!(snapshot.tickets.len(), 2);
    assert_eq!(snapshot.tickets[1].status, TicketStatus::InProgress);
    assert_eq!(snapshot.tickets[1].priority, Priority::Critica);
    assert_eq!(snapshot.stats.sla_at_risk, 1);
}

#[tokio::test]
async fn test_status_change_sends_bearer_and_body() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);
    let request = StatusChangeRequest {
        status: TicketStatus::Resolved,
        description: String::from("Toner substituído e testado"),
    };

    client.change_status(&session, "t-7", &request).await.unwrap();

    let recorded = state.last();
    assert_eq!(recorded.path, "/tickets/t-7/status");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer tok-1"));
    assert_eq!(
        recorded.body,
        json!({ "status": "resolvido", "description": "Toner substituído e testado" })
    );
}

#[tokio::test]
async fn test_backend_refusal_carries_field_errors() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);
    let request = StatusChangeRequest {
        status: TicketStatus::Reopened,
        description: String::from("Cliente voltou a reclamar"),
    };

    let err = client
        .change_status(&session, "t-closed", &request)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.message, "Transição inválida");
    assert_eq!(err.errors, vec![String::from("status: ticket fechado")]);
}

#[tokio::test]
async fn test_missing_ticket_uses_status_message() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);

    let err = client.ticket(&session, "t-404").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message, "Recurso não encontrado.");
}

#[tokio::test]
async fn test_service_unavailable_message() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);

    let err = client.dashboard_stats(&session).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.message, "Serviço indisponível. Tente mais tarde.");
    assert_eq!(err.status, 503);
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);

    let err = client.comments(&session, "t-1").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Decode);
    assert_eq!(err.status, 200);
}

#[tokio::test]
async fn test_created_ticket_is_unwrapped() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);
    let request = helpdesk::NewTicketRequest {
        title: String::from("Servidor de arquivos lento"),
        description: String::from("Acesso demora minutos"),
        client: helpdesk_domain::ClientInfo {
            name: String::from("Maria Souza"),
            email: String::from("maria@example.com"),
            company: None,
            phone: None,
        },
        category_id: String::from("cat-1"),
        priority: Priority::Alta,
        status: TicketStatus::Open,
    };

    let ticket = client.create_ticket(&session, &request).await.unwrap();

    assert_eq!(ticket.ticket_number, 99);
    assert_eq!(ticket.title, "Servidor de arquivos lento");
}

#[tokio::test]
async fn test_categories_accept_both_shapes() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);

    let all = client.categories(&session).await.unwrap();
    let for_creation = client.categories_for_creation(&session).await.unwrap();

    assert_eq!(all, for_creation);
    assert_eq!(all[0].default_priority, Priority::Alta);
}

#[tokio::test]
async fn test_operators_keeps_active_staff_only() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);

    let operators = client.operators(&session).await.unwrap();

    let ids: Vec<&str> = operators.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, vec!["u-1", "u-4"]);
}

#[tokio::test]
async fn test_export_passes_filters() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);
    let filter = ExportFilter {
        status: Some(TicketStatus::Closed),
        priority: None,
        department: Some(String::from("TI")),
        start_date: Some(date!(2026-03-01)),
        end_date: Some(date!(2026-03-31)),
    };

    let bytes = client
        .export(&session, ExportFormat::Csv, &filter)
        .await
        .unwrap();

    assert_eq!(bytes, b"numero,titulo\n1,Impressora\n");
    let recorded = state.last();
    assert_eq!(recorded.path, "/tickets/export/csv");
    assert_eq!(recorded.query.get("status").map(String::as_str), Some("fechado"));
    assert_eq!(recorded.query.get("department").map(String::as_str), Some("TI"));
    assert_eq!(recorded.query.get("startDate").map(String::as_str), Some("2026-03-01"));
    assert_eq!(recorded.query.get("endDate").map(String::as_str), Some("2026-03-31"));
    assert!(!recorded.query.contains_key("priority"));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let (client, _) = spawn_backend(Duration::from_millis(200)).await;
    let session = test_session(Role::Operator);

    let err = client.queue_tickets(&session, "lenta").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Timeout);
    assert_eq!(err.message, "A requisição demorou muito. Tente novamente.");
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HelpdeskClient::new(&ClientConfig::new(format!("http://{addr}/api"))).unwrap();

    let err = client.login("ana@example.com", PASSWORD).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn test_unknown_status_falls_back() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);
    let prepared = prepare_admin(
        AdminCommand::CreateQueue(QueueDraft {
            name: String::from("vip"),
            ..QueueDraft::default()
        }),
        Role::Master,
    )
    .unwrap();

    let err = client.administer(&session, &prepared).await.unwrap_err();

    // Only GET is routed for the queue list, so the POST gets a 405.
    assert_eq!(err.status, 405);
    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.message, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_edit_and_delete_hit_the_ticket_route() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);
    let edit = EditRequest {
        title: Some(String::from("Impressora do 2º andar")),
        description: None,
    };

    client.edit_ticket(&session, "t-7", &edit).await.unwrap();
    let recorded = state.last();
    assert_eq!(recorded.method, Method::PATCH);
    assert_eq!(recorded.path, "/tickets/t-7");
    assert_eq!(recorded.body, json!({ "title": "Impressora do 2º andar" }));

    client.delete_ticket(&session, "t-7").await.unwrap();
    let recorded = state.last();
    assert_eq!(recorded.method, Method::DELETE);
    assert_eq!(recorded.path, "/tickets/t-7");
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn test_advanced_search_sends_only_set_filters() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);
    let search = AdvancedSearch {
        text: Some(String::from("  impressora ")),
        client_name: Some(String::from("   ")),
        statuses: vec![TicketStatus::Open, TicketStatus::InProgress],
        date_from: Some(date!(2026 - 03 - 01)),
        sla_status: Some(SlaStatus::Within),
        has_attachments: Some(false),
        sort_order: Some(SortOrder::Asc),
        ..AdvancedSearch::default()
    };

    let page = client.search_advanced(&session, &search).await.unwrap();

    assert_eq!(page.tickets.len(), 1);
    assert_eq!(page.pagination.map(|p| p.total), Some(1));
    assert_eq!(
        state.last().body,
        json!({
            "text": "impressora",
            "statuses": ["aberto", "em-andamento"],
            "dateFrom": "2026-03-01",
            "slaStatus": "ok",
            "hasAttachments": false,
            "sortOrder": "asc"
        })
    );
}

#[tokio::test]
async fn test_template_is_filled_by_the_backend() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Operator);

    let templates = client.templates(&session).await.unwrap();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].category, TemplateCategory::Saudacao);

    let by_shortcut = client.template_by_shortcut(&session, "ola").await.unwrap();
    assert_eq!(by_shortcut.id, "tpl-1");
    let missing = client
        .template_by_shortcut(&session, "nada")
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ApiErrorKind::NotFound);

    let variables = TemplateVariables {
        cliente: String::from("Maria Souza"),
        ticket: String::from("1042"),
        operador: String::from("Ana"),
    };
    let content = client
        .use_template(&session, "tpl-1", &variables)
        .await
        .unwrap();

    assert_eq!(content, "Olá Maria Souza, recebemos o chamado #1042.");
    assert_eq!(state.last().body["variables"]["operador"], "Ana");
}

#[tokio::test]
async fn test_admin_commands_use_their_routes() {
    let (client, state) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);
    let cases: Vec<(AdminCommand, Method, &str, serde_json::Value)> = vec![
        (
            AdminCommand::ResetPassword {
                id: String::from("u-2"),
                new_password: String::from("nova-senha"),
            },
            Method::POST,
            "/admin/users/u-2/reset-password",
            json!({ "newPassword": "nova-senha" }),
        ),
        (
            AdminCommand::ToggleUserActive {
                id: String::from("u-2"),
            },
            Method::PATCH,
            "/admin/users/u-2/toggle-active",
            serde_json::Value::Null,
        ),
        (
            AdminCommand::DeleteUser {
                id: String::from("u-2"),
            },
            Method::DELETE,
            "/admin/users/u-2",
            serde_json::Value::Null,
        ),
        (
            AdminCommand::ReorderDepartments {
                order: vec![String::from("dep-2"), String::from("dep-1")],
            },
            Method::PATCH,
            "/departments/reorder",
            json!({ "order": ["dep-2", "dep-1"] }),
        ),
        (
            AdminCommand::SetDepartmentActive {
                id: String::from("dep-2"),
                active: true,
            },
            Method::PATCH,
            "/departments/dep-2",
            json!({ "isActive": true }),
        ),
    ];

    for (command, method, path, body) in cases {
        let prepared = prepare_admin(command, Role::Master).unwrap();
        client.administer(&session, &prepared).await.unwrap();

        let recorded = state.last();
        assert_eq!(recorded.method, method, "{path}");
        assert_eq!(recorded.path, path);
        assert_eq!(recorded.body, body, "{path}");
    }
}

#[tokio::test]
async fn test_all_departments_include_inactive() {
    let (client, _) = spawn_backend(TIMEOUT).await;
    let session = test_session(Role::Master);

    let departments = client.all_departments(&session).await.unwrap();

    assert_eq!(departments.len(), 2);
    assert!(!departments[1].is_active);
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalized errors for every call made against the backend.
//!
//! Transport failures, HTTP error statuses and client-side refusals all end
//! up as an [`ApiError`] carrying a user-facing message. Messages are in the
//! console's language (pt-BR); `Display` shows the message unchanged.

use helpdesk::CoreError;
use helpdesk_domain::DomainError;
use serde::Deserialize;

/// Notice shown when a 401 forces the user back to the login prompt.
pub const SESSION_EXPIRED_NOTICE: &str = "Sessão expirada. Faça login novamente.";

/// Fallback when neither the body nor the status table yields a message.
pub const FALLBACK_MESSAGE: &str = "Erro ao processar requisição";

/// Category of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The request could not reach the backend.
    Network,
    /// The backend did not answer within the configured timeout.
    Timeout,
    /// 401 on the login route.
    InvalidCredentials,
    /// 401 on any other route. The session must be discarded.
    SessionExpired,
    /// 403.
    Forbidden,
    /// 400, 422 and other unclassified 4xx answers.
    Validation,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 429.
    RateLimited,
    /// 5xx.
    Server,
    /// A success response whose body could not be decoded.
    Decode,
    /// Refused by the client-side guard; nothing was sent.
    Rejected,
}

impl ApiErrorKind {
    /// Classifies an HTTP error status.
    #[must_use]
    pub const fn from_status(status: u16, login_route: bool) -> Self {
        match status {
            401 if login_route => Self::InvalidCredentials,
            401 => Self::SessionExpired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Validation,
        }
    }
}

/// A failed call, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// User-facing message.
    pub message: String,
    /// Per-field messages, when the backend or the guard supplied them.
    pub errors: Vec<String>,
    /// HTTP status, or 0 when no response was received.
    pub status: u16,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// The parts of an error body the console understands.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

fn default_status_message(status: u16) -> Option<&'static str> {
    let message: &'static str = match status {
        400 => "Dados inválidos. Verifique as informações.",
        401 => "Credenciais inválidas.",
        403 => "Você não tem permissão para esta ação.",
        404 => "Recurso não encontrado.",
        409 => "Conflito de dados.",
        422 => "Dados inválidos.",
        429 => "Muitas requisições. Aguarde um momento.",
        500 => "Erro interno do servidor. Tente novamente.",
        502 => "Servidor temporariamente indisponível.",
        503 => "Serviço indisponível. Tente mais tarde.",
        _ => return None,
    };
    Some(message)
}

/// Field errors arrive either as plain strings or as objects carrying
/// `msg`/`message` (optionally with a `path`/`field`).
fn field_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Object(object) => {
            let text: Option<&str> = object
                .get("msg")
                .or_else(|| object.get("message"))
                .and_then(serde_json::Value::as_str);
            let field: Option<&str> = object
                .get("path")
                .or_else(|| object.get("field"))
                .and_then(serde_json::Value::as_str);
            match (field, text) {
                (Some(field), Some(text)) => format!("{field}: {text}"),
                (None, Some(text)) => text.to_string(),
                _ => value.to_string(),
            }
        }
        other => other.to_string(),
    }
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: Vec::new(),
            status: 0,
        }
    }

    /// The request timed out.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(
            ApiErrorKind::Timeout,
            "A requisição demorou muito. Tente novamente.",
        )
    }

    /// The backend could not be reached at all.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(
            ApiErrorKind::Network,
            "Sem conexão com o servidor. Verifique sua internet.",
        )
    }

    /// Any other failure before a response was received.
    #[must_use]
    pub fn connection() -> Self {
        Self::new(ApiErrorKind::Network, "Erro de conexão. Verifique sua internet.")
    }

    /// A success response could not be decoded.
    #[must_use]
    pub fn decode(status: u16, detail: &str) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: FALLBACK_MESSAGE.to_string(),
            errors: vec![detail.to_string()],
            status,
        }
    }

    /// Classifies a transport error raised by the HTTP client.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout()
        } else if err.is_connect() {
            Self::unreachable()
        } else if err.is_decode() {
            Self::decode(err.status().map_or(0, |status| status.as_u16()), &err.to_string())
        } else {
            Self::connection()
        }
    }

    /// Normalizes an HTTP error response.
    ///
    /// The message is the body's `error` field, then its `message` field,
    /// then the default for the status, then [`FALLBACK_MESSAGE`].
    #[must_use]
    pub fn from_response(status: u16, body: &[u8], login_route: bool) -> Self {
        let body: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message: String = body
            .error
            .or(body.message)
            .or_else(|| default_status_message(status).map(ToString::to_string))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        Self {
            kind: ApiErrorKind::from_status(status, login_route),
            message,
            errors: body.errors.iter().map(field_message).collect(),
            status,
        }
    }

    /// Returns true if the caller must drop its session and log in again.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        self.kind == ApiErrorKind::SessionExpired
    }
}

/// Translates a domain error into a client-side refusal.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::ValidationFailed { errors } => ApiError {
            kind: ApiErrorKind::Rejected,
            message: String::from("Dados inválidos. Verifique as informações."),
            errors: errors.iter().map(ToString::to_string).collect(),
            status: 0,
        },
        DomainError::InvalidStatusTransition { from, to, .. } => ApiError::new(
            ApiErrorKind::Rejected,
            format!(
                "Não é possível mudar de \"{}\" para \"{}\".",
                from.label(),
                to.label()
            ),
        ),
        DomainError::MissingJustification { .. } => {
            ApiError::new(ApiErrorKind::Rejected, "Informe uma justificativa.")
        }
        DomainError::JustificationTooShort {
            target, minimum, ..
        } => ApiError::new(
            ApiErrorKind::Rejected,
            format!(
                "A justificativa para \"{}\" deve ter pelo menos {minimum} caracteres.",
                target.label()
            ),
        ),
        DomainError::TicketFinalized { action, status } => {
            let message: String = if action == "comment on" {
                String::from("Não é possível comentar em chamados finalizados.")
            } else {
                format!(
                    "Chamados com status \"{}\" não podem ser alterados.",
                    status.label()
                )
            };
            ApiError::new(ApiErrorKind::Rejected, message)
        }
        DomainError::CategoryUnavailable { .. } => ApiError::new(
            ApiErrorKind::Rejected,
            "Categoria indisponível para criação de tickets.",
        ),
        DomainError::InvalidStatus { status } => {
            ApiError::new(ApiErrorKind::Rejected, format!("Status inválido: {status}"))
        }
        DomainError::InvalidPriority { priority } => ApiError::new(
            ApiErrorKind::Rejected,
            format!("Prioridade inválida: {priority}"),
        ),
        DomainError::InvalidRole { role } => {
            ApiError::new(ApiErrorKind::Rejected, format!("Perfil inválido: {role}"))
        }
    }
}

/// Translates a core error into a client-side refusal.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PermissionDenied { .. } => ApiError::new(
            ApiErrorKind::Rejected,
            "Você não tem permissão para esta ação.",
        ),
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

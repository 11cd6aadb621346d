// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_api::ApiError;

/// Errors that end a console command.
#[derive(Debug)]
pub enum ConsoleError {
    /// A backend call or a client-side guard failed.
    Api(ApiError),
    /// The command needs a session and no token was given.
    NotLoggedIn,
    /// The backend returned no queue to show.
    NoQueue,
    /// Polling stopped after repeated failures.
    PollingStopped {
        /// Consecutive failures observed.
        failures: u32,
        /// The last failure.
        last: ApiError,
    },
    /// Writing command output failed.
    Io {
        /// Destination being written.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::NotLoggedIn => write!(
                f,
                "Nenhuma sessão ativa. Execute `helpdesk login` e defina HELPDESK_TOKEN."
            ),
            Self::NoQueue => write!(f, "Nenhuma fila disponível."),
            Self::PollingStopped { failures, last } => write!(
                f,
                "Atualização automática pausada após {failures} erros seguidos: {last}"
            ),
            Self::Io { path, source } => write!(f, "Falha ao gravar {path}: {source}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(err) | Self::PollingStopped { last: err, .. } => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::NotLoggedIn | Self::NoQueue => None,
        }
    }
}

impl From<ApiError> for ConsoleError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

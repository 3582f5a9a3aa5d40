use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::request::RequestStatus;
use crate::validation::rules;

/// Serializable error body handed to the presentation layer.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Unauthorized(String),
    #[error("leave request {id} is already {}", .status.as_str())]
    InvalidTransition { id: String, status: RequestStatus },
    #[error("transport error: {0}")]
    Transport(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn invalid_transition(id: impl ToString, status: RequestStatus) -> Self {
        AppError::InvalidTransition {
            id: id.to_string(),
            status,
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InvalidTransition { .. } => "INVALID_TRANSITION",
            AppError::Transport(_) => "TRANSPORT_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = err.code().to_string();
        let (error, details) = match err {
            AppError::Validation { field, message } => (
                "Validation failed".to_string(),
                Some(serde_json::json!({ "field": field, "message": message })),
            ),
            AppError::NotFound { entity, id } => (
                err.to_string(),
                Some(serde_json::json!({ "entity": entity, "id": id })),
            ),
            AppError::Unauthorized(msg) => (msg.clone(), None),
            AppError::InvalidTransition { id, status } => (
                err.to_string(),
                Some(serde_json::json!({ "id": id, "status": status })),
            ),
            AppError::Transport(inner) => {
                tracing::error!("Transport error: {:?}", inner);
                ("Transport error".to_string(), None)
            }
        };

        ErrorResponse {
            error,
            code,
            details,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        ErrorResponse::from(&err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Transport(err)
    }
}

/// Keeps only the first failing field, picked by `rules::FIELD_ORDER` and then
/// by name so the choice is deterministic.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let mut names: Vec<&str> = fields.keys().map(|name| name.as_ref()).collect();
        names.sort_by_key(|name| {
            let rank = rules::FIELD_ORDER
                .iter()
                .position(|known| known == name)
                .unwrap_or(rules::FIELD_ORDER.len());
            (rank, *name)
        });

        let first = names.first().and_then(|name| {
            fields
                .get(*name)
                .and_then(|errs| errs.first())
                .map(|e| (name.to_string(), e.code.to_string()))
        });
        match first {
            Some((field, code)) => AppError::Validation {
                field,
                message: code,
            },
            None => AppError::validation("payload", "invalid"),
        }
    }
}

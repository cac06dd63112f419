//! # API Error Type
//!
//! Unified error type for desktop commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Factura                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ── ValidationError ──► ApiError (Spanish msg) │  │
//! │  │         │                                   shown in the inline  │  │
//! │  │         ▼                                   error area           │  │
//! │  │  Database Error? ──── DbError ───────────► ApiError (lookup only)│  │
//! │  │         │             (create_order logs and swallows these)     │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are in the user's language (Spanish); codes are for programs.

use serde::Serialize;

use crate::render::SinkError;
use factura_core::ValidationError;
use factura_db::DbError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Cédula es requerido"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// The invoice could not be handed to the rendering sink
    RenderError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} no encontrado: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Maps a validation failure to the message shown in the form.
///
/// ## Messages
/// ```text
/// id_card  (required / too short)      → "Cédula es requerido"
/// customer / products (required)       → "Cliente y productos son requeridos"
/// name / price / qty (required)        → "Nombre, precio, y cantidad es requerido"
/// price / qty (negative)               → "Precio y cantidad deben ser positivos"
/// line or invoice total out of range   → "Monto demasiado grande"
/// price / qty / date (bad format)      → field specific message
/// ```
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = match (&err, err.field()) {
            (ValidationError::Required { .. } | ValidationError::TooShort { .. }, "id_card") => {
                "Cédula es requerido".to_string()
            }
            (ValidationError::Required { .. }, "customer" | "products") => {
                "Cliente y productos son requeridos".to_string()
            }
            (ValidationError::Required { .. }, "name" | "price" | "qty") => {
                "Nombre, precio, y cantidad es requerido".to_string()
            }
            (ValidationError::MustBePositive { .. }, _) => {
                "Precio y cantidad deben ser positivos".to_string()
            }
            (ValidationError::TooLarge { .. }, _) => "Monto demasiado grande".to_string(),
            (ValidationError::InvalidFormat { .. }, "price") => "Precio inválido".to_string(),
            (ValidationError::InvalidFormat { .. }, "qty") => "Cantidad inválida".to_string(),
            (ValidationError::InvalidFormat { .. }, "date") => "Fecha inválida".to_string(),
            _ => err.to_string(),
        };

        ApiError::validation(message)
    }
}

/// Converts database errors to API errors.
///
/// Details go to the log; the user gets a generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' ya existe", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Referencia inválida")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "No se pudo conectar a la base de datos")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "No se pudo preparar la base de datos")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Base de datos ocupada")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Error de base de datos")
            }
        }
    }
}

impl From<SinkError> for ApiError {
    fn from(err: SinkError) -> Self {
        tracing::error!(error = %err, "Invoice rendering failed");
        ApiError::new(ErrorCode::RenderError, "No se pudo generar la factura")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

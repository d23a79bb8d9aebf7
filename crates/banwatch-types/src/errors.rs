//! Lookup failure taxonomy.
//!
//! Every account lookup ends in exactly one `AccountRecord` or one
//! `LookupError`. The region resolver currently only produces
//! `AccountNotFound`; the remaining variants are kept so the command layer
//! can already render upstream failures distinct from "not found".

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("account not found in any region")]
    AccountNotFound,

    #[error("lookup service unavailable")]
    ServiceDown,

    #[error("lookup service internal error")]
    ServerError,

    #[error("lookup service refused access")]
    Forbidden,

    #[error("lookup service returned unexpected data")]
    DataError,

    #[error("lookup failed: {0}")]
    Exception(String),

    #[error("lookup service error: {0}")]
    Api(String),
}

impl LookupError {
    /// Stable symbolic name, used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            LookupError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            LookupError::ServiceDown => "API_SERVICE_DOWN",
            LookupError::ServerError => "API_SERVER_ERROR",
            LookupError::Forbidden => "API_FORBIDDEN",
            LookupError::DataError => "API_DATA_ERROR",
            LookupError::Exception(_) => "EXCEPTION",
            LookupError::Api(_) => "API_ERROR",
        }
    }
}

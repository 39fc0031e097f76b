use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::web::models::ErrorResponse;

pub const INVALID_INPUT_MESSAGE: &str = "Nema unesenog teksta.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Došlo je do greške u komunikaciji sa AI modelom.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Došlo je do tehničke greške. Pokušajte ponovo kasnije.";

/// Every way a relay request can fail.
///
/// The `Display` text is for logs only. Callers always get one of the fixed
/// messages above, so upstream details never leak out.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("prompt is missing or empty")]
    InvalidInput,

    #[error("upstream API returned status {status}")]
    Upstream { status: u16 },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::InvalidInput => INVALID_INPUT_MESSAGE,
            RelayError::Upstream { .. } => UPSTREAM_ERROR_MESSAGE,
            RelayError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.user_message().to_string(),
        })
    }
}

use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::RelayError;
use crate::model::GeminiModel;
use crate::web::models::{RelayRequest, RelayResponse};
use crate::AppState;

// Pre-flight: answered before any body is read
pub async fn preflight() -> impl Responder {
    HttpResponse::Ok().finish()
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat relay endpoint: forwards the prompt and the caller's history upstream
pub async fn relay(
    data: web::Data<AppState>,
    req: web::Json<RelayRequest>,
) -> Result<HttpResponse, RelayError> {
    let request_id = Uuid::new_v4();
    let RelayRequest { prompt, history } = req.into_inner();

    let prompt = match prompt {
        Some(Value::String(prompt)) if !prompt.is_empty() => prompt,
        _ => {
            info!("[{}] Rejected request without a prompt", request_id);
            return Err(RelayError::InvalidInput);
        }
    };
    let history = history.unwrap_or_default();

    info!(
        "[{}] Relay request: {} history turn(s), prompt of {} characters",
        request_id,
        history.len(),
        prompt.chars().count()
    );

    let request = GeminiModel::build_request(history, &prompt);

    match data.model.generate_response(&request, request_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(RelayResponse { response })),
        Err(e) => {
            if let RelayError::Internal(cause) = &e {
                error!("[{}] Relay failed: {:#}", request_id, cause);
            }
            Err(e)
        }
    }
}

use actix_web::{error::JsonPayloadError, http::Method, web, HttpRequest};
use log::error;

use crate::error::RelayError;
use crate::web::handlers;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(relay_resource("/"))
        .service(relay_resource("/chat-with-ai"))
        .route("/health", web::get().to(handlers::health_check));
}

fn relay_resource(path: &str) -> actix_web::Resource {
    web::resource(path)
        .route(web::method(Method::OPTIONS).to(handlers::preflight))
        .route(web::post().to(handlers::relay))
}

// Unreadable bodies are reported like any other internal failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .content_type_required(false)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            error!("Failed to parse relay request body: {}", err);
            RelayError::Internal(anyhow::anyhow!("invalid request body: {}", err)).into()
        })
}

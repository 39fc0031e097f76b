use actix_web::middleware::DefaultHeaders;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Client-Info, Apikey";

/// Stamps the cross-origin header set on every response, errors included.
pub fn headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", ALLOW_ORIGIN))
        .add(("Access-Control-Allow-Methods", ALLOW_METHODS))
        .add(("Access-Control-Allow-Headers", ALLOW_HEADERS))
}

use crate::consts;
use actix_cors::Cors;
use actix_web::http::header::{self, HeaderValue};
use log::warn;

fn origin_allowed(allowed_origins: &[String], origin: &HeaderValue) -> bool {
    let allowed = origin
        .to_str()
        .map(|o| allowed_origins.iter().any(|a| a == o))
        .unwrap_or(false);
    if !allowed {
        warn!("Blocked cross-origin request from {:?}", origin);
    }
    allowed
}

/// Origin allow-list filter. Requests without an `Origin` header pass
/// through; any other origin is rejected before reaching a handler.
pub fn cors(allowed_origins: Vec<String>) -> Cors {
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| origin_allowed(&allowed_origins, origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(consts::CORS_MAX_AGE)
}

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

pub mod config;
pub mod selection;

/// Registers every route; shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(config::get_langs)
        .service(config::get_catalog)
        .service(selection::select_get)
        .service(selection::select_post);
}

fn bad_request(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse { error })
}

fn accept_language(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
}

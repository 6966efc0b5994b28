use actix_web::{HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        service: "scribe-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

use std::io;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use scribe_llm::ProviderConfig;

use crate::handlers;
use crate::state::AppState;

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route(
                "/continue",
                web::post().to(handlers::continuation::handler),
            )
            .route("/health", web::get().to(handlers::health::handler)),
    );
}

pub async fn run_server_with_config(
    port: u16,
    provider_config: ProviderConfig,
) -> io::Result<()> {
    let state = AppState::from_config(&provider_config)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    let state = web::Data::new(state);

    log::info!("Starting scribe server on http://0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(api_config)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}

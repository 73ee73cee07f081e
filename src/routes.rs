use actix_web::web;

use crate::error::AppError;
use crate::handlers;

/// Registers the health check, the generic `/process` endpoint and the
/// per-mode endpoints. Expects a `web::Data<TextRouter>` on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(handlers::health::health_check))
        .route("/process", web::post().to(handlers::text_handlers::process_text))
        .route("/summarize", web::post().to(handlers::text_handlers::summarize))
        .route("/rewrite", web::post().to(handlers::text_handlers::rewrite))
        .route("/correct", web::post().to(handlers::text_handlers::correct))
        .route("/expand", web::post().to(handlers::text_handlers::expand))
        .route("/paraphrase", web::post().to(handlers::text_handlers::paraphrase));
}

/// Malformed request bodies get the same `{detail, error_type}` envelope as
/// every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid request body: {}", err)).into()
        })
}

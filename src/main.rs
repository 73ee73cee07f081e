use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::net::TcpListener;

use textcraft_server::config;
use textcraft_server::routes::configure_routes;
use textcraft_server::services::text_router::TextRouter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings; a missing provider credential ends here
    let app_settings = match config::init_config() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start server without valid settings");
            std::process::exit(1);
        }
    };

    // One router for the whole process, shared read-only by every worker
    let text_router = match TextRouter::from_settings(&app_settings) {
        Ok(router) => {
            log::info!("Text router initialized for provider {}", router.provider_name());
            web::Data::new(router)
        }
        Err(e) => {
            log::error!("Failed to initialize text router: {}", e);
            std::process::exit(1);
        }
    };

    let host = &app_settings.server.host;
    let port = app_settings.server.port;

    log::info!("Starting {} at http://{}:{}", app_settings.app.name, host, port);

    let listener = TcpListener::bind(format!("{}:{}", host, port))?;
    let cors_origins = app_settings.server.cors_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();

        if cors_origins.iter().any(|origin| origin == "*") {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors.allow_any_method().allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(text_router.clone())
            .configure(configure_routes)
    })
    .listen(listener)?
    .run()
    .await
}

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::text_router::TextRouter;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    provider: String,
}

pub async fn health_check(router: web::Data<TextRouter>) -> impl Responder {
    // Does not call the provider; only reports which one is configured.
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: router.provider_name().to_string(),
    };

    HttpResponse::Ok().json(response)
}

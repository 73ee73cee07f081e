use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Mode, ProcessRequest, ProcessResponse, TextRequest};
use crate::services::text_router::TextRouter;

/// `POST /process` with `{text, mode}`.
#[instrument(skip(payload, router), fields(mode = ?payload.mode))]
pub async fn process_text(
    payload: web::Json<ProcessRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    let ProcessRequest { text, mode } = payload.into_inner();
    let mode = Mode::from_request_value(mode.as_ref())?;

    let output = run(&router, mode, &text).await?;

    Ok(HttpResponse::Ok().json(ProcessResponse { mode, output }))
}

pub async fn summarize(
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    per_mode(Mode::Summarize, payload, router).await
}

pub async fn rewrite(
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    per_mode(Mode::Rewrite, payload, router).await
}

pub async fn correct(
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    per_mode(Mode::Correct, payload, router).await
}

pub async fn expand(
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    per_mode(Mode::Expand, payload, router).await
}

pub async fn paraphrase(
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    per_mode(Mode::Paraphrase, payload, router).await
}

/// Per-mode endpoints answer with a mode-named field, e.g. `{"summary": ...}`.
async fn per_mode(
    mode: Mode,
    payload: web::Json<TextRequest>,
    router: web::Data<TextRouter>,
) -> Result<HttpResponse, AppError> {
    let output = run(&router, mode, &payload.text).await?;

    let mut body = Map::new();
    body.insert(mode.response_field().to_string(), Value::String(output));

    Ok(HttpResponse::Ok().json(Value::Object(body)))
}

async fn run(router: &TextRouter, mode: Mode, text: &str) -> Result<String, AppError> {
    let request_id = Uuid::new_v4().to_string();
    let start_time = std::time::Instant::now();

    info!(
        request_id = %request_id,
        mode = %mode,
        text_length = text.len(),
        "Processing text request"
    );

    let output = router.process(mode, text).await?;

    info!(
        request_id = %request_id,
        output_length = output.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Text request completed"
    );

    Ok(output)
}

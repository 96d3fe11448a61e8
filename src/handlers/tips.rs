// src/handlers/tips.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::tips::{TipPage, TipStats},
};

// Gorjeta negativa não existe.
fn validate_not_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        let mut err = ValidationError::new("negative");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: lançamento de gorjeta
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTipPayload {
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 42.50)]
    pub amount: Decimal,
    #[schema(example = "2025-06-10")]
    pub date: NaiveDate,
    #[validate(length(max = 280, message = "A nota deve ter no máximo 280 caracteres."))]
    pub notes: Option<String>,
}

// ---
// Handler: POST /api/tips
// ---
#[utoipa::path(
    post,
    path = "/api/tips",
    tag = "Tips",
    request_body = AddTipPayload,
    responses((status = 201)),
    security(("api_jwt" = []))
)]
pub async fn add_tip(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AddTipPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let entry = app_state
        .tips_service
        .add_entry(user.0.id, payload.amount, payload.date, payload.notes.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// ---
// Handler: GET /api/tips?page=N
// ---
#[derive(Debug, Deserialize, IntoParams)]
pub struct TipPageQuery {
    pub page: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/tips",
    tag = "Tips",
    params(TipPageQuery),
    responses((status = 200, body = TipPage)),
    security(("api_jwt" = []))
)]
pub async fn list_tips(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<TipPageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .tips_service
        .page(&user.0, query.page.unwrap_or(1))
        .await?;
    Ok((StatusCode::OK, Json(page)))
}

// ---
// Handler: GET /api/tips/stats
// ---
#[utoipa::path(
    get,
    path = "/api/tips/stats",
    tag = "Tips",
    responses((status = 200, body = TipStats)),
    security(("api_jwt" = []))
)]
pub async fn tip_stats(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.tips_service.stats(&user.0).await?;
    Ok((StatusCode::OK, Json(stats)))
}

// src/handlers/installments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::installment::{InstallmentLine, MarkPaidPayload},
};

// POST /api/installments/{id}/pay
#[utoipa::path(
    post,
    path = "/api/installments/{id}/pay",
    tag = "Parcelas",
    params(("id" = Uuid, Path, description = "ID da parcela")),
    request_body(content = MarkPaidPayload, description = "Data do pagamento (padrão: hoje)"),
    responses(
        (status = 200, description = "Parcela paga", body = InstallmentLine),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn pay_installment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    payload: Option<Json<MarkPaidPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    // Corpo opcional: sem corpo = pago hoje
    let paid_date = payload.and_then(|Json(p)| p.paid_date);

    let line = app_state
        .installment_service
        .mark_paid(&app_state.db_pool, id, paid_date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(line)))
}

// POST /api/installments/{id}/unpay
#[utoipa::path(
    post,
    path = "/api/installments/{id}/unpay",
    tag = "Parcelas",
    params(("id" = Uuid, Path, description = "ID da parcela")),
    responses(
        (status = 200, description = "Parcela em aberto de novo", body = InstallmentLine),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn unpay_installment(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let line = app_state
        .installment_service
        .mark_unpaid(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(line)))
}

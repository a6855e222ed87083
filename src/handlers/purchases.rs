// src/handlers/purchases.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        installment::InstallmentLine,
        purchase::{PurchaseFilter, PurchasePage, PurchasePayload, PurchaseResponse},
    },
};

// =============================================================================
//  COMPRAS
// =============================================================================

// POST /api/purchases
#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "Compras",
    request_body = PurchasePayload,
    responses(
        (status = 201, description = "Compra registrada", body = PurchaseResponse),
        (status = 400, description = "Dados inválidos (ex.: crédito sem cartão)")
    )
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<PurchasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = app_state
        .purchase_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(PurchaseResponse::from(purchase))))
}

// GET /api/purchases
#[utoipa::path(
    get,
    path = "/api/purchases",
    tag = "Compras",
    params(PurchaseFilter),
    responses(
        (status = 200, description = "Página de compras + totais do filtro", body = PurchasePage)
    )
)]
pub async fn list_purchases(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<PurchaseFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .purchase_service
        .list(&app_state.db_pool, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/purchases/{id}
#[utoipa::path(
    get,
    path = "/api/purchases/{id}",
    tag = "Compras",
    params(("id" = Uuid, Path, description = "ID da compra")),
    responses(
        (status = 200, description = "Compra", body = PurchaseResponse),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn get_purchase(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = app_state
        .purchase_service
        .get(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PurchaseResponse::from(purchase))))
}

// PUT /api/purchases/{id}
#[utoipa::path(
    put,
    path = "/api/purchases/{id}",
    tag = "Compras",
    params(("id" = Uuid, Path, description = "ID da compra")),
    request_body = PurchasePayload,
    responses(
        (status = 200, description = "Compra atualizada", body = PurchaseResponse),
        (status = 400, description = "Dados inválidos ou parcelas já pagas"),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn update_purchase(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchasePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let purchase = app_state
        .purchase_service
        .update(&app_state.db_pool, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(PurchaseResponse::from(purchase))))
}

// DELETE /api/purchases/{id}
#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    tag = "Compras",
    params(("id" = Uuid, Path, description = "ID da compra")),
    responses(
        (status = 204, description = "Removida (com as parcelas)"),
        (status = 404, description = "Não encontrada")
    )
)]
pub async fn delete_purchase(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .purchase_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  CRONOGRAMA DA COMPRA
// =============================================================================

// GET /api/purchases/{id}/installments
#[utoipa::path(
    get,
    path = "/api/purchases/{id}/installments",
    tag = "Parcelas",
    params(("id" = Uuid, Path, description = "ID da compra")),
    responses(
        (status = 200, description = "Parcelas por número", body = Vec<InstallmentLine>),
        (status = 404, description = "Compra não encontrada")
    )
)]
pub async fn list_installments(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = app_state
        .installment_service
        .list(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lines)))
}

// POST /api/purchases/{id}/installments/generate
#[utoipa::path(
    post,
    path = "/api/purchases/{id}/installments/generate",
    tag = "Parcelas",
    params(("id" = Uuid, Path, description = "ID da compra")),
    responses(
        (status = 201, description = "Cronograma (re)gerado", body = Vec<InstallmentLine>),
        (status = 400, description = "Compra não é no crédito ou já tem parcela paga"),
        (status = 404, description = "Compra não encontrada")
    )
)]
pub async fn generate_installments(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = app_state
        .installment_service
        .generate(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lines)))
}

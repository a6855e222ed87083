// src/handlers/daily_sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::daily_sales::{DailySalesFilter, DailySalesPage, DailySalesPayload, DailySalesResponse},
};

// POST /api/daily-sales
#[utoipa::path(
    post,
    path = "/api/daily-sales",
    tag = "Vendas Diárias",
    request_body = DailySalesPayload,
    responses(
        (status = 201, description = "Vendas do dia lançadas", body = DailySalesResponse),
        (status = 400, description = "Valor negativo em algum canal"),
        (status = 409, description = "Já existe lançamento para a data; edite o existente")
    )
)]
pub async fn create_daily_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<DailySalesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .daily_sales_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(DailySalesResponse::from(entry))))
}

// GET /api/daily-sales
#[utoipa::path(
    get,
    path = "/api/daily-sales",
    tag = "Vendas Diárias",
    params(DailySalesFilter),
    responses(
        (status = 200, description = "Página de lançamentos + totais do período", body = DailySalesPage)
    )
)]
pub async fn list_daily_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<DailySalesFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .daily_sales_service
        .list(&app_state.db_pool, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/daily-sales/by-date/{date}
#[utoipa::path(
    get,
    path = "/api/daily-sales/by-date/{date}",
    tag = "Vendas Diárias",
    params(("date" = String, Path, description = "Data do lançamento (AAAA-MM-DD)")),
    responses(
        (status = 200, description = "Lançamento da data", body = DailySalesResponse),
        (status = 404, description = "Nenhum lançamento na data")
    )
)]
pub async fn get_daily_sales_by_date(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .daily_sales_service
        .get_by_date(date)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(DailySalesResponse::from(entry))))
}

// GET /api/daily-sales/{id}
#[utoipa::path(
    get,
    path = "/api/daily-sales/{id}",
    tag = "Vendas Diárias",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 200, description = "Lançamento", body = DailySalesResponse),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_daily_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .daily_sales_service
        .get(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(DailySalesResponse::from(entry))))
}

// PUT /api/daily-sales/{id}
#[utoipa::path(
    put,
    path = "/api/daily-sales/{id}",
    tag = "Vendas Diárias",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    request_body = DailySalesPayload,
    responses(
        (status = 200, description = "Lançamento atualizado", body = DailySalesResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Outra entrada já usa a data")
    )
)]
pub async fn update_daily_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<DailySalesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = app_state
        .daily_sales_service
        .update(&app_state.db_pool, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(DailySalesResponse::from(entry))))
}

// DELETE /api/daily-sales/{id}
#[utoipa::path(
    delete,
    path = "/api/daily-sales/{id}",
    tag = "Vendas Diárias",
    params(("id" = Uuid, Path, description = "ID do lançamento")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn delete_daily_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .daily_sales_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

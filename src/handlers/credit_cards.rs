// src/handlers/credit_cards.rs

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
        credit_card::{CreditCard, CreditCardFilter, CreditCardListItem, CreditCardPayload},
        lookup::LookupOption,
    },
};

// POST /api/credit-cards
#[utoipa::path(
    post,
    path = "/api/credit-cards",
    tag = "Cartões",
    request_body = CreditCardPayload,
    responses(
        (status = 201, description = "Cartão cadastrado", body = CreditCard),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreditCardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .credit_card_service
        .create(&app_state.db_pool, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(card)))
}

// GET /api/credit-cards
#[utoipa::path(
    get,
    path = "/api/credit-cards",
    tag = "Cartões",
    params(CreditCardFilter),
    responses(
        (status = 200, description = "Cartões com o uso dos últimos 30 dias", body = Vec<CreditCardListItem>)
    )
)]
pub async fn list_credit_cards(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<CreditCardFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = app_state
        .credit_card_service
        .list(&app_state.db_pool, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(cards)))
}

// GET /api/credit-cards/lookup
#[utoipa::path(
    get,
    path = "/api/credit-cards/lookup",
    tag = "Cartões",
    responses(
        (status = 200, description = "Cartões ativos para o formulário de compras", body = Vec<LookupOption>)
    )
)]
pub async fn lookup_credit_cards(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .credit_card_service
        .lookup()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(options)))
}

// GET /api/credit-cards/{id}
#[utoipa::path(
    get,
    path = "/api/credit-cards/{id}",
    tag = "Cartões",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Cartão", body = CreditCard),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .credit_card_service
        .get(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

// PUT /api/credit-cards/{id}
#[utoipa::path(
    put,
    path = "/api/credit-cards/{id}",
    tag = "Cartões",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    request_body = CreditCardPayload,
    responses(
        (status = 200, description = "Cartão atualizado", body = CreditCard),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn update_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreditCardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .credit_card_service
        .update(&app_state.db_pool, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

// DELETE /api/credit-cards/{id}
#[utoipa::path(
    delete,
    path = "/api/credit-cards/{id}",
    tag = "Cartões",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Cartão usado em compras; desative-o")
    )
)]
pub async fn delete_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .credit_card_service
        .delete(&app_state.db_pool, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/credit-cards/{id}/activate
#[utoipa::path(
    post,
    path = "/api/credit-cards/{id}/activate",
    tag = "Cartões",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Cartão ativado", body = CreditCard),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn activate_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .credit_card_service
        .set_active(&app_state.db_pool, id, true)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

// POST /api/credit-cards/{id}/deactivate
#[utoipa::path(
    post,
    path = "/api/credit-cards/{id}/deactivate",
    tag = "Cartões",
    params(("id" = Uuid, Path, description = "ID do cartão")),
    responses(
        (status = 200, description = "Cartão desativado", body = CreditCard),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn deactivate_credit_card(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let card = app_state
        .credit_card_service
        .set_active(&app_state.db_pool, id, false)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(card)))
}

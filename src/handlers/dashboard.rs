// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::MonthDashboard,
};

// GET /api/dashboard/month
#[utoipa::path(
    get,
    path = "/api/dashboard/month",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendas e compras do mês até hoje", body = MonthDashboard)
    )
)]
pub async fn get_month_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = app_state
        .dashboard_service
        .month()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(dashboard)))
}

// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

// Monta o router principal com todos os grupos de rotas
pub fn app(app_state: AppState) -> Router {
    let supplier_routes = Router::new()
        .route(
            "/",
            post(handlers::suppliers::create_supplier).get(handlers::suppliers::list_suppliers),
        )
        .route("/lookup", get(handlers::suppliers::lookup_suppliers))
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route("/{id}/activate", post(handlers::suppliers::activate_supplier))
        .route("/{id}/deactivate", post(handlers::suppliers::deactivate_supplier));

    let credit_card_routes = Router::new()
        .route(
            "/",
            post(handlers::credit_cards::create_credit_card)
                .get(handlers::credit_cards::list_credit_cards),
        )
        .route("/lookup", get(handlers::credit_cards::lookup_credit_cards))
        .route(
            "/{id}",
            get(handlers::credit_cards::get_credit_card)
                .put(handlers::credit_cards::update_credit_card)
                .delete(handlers::credit_cards::delete_credit_card),
        )
        .route("/{id}/activate", post(handlers::credit_cards::activate_credit_card))
        .route("/{id}/deactivate", post(handlers::credit_cards::deactivate_credit_card));

    let daily_sales_routes = Router::new()
        .route(
            "/",
            post(handlers::daily_sales::create_daily_sales)
                .get(handlers::daily_sales::list_daily_sales),
        )
        .route("/by-date/{date}", get(handlers::daily_sales::get_daily_sales_by_date))
        .route(
            "/{id}",
            get(handlers::daily_sales::get_daily_sales)
                .put(handlers::daily_sales::update_daily_sales)
                .delete(handlers::daily_sales::delete_daily_sales),
        );

    let purchase_routes = Router::new()
        .route(
            "/",
            post(handlers::purchases::create_purchase).get(handlers::purchases::list_purchases),
        )
        .route(
            "/{id}",
            get(handlers::purchases::get_purchase)
                .put(handlers::purchases::update_purchase)
                .delete(handlers::purchases::delete_purchase),
        )
        .route("/{id}/installments", get(handlers::purchases::list_installments))
        .route(
            "/{id}/installments/generate",
            post(handlers::purchases::generate_installments),
        );

    let installment_routes = Router::new()
        .route("/{id}/pay", post(handlers::installments::pay_installment))
        .route("/{id}/unpay", post(handlers::installments::unpay_installment));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/credit-cards", credit_card_routes)
        .nest("/api/daily-sales", daily_sales_routes)
        .nest("/api/purchases", purchase_routes)
        .nest("/api/installments", installment_routes)
        .route("/api/dashboard/month", get(handlers::dashboard::get_month_dashboard))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

//! Painel do mês: somas de 1º do mês até hoje e últimas movimentações.

mod common;

use common::{create_supplier, date, test_state};
use domcorleone::models::{
    daily_sales::DailySalesPayload,
    purchase::{PaymentMethod, PurchasePayload},
};
use rust_decimal::Decimal;
use serial_test::serial;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
#[ignore]
#[serial]
async fn month_dashboard_only_counts_the_current_month_until_today() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Atacadão").await;

    // 31/jan fica fora; 21/fev é "amanhã"
    for (day, month) in [(31, 1), (1, 2), (10, 2), (21, 2)] {
        state
            .daily_sales_service
            .create(&state.db_pool, DailySalesPayload {
                date: Some(date(2024, month, day)),
                pix: d("100.00"),
                cash: Decimal::ZERO,
                debit_card: Decimal::ZERO,
                credit_card: d("50.00"),
            })
            .await
            .unwrap();

        state
            .purchase_service
            .create(&state.db_pool, PurchasePayload {
                supplier_id: supplier.id,
                description: "Insumos".to_string(),
                total_value: d("30.00"),
                purchase_date: Some(date(2024, month, day)),
                payment_method: PaymentMethod::Debit,
                credit_card_id: None,
                installment_count: None,
                notes: None,
            })
            .await
            .unwrap();
    }

    let dashboard = state
        .dashboard_service
        .month_until(date(2024, 2, 20))
        .await
        .unwrap();

    assert_eq!(dashboard.month_start, date(2024, 2, 1));
    assert_eq!(dashboard.sales_total, d("300.00"));
    assert_eq!(dashboard.immediate_total, d("200.00"));
    assert_eq!(dashboard.credit_total, d("100.00"));
    assert_eq!(dashboard.purchases_total, d("60.00"));
    // As listas recentes não se limitam ao mês
    assert_eq!(dashboard.recent_sales.len(), 4);
    assert_eq!(dashboard.recent_sales[0].entry.date, date(2024, 2, 21));
    assert_eq!(dashboard.recent_sales[3].entry.date, date(2024, 1, 31));
    assert_eq!(dashboard.recent_purchases.len(), 4);
}

#[tokio::test]
#[ignore]
#[serial]
async fn first_day_of_month_still_lists_last_month_movements() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Hortifruti").await;

    state
        .purchase_service
        .create(&state.db_pool, PurchasePayload {
            supplier_id: supplier.id,
            description: "Verduras".to_string(),
            total_value: d("45.00"),
            purchase_date: Some(date(2024, 1, 20)),
            payment_method: PaymentMethod::Pix,
            credit_card_id: None,
            installment_count: None,
            notes: None,
        })
        .await
        .unwrap();

    let dashboard = state.dashboard_service.month_until(date(2024, 2, 1)).await.unwrap();

    assert_eq!(dashboard.purchases_total, Decimal::ZERO);
    assert_eq!(dashboard.recent_purchases.len(), 1);
    assert_eq!(dashboard.recent_purchases[0].description, "Verduras");
    assert!(dashboard.recent_sales.is_empty());
}

#[tokio::test]
#[ignore]
#[serial]
async fn recent_lists_keep_only_the_latest_five() {
    let state = test_state().await;

    for day in 1..=7 {
        state
            .daily_sales_service
            .create(&state.db_pool, DailySalesPayload {
                date: Some(date(2023, 12, day)),
                pix: d("10.00"),
                cash: Decimal::ZERO,
                debit_card: Decimal::ZERO,
                credit_card: Decimal::ZERO,
            })
            .await
            .unwrap();
    }

    let dashboard = state.dashboard_service.month_until(date(2024, 2, 1)).await.unwrap();

    assert_eq!(dashboard.sales_total, Decimal::ZERO);
    assert_eq!(dashboard.recent_sales.len(), 5);
    assert_eq!(dashboard.recent_sales[0].entry.date, date(2023, 12, 7));
    assert_eq!(dashboard.recent_sales[4].entry.date, date(2023, 12, 3));
}

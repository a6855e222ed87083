//! Fornecedores e cartões: desativação e proteção contra exclusão.

mod common;

use chrono::{Days, Utc};
use common::{create_card, create_supplier, date, test_state};
use domcorleone::{
    common::error::AppError,
    models::{
        credit_card::CreditCardFilter,
        purchase::{PaymentMethod, PurchasePayload},
        supplier::{SupplierFilter, SupplierPayload},
    },
};
use rust_decimal::Decimal;
use serial_test::serial;

fn cash_purchase(supplier_id: uuid::Uuid) -> PurchasePayload {
    PurchasePayload {
        supplier_id,
        description: "Farinha".to_string(),
        total_value: "80.00".parse().unwrap(),
        purchase_date: Some(date(2024, 1, 10)),
        payment_method: PaymentMethod::Cash,
        credit_card_id: None,
        installment_count: None,
        notes: None,
    }
}

#[tokio::test]
#[ignore]
#[serial]
async fn referenced_supplier_cannot_be_deleted() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Atacadão").await;
    let purchase = state
        .purchase_service
        .create(&state.db_pool, cash_purchase(supplier.id))
        .await
        .unwrap();

    let err = state
        .supplier_service
        .delete(&state.db_pool, supplier.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrity("supplier_in_use")));

    // Nada mudou
    assert!(state.supplier_service.get(&state.db_pool, supplier.id).await.is_ok());
    let kept = state.purchase_service.get(&state.db_pool, purchase.id).await.unwrap();
    assert_eq!(kept.supplier_id, supplier.id);
}

#[tokio::test]
#[ignore]
#[serial]
async fn unreferenced_supplier_is_deleted() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Feira").await;

    state.supplier_service.delete(&state.db_pool, supplier.id).await.unwrap();

    let err = state.supplier_service.get(&state.db_pool, supplier.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("supplier_not_found")));
}

#[tokio::test]
#[ignore]
#[serial]
async fn inactive_entries_leave_lookups_but_keep_history() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Bebidas Sul").await;
    let other = create_supplier(&state, "Atacadão").await;
    let card = create_card(&state, "Nubank", 10).await;

    let purchase = state
        .purchase_service
        .create(&state.db_pool, cash_purchase(supplier.id))
        .await
        .unwrap();

    state.supplier_service.set_active(&state.db_pool, supplier.id, false).await.unwrap();
    state.credit_card_service.set_active(&state.db_pool, card.id, false).await.unwrap();

    let lookup = state.supplier_service.lookup().await.unwrap();
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup[0].id, other.id);
    assert!(state.credit_card_service.lookup().await.unwrap().is_empty());

    let only_inactive = SupplierFilter {
        active: Some(false),
        ..Default::default()
    };
    let inactive = state.supplier_service.list(&state.db_pool, only_inactive).await.unwrap();
    assert_eq!(inactive.len(), 1);

    // A compra antiga continua lá, com o nome do fornecedor
    let kept = state.purchase_service.get(&state.db_pool, purchase.id).await.unwrap();
    assert_eq!(kept.supplier_name, "Bebidas Sul");
}

#[tokio::test]
#[ignore]
#[serial]
async fn referenced_card_cannot_be_deleted() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Atacadão").await;
    let card = create_card(&state, "Santander", 5).await;

    let mut payload = cash_purchase(supplier.id);
    payload.payment_method = PaymentMethod::Credit;
    payload.credit_card_id = Some(card.id);
    payload.installment_count = Some(2);
    state.purchase_service.create(&state.db_pool, payload).await.unwrap();

    let err = state
        .credit_card_service
        .delete(&state.db_pool, card.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferentialIntegrity("credit_card_in_use")));
}

#[tokio::test]
#[ignore]
#[serial]
async fn supplier_list_carries_purchase_totals_and_searches() {
    let state = test_state().await;
    let busy = create_supplier(&state, "Atacadão").await;
    state
        .supplier_service
        .create(&state.db_pool, SupplierPayload {
            name: "Bebidas Sul".to_string(),
            contact: Some("Marta 99999-1234".to_string()),
            notes: None,
            active: true,
        })
        .await
        .unwrap();

    for _ in 0..2 {
        state
            .purchase_service
            .create(&state.db_pool, cash_purchase(busy.id))
            .await
            .unwrap();
    }

    let all = state
        .supplier_service
        .list(&state.db_pool, SupplierFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].supplier.name, "Atacadão");
    assert_eq!(all[0].total_purchases, "160.00".parse::<Decimal>().unwrap());
    assert_eq!(all[1].total_purchases, Decimal::ZERO);

    // Busca também no contato
    let by_contact = SupplierFilter {
        search: Some("marta".to_string()),
        ..Default::default()
    };
    let found = state.supplier_service.list(&state.db_pool, by_contact).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].supplier.name, "Bebidas Sul");
}

#[tokio::test]
#[ignore]
#[serial]
async fn card_list_shows_recent_usage_and_filters_by_closing_day() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Atacadão").await;
    let nubank = create_card(&state, "Nubank", 10).await;
    create_card(&state, "Santander", 25).await;

    let today = Utc::now().date_naive();
    for (days_ago, total) in [(0, "100.00"), (30, "50.00"), (31, "999.00")] {
        let mut payload = cash_purchase(supplier.id);
        payload.total_value = total.parse().unwrap();
        payload.purchase_date = Some(today - Days::new(days_ago));
        payload.payment_method = PaymentMethod::Credit;
        payload.credit_card_id = Some(nubank.id);
        payload.installment_count = Some(2);
        state.purchase_service.create(&state.db_pool, payload).await.unwrap();
    }

    let cards = state
        .credit_card_service
        .list(&state.db_pool, CreditCardFilter::default())
        .await
        .unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].card.id, nubank.id);
    // A compra de 31 dias atrás fica de fora
    assert_eq!(cards[0].used_last_30_days, "150.00".parse::<Decimal>().unwrap());
    assert_eq!(cards[1].used_last_30_days, Decimal::ZERO);

    let closing_25 = CreditCardFilter {
        closing_day: Some(25),
        ..Default::default()
    };
    let found = state.credit_card_service.list(&state.db_pool, closing_25).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].card.name, "Santander");

    let by_name = CreditCardFilter {
        search: Some("nu".to_string()),
        ..Default::default()
    };
    let found = state.credit_card_service.list(&state.db_pool, by_name).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].card.id, nubank.id);
}

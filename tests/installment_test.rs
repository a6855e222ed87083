//! Cronograma de parcelas: geração, pagamento e descarte na edição.

mod common;

use std::time::Duration;

use common::{create_card, create_supplier, date, test_state};
use domcorleone::{
    common::error::AppError,
    config::AppState,
    db::{InstallmentRepository, PurchaseRepository},
    models::purchase::{PaymentMethod, PurchasePayload},
};
use rust_decimal::Decimal;
use serial_test::serial;
use uuid::Uuid;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn credit_purchase(supplier_id: Uuid, card_id: Uuid, total: &str, installments: i16) -> PurchasePayload {
    PurchasePayload {
        supplier_id,
        description: "Forno".to_string(),
        total_value: d(total),
        purchase_date: Some(date(2024, 1, 31)),
        payment_method: PaymentMethod::Credit,
        credit_card_id: Some(card_id),
        installment_count: Some(installments),
        notes: None,
    }
}

async fn credit_setup(state: &AppState, total: &str, installments: i16) -> (Uuid, PurchasePayload) {
    let supplier = create_supplier(state, "Equipamentos").await;
    let card = create_card(state, "Nubank", 31).await;
    let payload = credit_purchase(supplier.id, card.id, total, installments);
    let purchase = state
        .purchase_service
        .create(&state.db_pool, credit_purchase(supplier.id, card.id, total, installments))
        .await
        .unwrap();
    (purchase.id, payload)
}

#[tokio::test]
#[ignore]
#[serial]
async fn creating_a_purchase_does_not_build_a_schedule() {
    let state = test_state().await;
    let (purchase_id, _) = credit_setup(&state, "100.00", 3).await;

    let lines = state.installment_service.list(purchase_id).await.unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore]
#[serial]
async fn generated_schedule_sums_to_the_total() {
    let state = test_state().await;
    let (purchase_id, _) = credit_setup(&state, "100.00", 3).await;

    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();

    let values: Vec<Decimal> = lines.iter().map(|l| l.installment_value).collect();
    assert_eq!(values, vec![d("33.33"), d("33.33"), d("33.34")]);
    // Fechamento no dia 31, limitado ao fim de fevereiro
    assert_eq!(lines[0].due_date, date(2024, 2, 29));
    assert_eq!(lines[1].due_date, date(2024, 3, 31));
    assert_eq!(lines[2].due_date, date(2024, 4, 30));

    // Gerar de novo substitui, não duplica
    let again = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();
    assert_eq!(again.len(), 3);
    let listed = state.installment_service.list(purchase_id).await.unwrap();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
#[ignore]
#[serial]
async fn non_credit_purchases_have_no_schedule() {
    let state = test_state().await;
    let supplier = create_supplier(&state, "Feira").await;
    let mut payload = credit_purchase(supplier.id, Uuid::new_v4(), "30.00", 1);
    payload.payment_method = PaymentMethod::Cash;
    let purchase = state.purchase_service.create(&state.db_pool, payload).await.unwrap();

    let err = state
        .installment_service
        .generate(&state.db_pool, purchase.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
#[ignore]
#[serial]
async fn paying_and_unpaying_a_line() {
    let state = test_state().await;
    let (purchase_id, _) = credit_setup(&state, "60.00", 2).await;
    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();

    let paid = state
        .installment_service
        .mark_paid(&state.db_pool, lines[0].id, Some(date(2024, 2, 10)))
        .await
        .unwrap();
    assert!(paid.paid);
    assert_eq!(paid.paid_date, Some(date(2024, 2, 10)));

    // Com parcela paga, o cronograma não pode ser refeito
    let err = state
        .installment_service
        .generate(&state.db_pool, purchase_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let open = state
        .installment_service
        .mark_unpaid(&state.db_pool, lines[0].id)
        .await
        .unwrap();
    assert!(!open.paid);
    assert_eq!(open.paid_date, None);
}

#[tokio::test]
#[ignore]
#[serial]
async fn editing_terms_discards_an_unpaid_schedule() {
    let state = test_state().await;
    let (purchase_id, mut payload) = credit_setup(&state, "100.00", 3).await;
    state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();

    // Só a descrição muda: o cronograma fica
    payload.description = "Forno elétrico".to_string();
    let updated = state
        .purchase_service
        .update(&state.db_pool, purchase_id, payload)
        .await
        .unwrap();
    assert_eq!(updated.description, "Forno elétrico");
    let lines = state.installment_service.list(purchase_id).await.unwrap();
    assert_eq!(lines.len(), 3);

    // Parcelas mudam: o cronograma some
    let current = state.purchase_service.get(&state.db_pool, purchase_id).await.unwrap();
    let mut payload = credit_purchase(
        current.supplier_id,
        current.terms.credit_card_id().unwrap(),
        "100.00",
        4,
    );
    payload.description = current.description;
    state
        .purchase_service
        .update(&state.db_pool, purchase_id, payload)
        .await
        .unwrap();
    let lines = state.installment_service.list(purchase_id).await.unwrap();
    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore]
#[serial]
async fn editing_terms_is_refused_once_a_line_is_paid() {
    let state = test_state().await;
    let (purchase_id, mut payload) = credit_setup(&state, "100.00", 2).await;
    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();
    state
        .installment_service
        .mark_paid(&state.db_pool, lines[0].id, None)
        .await
        .unwrap();

    payload.total_value = d("120.00");
    let err = state
        .purchase_service
        .update(&state.db_pool, purchase_id, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let kept = state.purchase_service.get(&state.db_pool, purchase_id).await.unwrap();
    assert_eq!(kept.total_value, d("100.00"));
}

#[tokio::test]
#[ignore]
#[serial]
async fn editing_only_the_date_discards_the_schedule() {
    let state = test_state().await;
    let (purchase_id, mut payload) = credit_setup(&state, "90.00", 3).await;
    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();
    assert_eq!(lines[0].due_date, date(2024, 2, 29));

    payload.purchase_date = Some(date(2024, 6, 15));
    state
        .purchase_service
        .update(&state.db_pool, purchase_id, payload)
        .await
        .unwrap();
    assert!(state.installment_service.list(purchase_id).await.unwrap().is_empty());

    // Regerado a partir da nova data
    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();
    assert_eq!(lines[0].due_date, date(2024, 7, 31));
}

#[tokio::test]
#[ignore]
#[serial]
async fn payment_waits_while_the_schedule_is_being_discarded() {
    let state = test_state().await;
    let (purchase_id, _) = credit_setup(&state, "90.00", 3).await;
    let lines = state.installment_service.generate(&state.db_pool, purchase_id).await.unwrap();

    let purchases = PurchaseRepository::new(state.db_pool.clone());
    let installments = InstallmentRepository::new(state.db_pool.clone());

    // Mesmos passos da edição: trava a compra, checa as parcelas, descarta
    let mut tx = state.db_pool.begin().await.unwrap();
    assert!(purchases.find_for_update(&mut *tx, purchase_id).await.unwrap().is_some());
    assert!(!installments.any_paid(&mut *tx, purchase_id).await.unwrap());

    let line_id = lines[0].id;
    let paying_state = state.clone();
    let mut paying = tokio::spawn(async move {
        paying_state
            .installment_service
            .mark_paid(&paying_state.db_pool, line_id, None)
            .await
    });

    // A linha está travada: o pagamento não termina antes do commit
    assert!(tokio::time::timeout(Duration::from_millis(300), &mut paying).await.is_err());

    let discarded = installments.delete_for_purchase(&mut *tx, purchase_id).await.unwrap();
    assert_eq!(discarded, 3);
    tx.commit().await.unwrap();

    // A parcela sumiu antes do pagamento: nada é pago em silêncio
    let paid = paying.await.unwrap();
    assert!(matches!(paid, Err(AppError::NotFound(_))));
    assert!(state.installment_service.list(purchase_id).await.unwrap().is_empty());
}

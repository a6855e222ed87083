// src/services/installment_service.rs

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CreditCardRepository, InstallmentRepository, PurchaseRepository},
    models::{
        installment::{build_schedule, InstallmentLine},
        purchase::PaymentTerms,
    },
};

#[derive(Clone)]
pub struct InstallmentService {
    repo: InstallmentRepository,
    purchase_repo: PurchaseRepository,
    card_repo: CreditCardRepository,
}

impl InstallmentService {
    pub fn new(
        repo: InstallmentRepository,
        purchase_repo: PurchaseRepository,
        card_repo: CreditCardRepository,
    ) -> Self {
        Self {
            repo,
            purchase_repo,
            card_repo,
        }
    }

    pub async fn list(&self, purchase_id: Uuid) -> Result<Vec<InstallmentLine>, AppError> {
        if !self.purchase_repo.exists(purchase_id).await? {
            return Err(AppError::NotFound("purchase_not_found"));
        }
        self.repo.list_for_purchase(purchase_id).await
    }

    /// (Re)monta o cronograma de uma compra no crédito. Nunca é disparado pela
    /// criação ou edição da compra.
    pub async fn generate<'e, E>(&self, executor: E, purchase_id: Uuid) -> Result<Vec<InstallmentLine>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // Trava a compra: duas gerações simultâneas não se cruzam
        let purchase = self
            .purchase_repo
            .find_for_update(&mut *tx, purchase_id)
            .await?
            .ok_or(AppError::NotFound("purchase_not_found"))?;

        let PaymentTerms::Credit { card_id, .. } = purchase.terms else {
            return Err(AppError::field("payment_method", "not_a_credit_purchase"));
        };

        // Trava as linhas também: pagamento concorrente espera o novo cronograma
        if self.repo.any_paid(&mut *tx, purchase_id).await? {
            return Err(AppError::field("installments", "installments_already_paid"));
        }

        let card = self
            .card_repo
            .find_by_id(&mut *tx, card_id)
            .await?
            .ok_or(AppError::NotFound("credit_card_not_found"))?;

        let lines = build_schedule(
            purchase.purchase_date,
            card.statement_closing_day,
            &purchase.installment_schedule(),
        )
        .ok_or_else(|| anyhow!("vencimento fora do calendário para a compra {}", purchase_id))?;

        self.repo.delete_for_purchase(&mut *tx, purchase_id).await?;
        let inserted = self.repo.insert_all(&mut *tx, purchase_id, &lines).await?;

        tx.commit().await?;

        tracing::info!(
            "📅 Cronograma gerado para a compra {}: {} parcelas no cartão {}",
            purchase_id,
            inserted.len(),
            card.name
        );
        Ok(inserted)
    }

    /// Marca a parcela como paga (data ausente = hoje).
    pub async fn mark_paid<'e, E>(
        &self,
        executor: E,
        line_id: Uuid,
        paid_date: Option<NaiveDate>,
    ) -> Result<InstallmentLine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let paid_date = paid_date.unwrap_or_else(|| Utc::now().date_naive());
        let line = self
            .repo
            .set_paid(executor, line_id, Some(paid_date))
            .await?
            .ok_or(AppError::NotFound("installment_not_found"))?;

        tracing::info!("✅ Parcela {} paga em {}", line.id, paid_date);
        Ok(line)
    }

    pub async fn mark_unpaid<'e, E>(&self, executor: E, line_id: Uuid) -> Result<InstallmentLine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let line = self
            .repo
            .set_paid(executor, line_id, None)
            .await?
            .ok_or(AppError::NotFound("installment_not_found"))?;

        tracing::info!("↩️ Parcela {} voltou a ficar em aberto", line.id);
        Ok(line)
    }
}

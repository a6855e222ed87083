// src/services/purchase_service.rs

use chrono::Utc;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::read_snapshot, error::AppError, pagination::PageWindow},
    db::{InstallmentRepository, PurchaseRepository},
    models::purchase::{
        Purchase, PurchaseFilter, PurchasePage, PurchasePayload, PurchaseResponse,
    },
};

#[derive(Clone)]
pub struct PurchaseService {
    repo: PurchaseRepository,
    installment_repo: InstallmentRepository,
    page_size: u32,
}

impl PurchaseService {
    pub fn new(
        repo: PurchaseRepository,
        installment_repo: InstallmentRepository,
        page_size: u32,
    ) -> Self {
        Self {
            repo,
            installment_repo,
            page_size,
        }
    }

    /// Valida e normaliza antes de gravar; crédito sem cartão não chega ao banco.
    pub async fn create<'e, E>(&self, executor: E, payload: PurchasePayload) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let draft = payload.into_draft(Utc::now().date_naive())?;
        let purchase = self.repo.create(executor, &draft).await?;

        tracing::info!(
            "🛒 Compra registrada: {} de {} ({:?}, {})",
            purchase.total_value,
            purchase.supplier_name,
            purchase.terms.method(),
            purchase.payment_status()
        );
        Ok(purchase)
    }

    /// Atualiza a compra. Se o valor, a data ou as condições mudarem, o
    /// cronograma de parcelas é descartado na mesma transação (e a edição é
    /// recusada se alguma parcela já foi paga).
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: PurchasePayload,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let draft = payload.into_draft(Utc::now().date_naive())?;

        let mut tx = executor.begin().await?;

        let current = self
            .repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("purchase_not_found"))?;

        // Vencimentos dependem da data da compra
        let schedule_changed = current.total_value != draft.total_value
            || current.purchase_date != draft.purchase_date
            || current.terms != draft.terms;

        if schedule_changed {
            // any_paid trava as linhas: ninguém paga entre a checagem e o descarte
            if self.installment_repo.any_paid(&mut *tx, id).await? {
                return Err(AppError::field("installments", "installments_already_paid"));
            }
            let discarded = self.installment_repo.delete_for_purchase(&mut *tx, id).await?;
            if discarded > 0 {
                tracing::info!("🧹 {} parcelas descartadas da compra {}", discarded, id);
            }
        }

        let purchase = self
            .repo
            .update(&mut *tx, id, &draft)
            .await?
            .ok_or(AppError::NotFound("purchase_not_found"))?;

        tx.commit().await?;

        tracing::info!("✏️ Compra atualizada: {}", purchase.id);
        Ok(purchase)
    }

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .find_by_id(executor, id)
            .await?
            .ok_or(AppError::NotFound("purchase_not_found"))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if !self.repo.delete(executor, id).await? {
            return Err(AppError::NotFound("purchase_not_found"));
        }

        tracing::info!("🗑️ Compra removida: {}", id);
        Ok(())
    }

    /// Página filtrada + totais do conjunto inteiro, lidos no mesmo snapshot.
    pub async fn list<'e, E>(&self, executor: E, filter: PurchaseFilter) -> Result<PurchasePage, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;
        read_snapshot(&mut tx).await?;

        let totals = self.repo.totals(&mut *tx, &filter).await?;
        let window = PageWindow::clamp(filter.page, self.page_size, totals.count);
        let purchases = self.repo.page(&mut *tx, &filter, window).await?;

        tx.commit().await?;

        Ok(PurchasePage {
            items: purchases.into_iter().map(PurchaseResponse::from).collect(),
            totals,
            page: window.page,
            page_size: window.page_size,
            total_pages: window.total_pages,
        })
    }
}

// src/services/dashboard_service.rs

use chrono::{NaiveDate, Utc};

use crate::{
    common::error::AppError,
    db::{DailySalesRepository, DashboardRepository, PurchaseRepository},
    models::{
        daily_sales::DailySalesResponse,
        dashboard::{month_to_date, MonthDashboard, RECENT_LIMIT},
        purchase::PurchaseResponse,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    sales_repo: DailySalesRepository,
    purchase_repo: PurchaseRepository,
}

impl DashboardService {
    pub fn new(
        repo: DashboardRepository,
        sales_repo: DailySalesRepository,
        purchase_repo: PurchaseRepository,
    ) -> Self {
        Self {
            repo,
            sales_repo,
            purchase_repo,
        }
    }

    pub async fn month(&self) -> Result<MonthDashboard, AppError> {
        self.month_until(Utc::now().date_naive()).await
    }

    /// Somas de 1º do mês até `today` e últimas movimentações, tudo no mesmo snapshot.
    pub async fn month_until(&self, today: NaiveDate) -> Result<MonthDashboard, AppError> {
        let (month_start, today) = month_to_date(today);

        let mut tx = self.repo.begin_snapshot().await?;

        let sales = self.repo.sales_sums(&mut *tx, month_start, today).await?;
        let purchases_total = self.repo.purchases_total(&mut *tx, month_start, today).await?;
        let recent_sales = self.sales_repo.recent(&mut *tx, RECENT_LIMIT).await?;
        let recent_purchases = self.purchase_repo.recent(&mut *tx, RECENT_LIMIT).await?;

        tx.commit().await?;

        Ok(MonthDashboard {
            month_start,
            today,
            sales_total: sales.sales_total,
            immediate_total: sales.immediate_total,
            credit_total: sales.credit_total,
            purchases_total,
            recent_sales: recent_sales.into_iter().map(DailySalesResponse::from).collect(),
            recent_purchases: recent_purchases.into_iter().map(PurchaseResponse::from).collect(),
        })
    }
}

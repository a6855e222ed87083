pub mod credit_card_repo;
pub use credit_card_repo::CreditCardRepository;
pub mod daily_sales_repo;
pub use daily_sales_repo::DailySalesRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod installment_repo;
pub use installment_repo::InstallmentRepository;
pub mod purchase_repo;
pub use purchase_repo::PurchaseRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;

pub mod credit_card_service;
pub use credit_card_service::CreditCardService;
pub mod daily_sales_service;
pub use daily_sales_service::DailySalesService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod installment_service;
pub use installment_service::InstallmentService;
pub mod purchase_service;
pub use purchase_service::PurchaseService;
pub mod supplier_service;
pub use supplier_service::SupplierService;

// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dom Corleone",
        description = "Controle de vendas diárias e compras a fornecedores da loja"
    ),
    paths(
        // --- Fornecedores ---
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::lookup_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,
        handlers::suppliers::activate_supplier,
        handlers::suppliers::deactivate_supplier,

        // --- Cartões ---
        handlers::credit_cards::create_credit_card,
        handlers::credit_cards::list_credit_cards,
        handlers::credit_cards::lookup_credit_cards,
        handlers::credit_cards::get_credit_card,
        handlers::credit_cards::update_credit_card,
        handlers::credit_cards::delete_credit_card,
        handlers::credit_cards::activate_credit_card,
        handlers::credit_cards::deactivate_credit_card,

        // --- Vendas Diárias ---
        handlers::daily_sales::create_daily_sales,
        handlers::daily_sales::list_daily_sales,
        handlers::daily_sales::get_daily_sales_by_date,
        handlers::daily_sales::get_daily_sales,
        handlers::daily_sales::update_daily_sales,
        handlers::daily_sales::delete_daily_sales,

        // --- Compras ---
        handlers::purchases::create_purchase,
        handlers::purchases::list_purchases,
        handlers::purchases::get_purchase,
        handlers::purchases::update_purchase,
        handlers::purchases::delete_purchase,

        // --- Parcelas ---
        handlers::purchases::list_installments,
        handlers::purchases::generate_installments,
        handlers::installments::pay_installment,
        handlers::installments::unpay_installment,

        // --- Dashboard ---
        handlers::dashboard::get_month_dashboard,
    ),
    components(
        schemas(
            // --- Cadastros ---
            models::lookup::LookupOption,
            models::supplier::Supplier,
            models::supplier::SupplierListItem,
            models::supplier::SupplierPayload,
            models::credit_card::CreditCard,
            models::credit_card::CreditCardListItem,
            models::credit_card::CreditCardPayload,

            // --- Vendas ---
            models::daily_sales::DailySalesEntry,
            models::daily_sales::DailySalesResponse,
            models::daily_sales::DailySalesPayload,
            models::daily_sales::DailySalesTotals,
            models::daily_sales::DailySalesPage,

            // --- Compras ---
            models::purchase::PaymentMethod,
            models::purchase::PurchaseResponse,
            models::purchase::PurchasePayload,
            models::purchase::PurchaseTotals,
            models::purchase::PurchasePage,
            models::installment::InstallmentLine,
            models::installment::MarkPaidPayload,

            // --- Dashboard ---
            models::dashboard::MonthDashboard,
        )
    ),
    tags(
        (name = "Fornecedores", description = "Cadastro de fornecedores"),
        (name = "Cartões", description = "Cartões de crédito da loja"),
        (name = "Vendas Diárias", description = "Lançamento diário das vendas por canal"),
        (name = "Compras", description = "Compras a fornecedores e relatórios"),
        (name = "Parcelas", description = "Cronograma de parcelas das compras no crédito"),
        (name = "Dashboard", description = "Resumo do mês corrente")
    )
)]
pub struct ApiDoc;

pub mod credit_cards;
pub mod daily_sales;
pub mod dashboard;
pub mod installments;
pub mod purchases;
pub mod suppliers;

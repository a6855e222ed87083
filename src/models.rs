pub mod credit_card;
pub mod daily_sales;
pub mod dashboard;
pub mod installment;
pub mod lookup;
pub mod purchase;
pub mod supplier;

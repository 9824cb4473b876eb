pub mod budget;
pub mod dashboard;
pub mod login;
pub mod reports;
pub mod transactions;

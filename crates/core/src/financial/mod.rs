//! Financial module - statements from one provider at a time.

mod financial_service;
mod financial_traits;

pub use financial_service::FinancialService;
pub use financial_traits::FinancialServiceTrait;

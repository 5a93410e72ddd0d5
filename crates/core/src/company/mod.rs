//! Company module - per-category company data, single-source or unified.

mod company_service;
mod company_traits;

pub use company_service::CompanyService;
pub use company_traits::CompanyServiceTrait;

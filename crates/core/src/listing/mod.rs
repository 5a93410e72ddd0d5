//! Listing module - symbol universes and classifications.

mod listing_model;
mod listing_service;
mod listing_traits;

pub use listing_model::ListingPage;
pub use listing_service::ListingService;
pub use listing_traits::ListingServiceTrait;

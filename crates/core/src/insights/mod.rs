//! Insights module - aggregate views over a tenant's clients.

mod insights_model;
mod insights_service;

pub use insights_model::{ClientDigest, ClientLocation, Dashboard};
pub use insights_service::{build_dashboard, client_locations, InsightsService, InsightsServiceTrait};

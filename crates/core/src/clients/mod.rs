//! Clients module - the businesses a tenant markets to.

mod clients_model;
mod clients_service;
mod clients_traits;

pub use clients_model::{
    Client, ClientInput, ClientSummary, Coordinates, Location, NewClient, SocialMedia,
};
pub use clients_service::ClientService;
pub use clients_traits::{ClientRepositoryTrait, ClientServiceTrait};

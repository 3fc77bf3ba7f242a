use chrono::{Duration, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::insights_model::{ClientDigest, ClientLocation, Dashboard};
use crate::clients::{Client, ClientRepositoryTrait};
use crate::constants::{RECENT_CLIENTS_DAYS, UNKNOWN_COUNTRY};
use crate::errors::Result;
use crate::utils::non_blank;
use crate::RecordId;

pub trait InsightsServiceTrait: Send + Sync {
    fn dashboard(&self, owner: RecordId) -> Result<Dashboard>;
    fn locations(&self, owner: RecordId) -> Result<Vec<ClientLocation>>;
}

pub struct InsightsService {
    client_repository: Arc<dyn ClientRepositoryTrait>,
}

impl InsightsService {
    pub fn new(client_repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        Self { client_repository }
    }
}

impl InsightsServiceTrait for InsightsService {
    fn dashboard(&self, owner: RecordId) -> Result<Dashboard> {
        let clients = self.client_repository.list(owner)?;
        Ok(build_dashboard(&clients, Utc::now().naive_utc()))
    }

    fn locations(&self, owner: RecordId) -> Result<Vec<ClientLocation>> {
        let clients = self.client_repository.list(owner)?;
        Ok(client_locations(&clients))
    }
}

pub fn build_dashboard(clients: &[Client], now: NaiveDateTime) -> Dashboard {
    let recent_cutoff = now - Duration::days(RECENT_CLIENTS_DAYS);
    let mut location_data = BTreeMap::new();
    for client in clients {
        let country = non_blank(client.location.country.as_deref()).unwrap_or(UNKNOWN_COUNTRY);
        *location_data.entry(country.to_string()).or_insert(0) += 1;
    }

    Dashboard {
        total_clients: clients.len(),
        clients_with_phone: clients
            .iter()
            .filter(|c| !c.phone_number.trim().is_empty())
            .count(),
        clients_with_email: clients.iter().filter(|c| !c.email.trim().is_empty()).count(),
        clients_with_social: clients
            .iter()
            .filter(|c| c.social_media.has_network())
            .count(),
        recent_clients: clients
            .iter()
            .filter(|c| c.created_at >= recent_cutoff)
            .count(),
        location_data,
        clients: clients.iter().map(ClientDigest::from).collect(),
    }
}

pub fn client_locations(clients: &[Client]) -> Vec<ClientLocation> {
    clients
        .iter()
        .filter(|c| c.location.coordinates.pair().is_some())
        .map(|c| ClientLocation {
            id: c.id,
            name: c.name.clone(),
            business_name: c.business_name.clone(),
            coordinates: c.location.coordinates,
            address: c.location.address.clone(),
            city: c.location.city.clone(),
            country: c.location.country.clone(),
        })
        .collect()
}

use serde::Serialize;
use std::collections::BTreeMap;

use crate::clients::{Client, Coordinates, Location};
use crate::utils::ids;
use crate::RecordId;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_clients: usize,
    pub clients_with_phone: usize,
    pub clients_with_email: usize,
    pub clients_with_social: usize,
    pub recent_clients: usize,
    /// Client count per country.
    pub location_data: BTreeMap<String, usize>,
    pub clients: Vec<ClientDigest>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDigest {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    pub business_name: Option<String>,
    pub location: Location,
    pub phone_number: String,
    pub email: String,
}

impl From<&Client> for ClientDigest {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            business_name: client.business_name.clone(),
            location: client.location.clone(),
            phone_number: client.phone_number.clone(),
            email: client.email.clone(),
        }
    }
}

/// A client that can be placed on a map.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientLocation {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    pub business_name: Option<String>,
    pub coordinates: Coordinates,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

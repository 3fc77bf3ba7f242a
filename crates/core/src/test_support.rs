//! In-memory repositories shared by service tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use std::sync::Mutex;

use crate::ads::{Ad, AdFilter, AdRepositoryTrait, AdSummary, AdWithClient, NewAd};
use crate::clients::{Client, ClientRepositoryTrait, ClientSummary, NewClient};
use crate::contacts::{ContactRepositoryTrait, CustomerContact, NewCustomerContact};
use crate::errors::{Error, Result};
use crate::notes::{NewNote, Note, NoteFilter, NoteRepositoryTrait, NoteWithClient};
use crate::post_history::{
    NewPostHistory, PostFilter, PostHistory, PostHistoryRepositoryTrait, PostWithAd,
};
use crate::RecordId;

#[derive(Default)]
struct Tables {
    clients: Vec<Client>,
    contacts: Vec<CustomerContact>,
    notes: Vec<Note>,
    ads: Vec<Ad>,
    posts: Vec<PostHistory>,
    tick: i64,
}

impl Tables {
    /// Strictly increasing timestamps so "newest first" is deterministic.
    fn next_timestamp(&mut self) -> NaiveDateTime {
        self.tick += 1;
        base_time() + Duration::seconds(self.tick)
    }

    fn summary(&self, client_id: Option<RecordId>) -> Option<ClientSummary> {
        let id = client_id?;
        self.clients
            .iter()
            .find(|c| c.id == id)
            .map(ClientSummary::from)
    }
}

pub fn base_time() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> Vec<PostHistory> {
        self.tables.lock().unwrap().posts.clone()
    }

    pub fn seed_client(&self, owner: RecordId, name: &str, phone: &str, email: &str) -> Client {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let client = Client {
            id: t.clients.len() as RecordId + 1,
            name: name.to_string(),
            business_name: None,
            phone_number: phone.to_string(),
            email: email.to_string(),
            social_media: Default::default(),
            location: Default::default(),
            tags: vec![],
            created_by: owner,
            created_at: ts,
            updated_at: ts,
        };
        t.clients.push(client.clone());
        client
    }

    pub fn seed_contact(
        &self,
        owner: RecordId,
        client_id: RecordId,
        name: &str,
        phone: &str,
        email: &str,
    ) -> CustomerContact {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let contact = CustomerContact {
            id: t.contacts.len() as RecordId + 1,
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
            client_id,
            tags: vec![],
            notes: None,
            created_by: owner,
            created_at: ts,
            updated_at: ts,
        };
        t.contacts.push(contact.clone());
        contact
    }
}

#[async_trait]
impl ClientRepositoryTrait for MemoryStore {
    fn list(&self, owner: RecordId) -> Result<Vec<Client>> {
        let t = self.tables.lock().unwrap();
        let mut clients: Vec<_> = t
            .clients
            .iter()
            .filter(|c| c.created_by == owner)
            .cloned()
            .collect();
        clients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(clients)
    }

    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<Client>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .clients
            .iter()
            .find(|c| c.id == id && c.created_by == owner)
            .cloned())
    }

    async fn create(&self, new_client: NewClient) -> Result<Client> {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let client = Client {
            id: t.clients.len() as RecordId + 1,
            name: new_client.name,
            business_name: new_client.business_name,
            phone_number: new_client.phone_number,
            email: new_client.email,
            social_media: new_client.social_media,
            location: new_client.location,
            tags: new_client.tags,
            created_by: new_client.created_by,
            created_at: ts,
            updated_at: ts,
        };
        t.clients.push(client.clone());
        Ok(client)
    }

    async fn update(&self, client: Client) -> Result<Client> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .clients
            .iter_mut()
            .find(|c| c.id == client.id)
            .ok_or_else(|| Error::not_found("Client"))?;
        *slot = client.clone();
        Ok(client)
    }

    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize> {
        let mut t = self.tables.lock().unwrap();
        let before = t.clients.len();
        t.clients.retain(|c| !(c.id == id && c.created_by == owner));
        let removed = before - t.clients.len();
        if removed > 0 {
            t.contacts.retain(|c| c.client_id != id);
            for note in t.notes.iter_mut().filter(|n| n.client_id == Some(id)) {
                note.client_id = None;
            }
            for ad in t.ads.iter_mut().filter(|a| a.client_id == Some(id)) {
                ad.client_id = None;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl ContactRepositoryTrait for MemoryStore {
    fn list_for_client(
        &self,
        owner: RecordId,
        client_id: RecordId,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<CustomerContact>> {
        let t = self.tables.lock().unwrap();
        let mut contacts: Vec<_> = t
            .contacts
            .iter()
            .filter(|c| c.created_by == owner && c.client_id == client_id)
            .filter(|c| ids.map_or(true, |ids| ids.contains(&c.id)))
            .cloned()
            .collect();
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }

    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<CustomerContact>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .contacts
            .iter()
            .find(|c| c.id == id && c.created_by == owner)
            .cloned())
    }

    async fn create_many(
        &self,
        contacts: Vec<NewCustomerContact>,
    ) -> Result<Vec<CustomerContact>> {
        let mut created = Vec::new();
        for new_contact in contacts {
            let contact = self.seed_contact(
                new_contact.created_by,
                new_contact.client_id,
                &new_contact.name,
                &new_contact.phone_number,
                &new_contact.email,
            );
            created.push(contact);
        }
        Ok(created)
    }

    async fn update(&self, contact: CustomerContact) -> Result<CustomerContact> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or_else(|| Error::not_found("Customer contact"))?;
        *slot = contact.clone();
        Ok(contact)
    }

    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize> {
        let mut t = self.tables.lock().unwrap();
        let before = t.contacts.len();
        t.contacts.retain(|c| !(c.id == id && c.created_by == owner));
        Ok(before - t.contacts.len())
    }
}

#[async_trait]
impl NoteRepositoryTrait for MemoryStore {
    fn list(&self, owner: RecordId, filter: &NoteFilter) -> Result<Vec<NoteWithClient>> {
        let t = self.tables.lock().unwrap();
        let mut notes: Vec<_> = t
            .notes
            .iter()
            .filter(|n| n.created_by == owner)
            .filter(|n| filter.client_id.map_or(true, |id| n.client_id == Some(id)))
            .filter(|n| filter.category.map_or(true, |c| n.category == c))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes
            .into_iter()
            .map(|note| NoteWithClient {
                client: t.summary(note.client_id),
                note,
            })
            .collect())
    }

    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<NoteWithClient>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .notes
            .iter()
            .find(|n| n.id == id && n.created_by == owner)
            .cloned()
            .map(|note| NoteWithClient {
                client: t.summary(note.client_id),
                note,
            }))
    }

    fn list_ai_relevant(&self, owner: RecordId, client_id: RecordId) -> Result<Vec<Note>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .notes
            .iter()
            .filter(|n| n.created_by == owner && n.client_id == Some(client_id) && n.ai_relevant)
            .cloned()
            .collect())
    }

    async fn create(&self, new_note: NewNote) -> Result<Note> {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let note = Note {
            id: t.notes.len() as RecordId + 1,
            title: new_note.title,
            content: new_note.content,
            client_id: new_note.client_id,
            category: new_note.category,
            priority: new_note.priority,
            ai_relevant: new_note.ai_relevant,
            created_by: new_note.created_by,
            created_at: ts,
            updated_at: ts,
        };
        t.notes.push(note.clone());
        Ok(note)
    }

    async fn update(&self, note: Note) -> Result<Note> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .notes
            .iter_mut()
            .find(|n| n.id == note.id)
            .ok_or_else(|| Error::not_found("Note"))?;
        *slot = note.clone();
        Ok(note)
    }

    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize> {
        let mut t = self.tables.lock().unwrap();
        let before = t.notes.len();
        t.notes.retain(|n| !(n.id == id && n.created_by == owner));
        Ok(before - t.notes.len())
    }
}

#[async_trait]
impl AdRepositoryTrait for MemoryStore {
    fn list(&self, owner: RecordId, filter: &AdFilter) -> Result<Vec<AdWithClient>> {
        let t = self.tables.lock().unwrap();
        let mut ads: Vec<_> = t
            .ads
            .iter()
            .filter(|a| a.created_by == owner)
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.client_id.map_or(true, |id| a.client_id == Some(id)))
            .cloned()
            .collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ads
            .into_iter()
            .map(|ad| AdWithClient {
                client: t.summary(ad.client_id),
                ad,
            })
            .collect())
    }

    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<AdWithClient>> {
        let t = self.tables.lock().unwrap();
        Ok(t
            .ads
            .iter()
            .find(|a| a.id == id && a.created_by == owner)
            .cloned()
            .map(|ad| AdWithClient {
                client: t.summary(ad.client_id),
                ad,
            }))
    }

    async fn create(&self, new_ad: NewAd) -> Result<Ad> {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let ad = Ad {
            id: t.ads.len() as RecordId + 1,
            title: new_ad.title,
            description: new_ad.description,
            ad_type: new_ad.ad_type,
            ai_generated: new_ad.ai_generated,
            ai_prompt: new_ad.ai_prompt,
            content: new_ad.content,
            status: new_ad.status,
            client_id: new_ad.client_id,
            created_by: new_ad.created_by,
            created_at: ts,
            updated_at: ts,
        };
        t.ads.push(ad.clone());
        Ok(ad)
    }

    async fn update(&self, ad: Ad) -> Result<Ad> {
        let mut t = self.tables.lock().unwrap();
        let slot = t
            .ads
            .iter_mut()
            .find(|a| a.id == ad.id)
            .ok_or_else(|| Error::not_found("Ad"))?;
        *slot = ad.clone();
        Ok(ad)
    }

    async fn delete(&self, owner: RecordId, id: RecordId) -> Result<usize> {
        let mut t = self.tables.lock().unwrap();
        let before = t.ads.len();
        t.ads.retain(|a| !(a.id == id && a.created_by == owner));
        let removed = before - t.ads.len();
        if removed > 0 {
            t.posts.retain(|p| p.ad_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl PostHistoryRepositoryTrait for MemoryStore {
    fn list(&self, owner: RecordId, filter: &PostFilter) -> Result<Vec<PostWithAd>> {
        let t = self.tables.lock().unwrap();
        let mut posts: Vec<_> = t
            .posts
            .iter()
            .filter(|p| p.created_by == owner)
            .filter(|p| filter.platform.map_or(true, |pl| p.platform == pl))
            .filter(|p| filter.ad_id.map_or(true, |id| p.ad_id == id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts
            .into_iter()
            .map(|post| PostWithAd {
                ad: t.ads.iter().find(|a| a.id == post.ad_id).map(|a| AdSummary {
                    id: a.id,
                    title: a.title.clone(),
                    description: a.description.clone(),
                }),
                post,
            })
            .collect())
    }

    fn find(&self, owner: RecordId, id: RecordId) -> Result<Option<PostWithAd>> {
        Ok(PostHistoryRepositoryTrait::list(self, owner, &PostFilter::default())?
            .into_iter()
            .find(|p| p.post.id == id))
    }

    async fn create(&self, entry: NewPostHistory) -> Result<PostHistory> {
        let mut t = self.tables.lock().unwrap();
        let ts = t.next_timestamp();
        let post = PostHistory {
            id: t.posts.len() as RecordId + 1,
            ad_id: entry.ad_id,
            platform: entry.platform,
            post_id: entry.post_id,
            status: entry.status,
            message: entry.message,
            error: entry.error,
            published_at: entry.published_at.unwrap_or(ts),
            created_by: entry.created_by,
        };
        t.posts.push(post.clone());
        Ok(post)
    }
}

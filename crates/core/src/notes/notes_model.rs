//! Note domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clients::ClientSummary;
use crate::errors::ValidationError;
use crate::utils::{ids, non_blank};
use crate::{RecordId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    #[default]
    General,
    Preference,
    Interaction,
    Campaign,
    Other,
}

/// Declaration order is ranking order: `High` compares greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotePriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub title: String,
    pub content: String,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    pub category: NoteCategory,
    pub priority: NotePriority,
    pub ai_relevant: bool,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A note joined with the client it references, when that client still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteWithClient {
    pub note: Note,
    pub client: Option<ClientSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilter {
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    pub category: Option<NoteCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    pub category: Option<NoteCategory>,
    pub priority: Option<NotePriority>,
    pub ai_relevant: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub client_id: Option<RecordId>,
    pub category: NoteCategory,
    pub priority: NotePriority,
    pub ai_relevant: bool,
    pub created_by: RecordId,
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

impl NoteInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewNote> {
        Ok(NewNote {
            title: required(self.title.as_deref(), "title")?,
            content: required(self.content.as_deref(), "content")?,
            client_id: self.client_id,
            category: self.category.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            ai_relevant: self.ai_relevant.unwrap_or(true),
            created_by: owner,
        })
    }

    pub fn apply_to(self, note: &mut Note) -> Result<()> {
        if self.title.is_some() {
            note.title = required(self.title.as_deref(), "title")?;
        }
        if self.content.is_some() {
            note.content = required(self.content.as_deref(), "content")?;
        }
        if self.client_id.is_some() {
            note.client_id = self.client_id;
        }
        if let Some(category) = self.category {
            note.category = category;
        }
        if let Some(priority) = self.priority {
            note.priority = priority;
        }
        if let Some(ai_relevant) = self.ai_relevant {
            note.ai_relevant = ai_relevant;
        }
        Ok(())
    }
}

/// Orders notes for AI context: highest priority first, then newest.
pub fn rank_for_ai(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

use crate::core::models::poll::Poll;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Poll fields as submitted by the edit form, before trimming.
#[derive(Debug, Clone, Deserialize)]
pub struct Proposal {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A validated proposal: title and description trimmed, blank options dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edit {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialEq> FieldChange<T> {
    pub fn between(from: T, to: T) -> Option<Self> {
        if from == to {
            None
        } else {
            Some(Self { from, to })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedOption {
    pub id: Uuid,
    pub text: String,
    pub votes: u64,
}

/// What an edit would change, shown to the user before they confirm it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSummary {
    pub total_votes: u64,
    pub title: Option<FieldChange<String>>,
    pub description_changed: bool,
    pub options_changed: bool,
    pub added_options: Vec<String>,
    pub removed_options: Vec<RemovedOption>,
    pub is_public: Option<FieldChange<bool>>,
    pub allow_multiple_votes: Option<FieldChange<bool>>,
    pub expires_at_changed: bool,
    pub discarded_votes: u64,
}

impl ChangeSummary {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.description_changed
            && !self.options_changed
            && self.is_public.is_none()
            && self.allow_multiple_votes.is_none()
            && !self.expires_at_changed
    }
}

/// An edit held back until the user confirms it, because the poll already had votes.
#[derive(Debug, Clone, Serialize)]
pub struct PendingEdit {
    pub id: Uuid,
    pub poll_id: Uuid,
    pub base_updated_at: DateTime<Utc>,
    pub edit: Edit,
    pub summary: ChangeSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Submission {
    Applied { poll: Poll },
    AwaitingConfirmation { pending_edit: PendingEdit },
}

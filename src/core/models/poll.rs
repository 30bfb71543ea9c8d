use crate::core::models::option::{normalize_texts, OptionTally, PollOption};
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<PollOption>,
    pub created_by: String,
    pub is_active: bool,
    pub is_public: bool,
    pub allow_multiple_votes: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub created_by: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub allow_multiple_votes: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_public() -> bool {
    true
}

#[derive(Debug, Default)]
pub struct PollQuery {
    pub created_by: Option<String>,
    pub page: i64,
    pub size: i64,
}

#[derive(Debug, Default, Clone)]
pub struct Query {
    pub created_by_eq: Option<String>,
}

impl Query {
    pub fn matches(&self, poll: &Poll) -> bool {
        self.created_by_eq.as_ref().map_or(true, |c| &poll.created_by == c)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tally {
    pub poll_id: Uuid,
    pub total_votes: u64,
    pub options: Vec<OptionTally>,
}

/// Blank descriptions collapse to `None`.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description.map(str::trim).filter(|d| !d.is_empty()).map(str::to_owned)
}

impl Poll {
    pub fn create(data: Create, now: DateTime<Utc>) -> Result<Self, Error> {
        let texts = normalize_texts(&data.options);
        if texts.len() < 2 {
            return Err(Error::InsufficientOptions);
        }
        let title = data.title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }
        let id = Uuid::new_v4();
        Ok(Self {
            id,
            title: title.to_owned(),
            description: normalize_description(data.description.as_deref()),
            options: texts.into_iter().map(|t| PollOption::new(id, t)).collect(),
            created_by: data.created_by,
            is_active: true,
            is_public: data.is_public,
            allow_multiple_votes: data.allow_multiple_votes,
            expires_at: data.expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.votes).sum()
    }

    pub fn has_votes(&self) -> bool {
        self.total_votes() > 0
    }

    pub fn option(&self, option_id: Uuid) -> Option<&PollOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Returns the poll with one more vote on `option_id`. `self` is never touched, so on error the
    /// caller still holds the exact previous state.
    pub fn record_vote(&self, option_id: Uuid) -> Result<Self, Error> {
        if !self.is_active {
            return Err(Error::PollInactive);
        }
        let idx = self.options.iter().position(|o| o.id == option_id).ok_or(Error::OptionNotFound)?;
        let mut voted = self.clone();
        voted.options[idx].votes += 1;
        Ok(voted)
    }

    /// Flips the poll inactive once its expiration has passed. Returns whether it flipped.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(at) if self.is_active && at <= now => {
                self.is_active = false;
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }

    pub fn tally(&self) -> Tally {
        let total = self.total_votes();
        Tally {
            poll_id: self.id,
            total_votes: total,
            options: self
                .options
                .iter()
                .map(|o| OptionTally {
                    id: o.id,
                    text: o.text.clone(),
                    votes: o.votes,
                    percentage: o.percentage(total),
                })
                .collect(),
        }
    }
}

use crate::core::models::{
    common::Pagination,
    edit::PendingEdit,
    poll::{Poll, Query as PollFilter},
};
use crate::core::ports::repository::{PendingEditCommon, PollCommon, Store};
use crate::error::Error;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Keeps polls and pending edits in process memory. One instance is shared by all workers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    polls: RwLock<HashMap<Uuid, Poll>>,
    pending_edits: Mutex<HashMap<Uuid, PendingEdit>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn pending_edit_count(&self) -> usize {
        self.pending_edits.lock().await.len()
    }
}

impl PollCommon for MemoryStore {
    async fn insert(&self, poll: Poll) -> Result<Uuid, Error> {
        let id = poll.id;
        self.polls.write().await.insert(id, poll);
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Poll, Error> {
        self.polls.read().await.get(&id).cloned().ok_or(Error::PollNotFound)
    }

    async fn put(&self, poll: Poll) -> Result<(), Error> {
        let mut polls = self.polls.write().await;
        if !polls.contains_key(&poll.id) {
            return Err(Error::PollNotFound);
        }
        polls.insert(poll.id, poll);
        Ok(())
    }

    async fn query(&self, query: &PollFilter, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error> {
        let mut polls: Vec<Poll> = self.polls.read().await.values().filter(|p| query.matches(p)).cloned().collect();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(match pagination {
            Some(p) => p.paginate(polls),
            None => polls,
        })
    }

    async fn count(&self, query: &PollFilter) -> Result<i64, Error> {
        Ok(self.polls.read().await.values().filter(|p| query.matches(p)).count() as i64)
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.polls.write().await.remove(&id).map(|_| ()).ok_or(Error::PollNotFound)
    }

    async fn get_for_update<F>(&self, id: Uuid, f: F) -> Result<Poll, Error>
    where
        F: FnOnce(&Poll) -> Result<Poll, Error>,
    {
        let mut polls = self.polls.write().await;
        let current = polls.get(&id).ok_or(Error::PollNotFound)?;
        let next = f(current)?;
        polls.insert(id, next.clone());
        Ok(next)
    }
}

impl PendingEditCommon for MemoryStore {
    async fn insert(&self, edit: PendingEdit) -> Result<Uuid, Error> {
        let id = edit.id;
        // lock order: pending edits, then polls
        let mut pending = self.pending_edits.lock().await;
        if !self.polls.read().await.contains_key(&edit.poll_id) {
            return Err(Error::PollNotFound);
        }
        pending.insert(id, edit);
        Ok(id)
    }

    async fn take(&self, id: Uuid) -> Result<PendingEdit, Error> {
        self.pending_edits.lock().await.remove(&id).ok_or(Error::PendingEditNotFound)
    }

    async fn delete_by_poll(&self, poll_id: Uuid) -> Result<(), Error> {
        self.pending_edits.lock().await.retain(|_, e| e.poll_id != poll_id);
        Ok(())
    }

    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, Error> {
        let mut pending = self.pending_edits.lock().await;
        let before = pending.len();
        pending.retain(|_, e| e.created_at >= cutoff);
        Ok(before - pending.len())
    }
}

impl Store for MemoryStore {}

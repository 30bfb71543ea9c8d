use crate::core::models::{
    common::Pagination,
    edit::PendingEdit,
    poll::{Poll, Query as PollFilter},
};
use crate::error::Error;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait PollCommon {
    async fn insert(&self, poll: Poll) -> Result<Uuid, Error>;
    async fn get(&self, id: Uuid) -> Result<Poll, Error>;
    async fn put(&self, poll: Poll) -> Result<(), Error>;
    async fn query(&self, query: &PollFilter, pagination: Option<Pagination>) -> Result<Vec<Poll>, Error>;
    async fn count(&self, query: &PollFilter) -> Result<i64, Error>;
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
    /// Replaces the poll with whatever `f` returns, with no other writer in between.
    /// Nothing is written when `f` fails.
    async fn get_for_update<F>(&self, id: Uuid, f: F) -> Result<Poll, Error>
    where
        F: FnOnce(&Poll) -> Result<Poll, Error>;
}

pub trait PendingEditCommon {
    /// Fails with `PollNotFound` once the poll is gone, so no edit outlives its poll.
    async fn insert(&self, edit: PendingEdit) -> Result<Uuid, Error>;
    /// Removes and returns the pending edit.
    async fn take(&self, id: Uuid) -> Result<PendingEdit, Error>;
    async fn delete_by_poll(&self, poll_id: Uuid) -> Result<(), Error>;
    /// Drops every pending edit created before `cutoff`, returning how many went.
    async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<usize, Error>;
}

pub trait Store: PollCommon + PendingEditCommon {}

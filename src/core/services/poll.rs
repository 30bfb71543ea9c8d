use crate::core::models::{
    common::Pagination,
    option::PollOption,
    poll::{Create, Poll, PollQuery, Query, Tally},
};
use crate::core::ports::repository::{PendingEditCommon, PollCommon, Store};
use crate::error::Error;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn expired(poll: &Poll, now: DateTime<Utc>) -> Poll {
    let mut poll = poll.clone();
    if poll.expire_if_due(now) {
        log::info!("poll {} expired", poll.id);
    }
    poll
}

pub async fn create_poll<S>(store: &S, data: Create) -> Result<Poll, Error>
where
    S: Store,
{
    let poll = Poll::create(data, Utc::now())?;
    PollCommon::insert(store, poll.clone()).await?;
    log::info!("poll {} created by {} with {} options", poll.id, poll.created_by, poll.options.len());
    Ok(poll)
}

pub async fn poll_detail<S>(store: &S, id: Uuid) -> Result<Poll, Error>
where
    S: Store,
{
    let now = Utc::now();
    PollCommon::get_for_update(store, id, |p| Ok(expired(p, now))).await
}

pub async fn query_polls<S>(store: &S, query: PollQuery) -> Result<(Vec<Poll>, i64), Error>
where
    S: Store,
{
    let now = Utc::now();
    let filter = Query { created_by_eq: query.created_by };
    let total = PollCommon::count(store, &filter).await?;
    let size = usize::try_from(query.size).unwrap_or(0);
    let offset = usize::try_from(query.page.max(1) - 1).unwrap_or(usize::MAX).saturating_mul(size);
    let polls = PollCommon::query(store, &filter, Some(Pagination::new(size, Some(offset)))).await?;
    Ok((polls.iter().map(|p| expired(p, now)).collect(), total))
}

pub async fn user_polls<S>(store: &S, user: String) -> Result<Vec<Poll>, Error>
where
    S: Store,
{
    let now = Utc::now();
    let polls = PollCommon::query(store, &Query { created_by_eq: Some(user) }, None).await?;
    Ok(polls.iter().map(|p| expired(p, now)).collect())
}

pub async fn delete_poll<S>(store: &S, id: Uuid) -> Result<(), Error>
where
    S: Store,
{
    PollCommon::delete(store, id).await?;
    PendingEditCommon::delete_by_poll(store, id).await?;
    log::info!("poll {} deleted", id);
    Ok(())
}

pub async fn close_poll<S>(store: &S, id: Uuid) -> Result<Poll, Error>
where
    S: Store,
{
    let now = Utc::now();
    let poll = PollCommon::get_for_update(store, id, |p| {
        let mut p = p.clone();
        p.close(now);
        Ok(p)
    })
    .await?;
    log::info!("poll {} closed", id);
    Ok(poll)
}

pub async fn submit_vote<S>(store: &S, id: Uuid, option_id: Uuid) -> Result<Poll, Error>
where
    S: Store,
{
    let now = Utc::now();
    let poll = PollCommon::get_for_update(store, id, |p| expired(p, now).record_vote(option_id))
        .await
        .map_err(|e| {
            log::warn!("vote on poll {} option {} rejected: {}", id, option_id, e);
            e
        })?;
    log::debug!("vote recorded on poll {} option {}", id, option_id);
    Ok(poll)
}

pub async fn poll_results<S>(store: &S, id: Uuid) -> Result<Tally, Error>
where
    S: Store,
{
    let now = Utc::now();
    let poll = PollCommon::get_for_update(store, id, |p| Ok(expired(p, now))).await?;
    Ok(poll.tally())
}

fn demo_poll(title: &str, description: &str, created_by: &str, options: &[(&str, u64)], expires_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> Poll {
    let id = Uuid::new_v4();
    Poll {
        id,
        title: title.to_owned(),
        description: Some(description.to_owned()),
        options: options
            .iter()
            .map(|(text, votes)| PollOption {
                votes: *votes,
                ..PollOption::new(id, (*text).to_owned())
            })
            .collect(),
        created_by: created_by.to_owned(),
        is_active: true,
        is_public: true,
        allow_multiple_votes: false,
        expires_at,
        created_at,
        updated_at: created_at,
    }
}

/// Loads the two sample polls used for demos and local development.
pub async fn seed_demo_polls<S>(store: &S) -> Result<(), Error>
where
    S: Store,
{
    let date = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().ok_or_else(|| Error::ServerError("invalid seed date".into()));
    let polls = [
        demo_poll(
            "What's your favorite programming language?",
            "Let's see what the community prefers",
            "user1",
            &[("JavaScript", 45), ("Python", 38), ("TypeScript", 32), ("Rust", 15)],
            None,
            date(2024, 1, 15)?,
        ),
        demo_poll(
            "Best framework for building web apps?",
            "Share your experience and preferences",
            "user2",
            &[("React", 52), ("Vue", 28), ("Angular", 20), ("Svelte", 18)],
            Some(date(2024, 2, 15)?),
            date(2024, 1, 10)?,
        ),
    ];
    for poll in polls {
        PollCommon::insert(store, poll).await?;
    }
    log::info!("seeded demo polls");
    Ok(())
}

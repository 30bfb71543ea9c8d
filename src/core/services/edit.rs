use crate::core::guard;
use crate::core::models::{
    edit::{Proposal, Submission},
    poll::Poll,
};
use crate::core::ports::repository::{PendingEditCommon, PollCommon, Store};
use crate::error::Error;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Pending edits created before this instant have expired. `None` when nothing can have expired yet.
fn expiry_cutoff(now: DateTime<Utc>, ttl: Duration) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(ttl)
}

pub async fn submit_edit<S>(store: &S, poll_id: Uuid, proposal: Proposal, ttl: Duration) -> Result<Submission, Error>
where
    S: Store,
{
    let now = Utc::now();
    let mut outcome = None;
    PollCommon::get_for_update(store, poll_id, |current| {
        let mut current = current.clone();
        current.expire_if_due(now);
        let submission = guard::submit_edit(&current, proposal, now)?;
        let next = match &submission {
            Submission::Applied { poll } => poll.clone(),
            Submission::AwaitingConfirmation { .. } => current,
        };
        outcome = Some(submission);
        Ok(next)
    })
    .await?;
    let submission = outcome.ok_or_else(|| Error::ServerError("edit produced no outcome".into()))?;
    match &submission {
        Submission::Applied { poll } => log::info!("poll {} edited", poll.id),
        Submission::AwaitingConfirmation { pending_edit } => {
            if let Some(cutoff) = expiry_cutoff(now, ttl) {
                let swept = PendingEditCommon::delete_created_before(store, cutoff).await?;
                if swept > 0 {
                    log::debug!("dropped {} expired pending edits", swept);
                }
            }
            PendingEditCommon::insert(store, pending_edit.clone()).await?;
            log::info!("edit {} on poll {} awaits confirmation ({} votes)", pending_edit.id, poll_id, pending_edit.summary.total_votes);
        }
    }
    Ok(submission)
}

/// Confirming consumes the pending edit even when it can no longer be applied.
pub async fn confirm_edit<S>(store: &S, edit_id: Uuid, ttl: Duration) -> Result<Poll, Error>
where
    S: Store,
{
    let now = Utc::now();
    let pending = PendingEditCommon::take(store, edit_id).await?;
    if expiry_cutoff(now, ttl).map_or(false, |cutoff| pending.created_at < cutoff) {
        log::warn!("edit {} expired before confirmation", edit_id);
        return Err(Error::PendingEditNotFound);
    }
    let poll_id = pending.poll_id;
    let poll = PollCommon::get_for_update(store, poll_id, |current| {
        let mut current = current.clone();
        current.expire_if_due(now);
        guard::confirm_edit(pending, &current, now)
    })
    .await?;
    log::info!("edit {} on poll {} confirmed", edit_id, poll_id);
    Ok(poll)
}

pub async fn cancel_edit<S>(store: &S, edit_id: Uuid) -> Result<(), Error>
where
    S: Store,
{
    let pending = PendingEditCommon::take(store, edit_id).await?;
    guard::cancel_edit(pending);
    Ok(())
}

//! Edit guard: decides whether a proposed poll edit is applied straight away or has to wait for the
//! user's confirmation.
//!
//! A poll without pending edits is idle. `submit_edit` validates a proposal and either rejects it,
//! applies it, or (when any option already has votes) returns a [`PendingEdit`], which is the
//! awaiting-confirmation state. `confirm_edit` consumes a pending edit and applies it;
//! `cancel_edit` drops it and nothing changes.

use crate::core::models::edit::{ChangeSummary, Edit, FieldChange, PendingEdit, Proposal, RemovedOption, Submission};
use crate::core::models::option::{normalize_texts, PollOption};
use crate::core::models::poll::{normalize_description, Poll};
use crate::error::Error;
use chrono::{DateTime, Utc};
use itertools::{EitherOrBoth, Itertools};
use uuid::Uuid;

/// Rules evaluated in order, first failure wins: at least 2 non-blank options, non-blank title.
pub fn validate(proposal: Proposal) -> Result<Edit, Error> {
    let options = normalize_texts(&proposal.options);
    if options.len() < 2 {
        return Err(Error::InsufficientOptions);
    }
    let title = proposal.title.trim();
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }
    Ok(Edit {
        title: title.to_owned(),
        description: normalize_description(proposal.description.as_deref()),
        options,
        is_public: proposal.is_public,
        allow_multiple_votes: proposal.allow_multiple_votes,
        expires_at: proposal.expires_at,
    })
}

pub fn summarize(poll: &Poll, edit: &Edit) -> ChangeSummary {
    let options_changed = poll.options.len() != edit.options.len() || poll.options.iter().zip(&edit.options).any(|(o, t)| &o.text != t);
    let removed_options: Vec<RemovedOption> = poll
        .options
        .iter()
        .skip(edit.options.len())
        .map(|o| RemovedOption {
            id: o.id,
            text: o.text.clone(),
            votes: o.votes,
        })
        .collect();
    ChangeSummary {
        total_votes: poll.total_votes(),
        title: FieldChange::between(poll.title.clone(), edit.title.clone()),
        description_changed: normalize_description(poll.description.as_deref()) != edit.description,
        options_changed,
        added_options: edit.options.iter().skip(poll.options.len()).cloned().collect(),
        discarded_votes: removed_options.iter().map(|o| o.votes).sum(),
        removed_options,
        is_public: FieldChange::between(poll.is_public, edit.is_public),
        allow_multiple_votes: FieldChange::between(poll.allow_multiple_votes, edit.allow_multiple_votes),
        expires_at_changed: poll.expires_at != edit.expires_at,
    }
}

/// Option texts are paired with the existing options by position, so surviving options keep their
/// ids and votes. Extra texts become new zero-vote options, missing ones drop the trailing options.
pub fn apply_edit(poll: &Poll, edit: &Edit, now: DateTime<Utc>) -> Poll {
    let options = poll
        .options
        .iter()
        .zip_longest(&edit.options)
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(existing, text) => Some(PollOption {
                text: text.clone(),
                ..existing.clone()
            }),
            EitherOrBoth::Right(text) => Some(PollOption::new(poll.id, text.clone())),
            EitherOrBoth::Left(_) => None,
        })
        .collect();
    Poll {
        title: edit.title.clone(),
        description: edit.description.clone(),
        options,
        is_public: edit.is_public,
        allow_multiple_votes: edit.allow_multiple_votes,
        expires_at: edit.expires_at,
        updated_at: now,
        ..poll.clone()
    }
}

pub fn submit_edit(poll: &Poll, proposal: Proposal, now: DateTime<Utc>) -> Result<Submission, Error> {
    if !poll.is_active {
        return Err(Error::PollInactive);
    }
    let edit = validate(proposal)?;
    let summary = summarize(poll, &edit);
    if summary.is_empty() {
        return Err(Error::NoChangesDetected);
    }
    if poll.has_votes() {
        return Ok(Submission::AwaitingConfirmation {
            pending_edit: PendingEdit {
                id: Uuid::new_v4(),
                poll_id: poll.id,
                base_updated_at: poll.updated_at,
                edit,
                summary,
                created_at: now,
            },
        });
    }
    Ok(Submission::Applied { poll: apply_edit(poll, &edit, now) })
}

/// Applies a confirmed edit on top of `current`, the poll as it is now. Votes cast while the edit was
/// waiting are kept, but any other edit in between makes this one stale.
pub fn confirm_edit(pending: PendingEdit, current: &Poll, now: DateTime<Utc>) -> Result<Poll, Error> {
    if pending.poll_id != current.id {
        return Err(Error::PendingEditNotFound);
    }
    if !current.is_active {
        return Err(Error::PollInactive);
    }
    if current.updated_at != pending.base_updated_at {
        return Err(Error::StaleEdit);
    }
    Ok(apply_edit(current, &pending.edit, now))
}

pub fn cancel_edit(pending: PendingEdit) {
    log::debug!("edit {} on poll {} cancelled", pending.id, pending.poll_id);
}

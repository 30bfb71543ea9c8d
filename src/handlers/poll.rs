use crate::actix_web::{
    web::{Data, Json, Path, Query},
    HttpResponse,
};
use crate::config::Config;
use crate::core::models::{
    edit::{Proposal, Submission},
    poll::{Create, Poll, PollQuery, Tally},
};
use crate::core::ports::repository::Store;
use crate::core::services::{edit as edit_service, poll as service};
use crate::error::Error;
use crate::request::{PollList, Vote};
use crate::response::{DeleteResponse, List, VoteResponse};
use uuid::Uuid;

pub async fn list<S: Store + 'static>(Query(PollList { page, size, created_by }): Query<PollList>, store: Data<S>) -> Result<Json<List<Poll>>, Error> {
    let (polls, total) = service::query_polls(store.get_ref(), PollQuery { created_by, page, size }).await?;
    Ok(Json(List::new(polls, total)))
}

pub async fn create<S: Store + 'static>(Json(body): Json<Create>, store: Data<S>) -> Result<HttpResponse, Error> {
    let poll = service::create_poll(store.get_ref(), body).await?;
    Ok(HttpResponse::Created().json(poll))
}

pub async fn detail<S: Store + 'static>(path: Path<Uuid>, store: Data<S>) -> Result<Json<Poll>, Error> {
    let id = path.into_inner();
    Ok(Json(service::poll_detail(store.get_ref(), id).await?))
}

pub async fn update<S: Store + 'static>(path: Path<Uuid>, Json(body): Json<Proposal>, store: Data<S>, config: Data<Config>) -> Result<Json<Submission>, Error> {
    let id = path.into_inner();
    Ok(Json(edit_service::submit_edit(store.get_ref(), id, body, config.pending_edit_ttl).await?))
}

pub async fn delete<S: Store + 'static>(path: Path<Uuid>, store: Data<S>) -> Result<Json<DeleteResponse>, Error> {
    let id = path.into_inner();
    service::delete_poll(store.get_ref(), id).await?;
    Ok(Json(DeleteResponse { id }))
}

pub async fn close<S: Store + 'static>(path: Path<Uuid>, store: Data<S>) -> Result<Json<Poll>, Error> {
    let id = path.into_inner();
    Ok(Json(service::close_poll(store.get_ref(), id).await?))
}

pub async fn vote<S: Store + 'static>(path: Path<Uuid>, Json(Vote { option_id }): Json<Vote>, store: Data<S>) -> Result<Json<VoteResponse>, Error> {
    let id = path.into_inner();
    let poll = service::submit_vote(store.get_ref(), id, option_id).await?;
    let votes = poll.option(option_id).map(|o| o.votes).ok_or(Error::OptionNotFound)?;
    Ok(Json(VoteResponse {
        option_id,
        votes,
        total_votes: poll.total_votes(),
    }))
}

pub async fn results<S: Store + 'static>(path: Path<Uuid>, store: Data<S>) -> Result<Json<Tally>, Error> {
    let id = path.into_inner();
    Ok(Json(service::poll_results(store.get_ref(), id).await?))
}

pub async fn user_polls<S: Store + 'static>(path: Path<String>, store: Data<S>) -> Result<Json<Vec<Poll>>, Error> {
    let user_id = path.into_inner();
    Ok(Json(service::user_polls(store.get_ref(), user_id).await?))
}

use crate::actix_web::{
    web::{Data, Json, Path},
    HttpResponse,
};
use crate::config::Config;
use crate::core::models::poll::Poll;
use crate::core::ports::repository::Store;
use crate::core::services::edit as service;
use crate::error::Error;
use uuid::Uuid;

pub async fn confirm<S: Store + 'static>(path: Path<Uuid>, store: Data<S>, config: Data<Config>) -> Result<Json<Poll>, Error> {
    let edit_id = path.into_inner();
    Ok(Json(service::confirm_edit(store.get_ref(), edit_id, config.pending_edit_ttl).await?))
}

pub async fn cancel<S: Store + 'static>(path: Path<Uuid>, store: Data<S>) -> Result<HttpResponse, Error> {
    let edit_id = path.into_inner();
    service::cancel_edit(store.get_ref(), edit_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

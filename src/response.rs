use crate::serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        List { list, total }
    }
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub option_id: Uuid,
    pub votes: u64,
    pub total_votes: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: Uuid,
}

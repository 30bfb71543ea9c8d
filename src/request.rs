use crate::serde::Deserialize;
use uuid::Uuid;

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct PollList {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Vote {
    pub option_id: Uuid,
}

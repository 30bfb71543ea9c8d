use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: Uuid,
    pub text: String,
    pub votes: u64,
    pub poll_id: Uuid,
}

impl PollOption {
    pub fn new(poll_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            votes: 0,
            poll_id,
        }
    }

    /// Share of `total` held by this option, in `[0, 100]`. Zero when nobody has voted yet.
    pub fn percentage(&self, total: u64) -> f64 {
        if total > 0 {
            self.votes as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionTally {
    pub id: Uuid,
    pub text: String,
    pub votes: u64,
    pub percentage: f64,
}

/// Trims every entry and drops the blank ones, keeping input order.
pub fn normalize_texts(options: &[String]) -> Vec<String> {
    options.iter().map(|o| o.trim()).filter(|o| !o.is_empty()).map(str::to_owned).collect()
}

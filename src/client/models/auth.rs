//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bearer token obtained from the client credentials grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token string
    pub token: String,

    /// Token expiration time
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is expired or expires within five minutes
    pub fn is_expired(&self) -> bool {
        self.expires_at - chrono::Duration::minutes(5) < Utc::now()
    }
}

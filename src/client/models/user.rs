//! User and user group models

use serde::{Deserialize, Serialize};

/// Tenant user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDescriptor {
    /// User ID
    pub user_id: i64,

    /// Login name
    pub user_name: String,

    /// Email address (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Tenant user group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupDescriptor {
    /// Group ID
    pub id: i64,

    /// Group name
    pub name: String,
}

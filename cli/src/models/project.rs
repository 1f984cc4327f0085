//! User and project models

use serde::{Deserialize, Serialize};

/// The user owning the token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Client (organization) ID the user acts under
    pub id: String,

    /// Full name
    pub full_name: String,

    /// E-mail address
    pub email: String,
}

/// A project visible to the token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: String,
}

//! User Model

use super::role::RoleSet;
use serde::{Deserialize, Serialize};

/// User entity (`GET /api/Users/GetAll`), used by the admin order filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub roles: RoleSet,
}

impl User {
    /// Label for a user picker: full name, then email, then id
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity (`GET /api/Branches/GetAll`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Lightweight branch entry for pickers (`GET /api/Branches/GetList`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchListItem {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<&Branch> for BranchListItem {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name.clone(),
        }
    }
}

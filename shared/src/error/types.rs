//! Backend error payloads

use super::codes::ErrorCode;
use crate::util::opt_string_list;
use serde::{Deserialize, Serialize};

/// Code the cart endpoint puts in `errors[]` when required options are absent
pub const MISSING_REQUIRED_OPTIONS: &str = "MissingRequiredOptions";

/// One entry of the backend `errors[]` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    /// Symbolic code (e.g. `MissingRequiredOptions`) or a numeric code as a string
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "description")]
    pub message: Option<String>,
    /// Option type names the user still has to pick
    #[serde(default, alias = "data", deserialize_with = "opt_string_list")]
    pub missing_options: Option<Vec<String>>,
}

impl ApiErrorEntry {
    pub fn is_missing_options(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(MISSING_REQUIRED_OPTIONS))
    }

    /// Map the entry's code onto a local [`ErrorCode`] when it is recognizable
    pub fn error_code(&self) -> Option<ErrorCode> {
        let code = self.code.as_deref()?;
        if self.is_missing_options() {
            return Some(ErrorCode::MissingRequiredOptions);
        }
        code.parse::<u16>()
            .ok()
            .and_then(|n| ErrorCode::try_from(n).ok())
    }
}

/// Body the backend returns on failure (also embedded in the success envelope)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default, alias = "title")]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

impl ApiErrorBody {
    /// Missing option names, if the body carries a `MissingRequiredOptions` entry
    ///
    /// Names are collected across every matching entry, in order, without duplicates.
    /// An entry without an explicit list falls back to its message.
    pub fn missing_options(&self) -> Option<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        let mut found = false;
        for entry in self.errors.iter().filter(|e| e.is_missing_options()) {
            found = true;
            let listed = match &entry.missing_options {
                Some(list) => list.clone(),
                None => entry.message.clone().into_iter().collect(),
            };
            for name in listed {
                let name = name.trim().to_string();
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        found.then_some(names)
    }

    /// First human-readable message in the body
    pub fn first_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or_else(|| self.errors.iter().find_map(|e| e.message.as_deref()))
    }
}

/// Render missing option names as the list shown to the user
pub fn format_missing_options(names: &[String]) -> String {
    let mut out = String::from("Please select the required options:");
    for name in names {
        out.push_str("\n- ");
        out.push_str(name);
    }
    out
}

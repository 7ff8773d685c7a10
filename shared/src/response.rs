//! API Response types
//!
//! Envelope and paging structures returned by the Order and Catalog services.

use crate::error::ApiErrorEntry;
use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// ```json
/// {
///     "isSuccess": true,
///     "message": "Success",
///     "data": { ... },
///     "errors": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the backend considers the call successful
    #[serde(default = "default_true", alias = "success")]
    pub is_success: bool,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured errors (present on failure)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorEntry>,
}

fn default_true() -> bool {
    true
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            is_success: true,
            message: None,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Create a failed response
    pub fn failure(message: impl Into<String>, errors: Vec<ApiErrorEntry>) -> Self {
        Self {
            is_success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}

/// One page of a paginated search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new", alias = "data")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "first_page")]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    /// Missing on older backends; derive with [`PagedResult::page_count`]
    #[serde(default)]
    pub total_pages: Option<u32>,
}

fn first_page() -> u32 {
    1
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages: None,
        }
    }

    /// Total pages, preferring the backend's figure
    pub fn page_count(&self) -> u32 {
        if let Some(pages) = self.total_pages {
            return pages;
        }
        if self.page_size == 0 {
            return if self.total_count == 0 { 0 } else { 1 };
        }
        self.total_count.div_ceil(self.page_size as u64) as u32
    }
}

//! Order list queries
//!
//! The global order search takes a page request plus a list of
//! `{propertyName, propertyValue, range}` criteria. [`OrderFilters`] is the
//! console-side filter state; it renders to criteria for the global source
//! and applies itself in memory for the personal source, where only the
//! status filter exists.

use crate::models::Order;
use crate::order::OrderStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PROPERTY_STATUS: &str = "Status";
pub const PROPERTY_CREATED_AT: &str = "CreatedAt";
pub const PROPERTY_USER: &str = "UserId";
pub const PROPERTY_BRANCH: &str = "BranchId";

/// One server-side filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriterion {
    pub property_name: String,
    pub property_value: String,
    /// `property_value` is `"<from>,<to>"` rather than an exact match
    #[serde(default)]
    pub range: bool,
}

impl FilterCriterion {
    pub fn exact(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property.into(),
            property_value: value.into(),
            range: false,
        }
    }

    pub fn range(property: impl Into<String>, from: impl AsRef<str>, to: impl AsRef<str>) -> Self {
        Self {
            property_name: property.into(),
            property_value: format!("{},{}", from.as_ref(), to.as_ref()),
            range: true,
        }
    }
}

/// Body of `POST /api/Orders/GetAllWithPagination`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    /// 1-based
    pub page_number: u32,
    pub page_size: u32,
    #[serde(default)]
    pub filters: Vec<FilterCriterion>,
}

impl PaginationRequest {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size,
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterCriterion>) -> Self {
        self.filters = filters;
        self
    }
}

/// Filter state of the order table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    /// Inclusive creation-date range; either end may be open
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub user_id: Option<String>,
    pub branch_id: Option<i64>,
}

impl OrderFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_branch(mut self, branch_id: i64) -> Self {
        self.branch_id = Some(branch_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Server-side criteria for the global search
    ///
    /// An open date bound is sent as an empty string on that side.
    pub fn to_criteria(&self) -> Vec<FilterCriterion> {
        let mut criteria = Vec::new();

        if let Some(status) = self.status {
            criteria.push(FilterCriterion::exact(PROPERTY_STATUS, status.as_str()));
        }
        if self.created_from.is_some() || self.created_to.is_some() {
            let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
            criteria.push(FilterCriterion::range(
                PROPERTY_CREATED_AT,
                fmt(self.created_from),
                fmt(self.created_to),
            ));
        }
        if let Some(user_id) = self.user_id.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            criteria.push(FilterCriterion::exact(PROPERTY_USER, user_id));
        }
        if let Some(branch_id) = self.branch_id {
            criteria.push(FilterCriterion::exact(PROPERTY_BRANCH, branch_id.to_string()));
        }

        criteria
    }

    /// Client-side filter for the personal list (status only)
    pub fn matches_status(&self, order: &Order) -> bool {
        self.status.is_none_or(|s| order.status == s)
    }

    /// Apply [`Self::matches_status`] to a fetched list
    pub fn apply_personal(&self, orders: Vec<Order>) -> Vec<Order> {
        orders
            .into_iter()
            .filter(|o| self.matches_status(o))
            .collect()
    }
}

//! Shared types for the Dinebox console
//!
//! Wire models, error codes and response envelopes, plus the pure order
//! logic (price reconciliation, status lifecycle, role-scoped capabilities)
//! used by the client.

pub mod access;
pub mod error;
pub mod models;
pub mod money;
pub mod order;
pub mod query;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use access::{Capabilities, ListSource, derive_capabilities};
pub use error::{ErrorCategory, ErrorCode};
pub use order::{OrderStatus, PricingBreakdown, reconcile};
pub use query::{FilterCriterion, OrderFilters, PaginationRequest};
pub use response::{ApiResponse, PagedResult};

//! Order domain logic
//!
//! - `status`: lifecycle gate deciding which actions the console offers
//! - `pricing`: reconciles the service's price fields into one breakdown

pub mod pricing;
pub mod status;

// Re-exports
pub use pricing::{
    ItemPricing, PricingBreakdown, ResolvedItem, delivery_fee, reconcile, reconcile_item,
    upstream_drift,
};
pub use status::{
    OrderActions, OrderStatus, StatusDisplay, available_actions, can_advance_status, can_reprint,
    is_cancelable,
};

//! Role-scoped view capabilities
//!
//! The console fetches the viewer's profile once and derives everything it
//! may show from the role set. Staff (Admin, Restaurant, Branch) work on the
//! global order list; everyone else sees only their own orders.

use crate::models::RoleSet;
use serde::{Deserialize, Serialize};

/// What the current viewer is allowed to see and do
///
/// `Default` is the unauthenticated view: nothing beyond "my orders".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_see_all_orders: bool,
    pub can_see_all_branches: bool,
    pub can_mutate_status: bool,
    pub can_reprint: bool,
    pub can_filter_by_user: bool,
}

/// Which list endpoint backs the order table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListSource {
    /// Paginated search over every order, filtered server-side
    Global,
    /// The viewer's own orders, unpaginated, filtered client-side
    Personal,
}

impl Capabilities {
    pub fn list_source(&self) -> ListSource {
        if self.can_see_all_orders {
            ListSource::Global
        } else {
            ListSource::Personal
        }
    }
}

pub fn derive_capabilities(roles: &RoleSet) -> Capabilities {
    let staff = roles.is_admin_or_restaurant_or_branch();
    let management = roles.is_admin_or_restaurant();
    Capabilities {
        can_see_all_orders: staff,
        can_see_all_branches: management,
        can_mutate_status: staff,
        can_reprint: staff,
        can_filter_by_user: management,
    }
}

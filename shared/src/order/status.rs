//! Order status lifecycle
//!
//! ```text
//! Pending → Confirmed → Preparing → OutForDelivery → Delivered
//!    └──────────┴───────────┴──────────────┴──→ Cancelled
//! ```
//!
//! `Delivered` and `Cancelled` are terminal: no action is offered from them.
//! The Order Service is the authority on transitions; the gate here only
//! decides what the console offers.

use crate::access::Capabilities;
use crate::models::RoleSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Order status (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order (legacy integer code = index)
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OutForDelivery => "OutForDelivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Legacy integer code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(code).ok()?).copied()
    }

    /// Case-insensitive name parse; also accepts `Canceled` and `Out_For_Delivery` spellings
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        if normalized.eq_ignore_ascii_case("canceled") {
            return Some(OrderStatus::Cancelled);
        }
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(&normalized))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Next status on the forward path; `None` once terminal
    pub fn next(&self) -> Option<Self> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether the console offers moving from `self` to `to`
    ///
    /// Forward moves may skip steps (a pickup order never goes out for
    /// delivery); cancelling is allowed from any non-terminal status.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() || *self == to {
            return false;
        }
        to == OrderStatus::Cancelled || to > *self
    }

    pub fn display(&self) -> StatusDisplay {
        match self {
            OrderStatus::Pending => StatusDisplay {
                label: "Pending",
                icon: "clock",
                color: "#f59e0b",
            },
            OrderStatus::Confirmed => StatusDisplay {
                label: "Confirmed",
                icon: "check-circle",
                color: "#3b82f6",
            },
            OrderStatus::Preparing => StatusDisplay {
                label: "Preparing",
                icon: "chef-hat",
                color: "#8b5cf6",
            },
            OrderStatus::OutForDelivery => StatusDisplay {
                label: "Out for delivery",
                icon: "truck",
                color: "#06b6d4",
            },
            OrderStatus::Delivered => StatusDisplay {
                label: "Delivered",
                icon: "package-check",
                color: "#22c55e",
            },
            OrderStatus::Cancelled => StatusDisplay {
                label: "Cancelled",
                icon: "x-circle",
                color: "#ef4444",
            },
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => OrderStatus::from_code(code)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown order status code {code}"))),
            Raw::Name(name) => OrderStatus::parse(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown order status {name:?}"))),
        }
    }
}

/// How a status is rendered in lists and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub label: &'static str,
    /// Icon name from the console's icon set
    pub icon: &'static str,
    /// Badge color (hex)
    pub color: &'static str,
}

/// Whether a cancel action is offered for an order in `status`
pub fn is_cancelable(status: OrderStatus) -> bool {
    !status.is_terminal()
}

/// Reprinting is open to any staff role
pub fn can_reprint(roles: &RoleSet) -> bool {
    roles.is_admin_or_restaurant_or_branch()
}

/// Same gate as [`can_reprint`]
pub fn can_advance_status(roles: &RoleSet) -> bool {
    roles.is_admin_or_restaurant_or_branch()
}

/// Actions the console offers on one order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderActions {
    pub cancel: bool,
    /// Status the "advance" button moves to, when offered
    pub advance: Option<OrderStatus>,
    pub reprint: bool,
}

/// Actions available at `status` for a viewer with `capabilities`
///
/// Cancel follows the status alone (customers may cancel their own
/// orders); advancing needs status-mutation rights.
pub fn available_actions(status: OrderStatus, capabilities: &Capabilities) -> OrderActions {
    OrderActions {
        cancel: is_cancelable(status),
        advance: if capabilities.can_mutate_status {
            status.next()
        } else {
            None
        },
        reprint: capabilities.can_reprint,
    }
}

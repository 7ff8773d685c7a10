//! Order Model
//!
//! Read-only views of orders as the Order Service returns them. Field names
//! drifted across backend versions, so most fields are optional and carry
//! aliases; [`crate::order::pricing`] resolves them into one breakdown.

use super::menu::MenuItem;
use crate::order::OrderStatus;
use crate::util::{opt_f64, opt_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery address; an order without one is a restaurant pickup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "addressLine")]
    pub address: Option<String>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Location {
    /// One-line address for tables and receipts
    pub fn summary(&self) -> String {
        [
            self.area_name.as_deref(),
            self.address.as_deref(),
            self.building.as_deref(),
            self.floor.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Delivery area pricing the order was placed under
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub area_name: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub estimated_time_min: Option<u32>,
    #[serde(default)]
    pub estimated_time_max: Option<u32>,
}

/// Option selected on an order line, priced at order time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemOption {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "optionName")]
    pub name: Option<String>,
    #[serde(default)]
    pub option_type_name: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "opt_f64")]
    pub option_price_at_order: Option<f64>,
}

/// A single order line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub menu_item_id: Option<i64>,
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub name_snapshot_at_order: Option<String>,
    #[serde(default)]
    pub name_snapshot: Option<String>,
    #[serde(default)]
    pub description_snapshot_at_order: Option<String>,
    #[serde(default)]
    pub description_snapshot: Option<String>,
    #[serde(default)]
    pub image_url_snapshot_at_order: Option<String>,
    #[serde(default)]
    pub image_url_snapshot: Option<String>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub base_price_snapshot_at_order: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub base_price_snapshot: Option<f64>,

    /// Live catalog entry, last resort when no snapshot was captured
    #[serde(default)]
    pub menu_item: Option<MenuItem>,

    #[serde(default, alias = "selectedOptions", alias = "orderItemOptions")]
    pub options: Option<Vec<OrderItemOption>>,
    /// Discount already scoped to this line (not per unit)
    #[serde(default, deserialize_with = "opt_f64")]
    pub total_discount: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Order as returned by the Order Service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default, alias = "orderStatus")]
    pub status: OrderStatus,

    #[serde(default, alias = "createdOn", deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub delivery_fee: Option<DeliveryFeeRef>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub delivery_cost: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub delivery_price: Option<f64>,

    #[serde(default, deserialize_with = "opt_f64")]
    pub total_without_fee: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub total_discount: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub total_price: Option<f64>,

    #[serde(default, alias = "orderItems")]
    pub items: Option<Vec<OrderItem>>,

    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, alias = "customerName")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub branch_id: Option<i64>,
    #[serde(default)]
    pub branch_name: Option<String>,
}

impl Order {
    /// No delivery address means the customer collects at the restaurant
    pub fn is_pickup(&self) -> bool {
        self.location.is_none()
    }

    /// Order number for display, falling back to the numeric id
    pub fn display_number(&self) -> String {
        match self.order_number.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("#{}", self.id),
        }
    }

    pub fn items(&self) -> &[OrderItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Body of `PUT /api/Orders/UpdateStatus/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub order_status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_parses_legacy_shape() {
        let json = r#"{
            "id": 7,
            "orderNumber": "A-0007",
            "orderStatus": 2,
            "createdOn": "2024-05-01T12:00:00",
            "location": null,
            "deliveryCost": "15",
            "orderItems": [
                {"quantity": 2, "nameSnapshot": "Burger", "basePriceSnapshot": 45.99,
                 "selectedOptions": [{"optionName": "Cheese", "price": 5}],
                 "totalDiscount": 10}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert!(order.is_pickup());
        assert_eq!(order.delivery_cost, Some(15.0));
        assert!(order.created_at.is_some());
        let item = &order.items()[0];
        assert_eq!(item.quantity, 2);
        assert_eq!(item.options.as_ref().unwrap()[0].option_price_at_order, Some(5.0));
    }

    #[test]
    fn test_order_minimal_payload() {
        let order: Order = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items().is_empty());
        assert_eq!(order.display_number(), "#3");
    }

    #[test]
    fn test_location_summary() {
        let loc = Location {
            area_name: Some("Downtown".into()),
            address: Some(" 5 Main St ".into()),
            floor: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(loc.summary(), "Downtown, 5 Main St");
    }

    #[test]
    fn test_status_update_body() {
        let body = OrderStatusUpdate {
            order_status: OrderStatus::OutForDelivery,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"orderStatus":"OutForDelivery"}"#
        );
    }
}

//! Order price reconciliation
//!
//! The Order Service reports prices through several partially redundant
//! fields whose names changed between versions. [`reconcile`] turns any of
//! those shapes into one [`PricingBreakdown`], recomputing from the order
//! lines whenever they are present.
//!
//! Nothing here fails: every missing field has a zero-equivalent, and every
//! figure in a breakdown is non-negative.

use crate::models::{Order, OrderItem};
use crate::money::{money_eq, non_negative, to_decimal, to_f64};
use rust_decimal::Decimal;

/// Canonical price breakdown of one order (all amounts rounded to cents)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PricingBreakdown {
    /// Σ base price × quantity
    pub subtotal: f64,
    /// Σ option price × quantity
    pub total_additions: f64,
    /// Σ line discounts
    pub total_discount: f64,
    /// subtotal + total_additions
    pub total_before_discount: f64,
    /// total_before_discount − total_discount
    pub total_after_discount_before_delivery: f64,
    pub delivery_fee: f64,
    /// total_after_discount_before_delivery + delivery_fee
    pub total_with_fee: f64,
}

/// Figures for a single order line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemPricing {
    pub base_price: f64,
    /// Σ option prices for one unit
    pub options_per_unit: f64,
    pub quantity: i64,
    /// base price × quantity
    pub subtotal: f64,
    /// options per unit × quantity
    pub additions: f64,
    /// Line discount as sent (negative → 0)
    pub discount: f64,
    /// max(0, (base + options) × quantity − discount)
    pub final_price: f64,
}

/// An order line with its snapshot fields resolved
///
/// Each field prefers the `…SnapshotAtOrder` name, then the older
/// `…Snapshot` name, then the live menu item.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedItem<'a> {
    item: &'a OrderItem,
}

impl<'a> ResolvedItem<'a> {
    pub fn new(item: &'a OrderItem) -> Self {
        Self { item }
    }

    pub fn name(&self) -> Option<&'a str> {
        let item = self.item;
        item.name_snapshot_at_order
            .as_deref()
            .or(item.name_snapshot.as_deref())
            .or_else(|| item.menu_item.as_ref().and_then(|m| m.name.as_deref()))
    }

    pub fn description(&self) -> Option<&'a str> {
        let item = self.item;
        item.description_snapshot_at_order
            .as_deref()
            .or(item.description_snapshot.as_deref())
            .or_else(|| item.menu_item.as_ref().and_then(|m| m.description.as_deref()))
    }

    pub fn image_url(&self) -> Option<&'a str> {
        let item = self.item;
        item.image_url_snapshot_at_order
            .as_deref()
            .or(item.image_url_snapshot.as_deref())
            .or_else(|| item.menu_item.as_ref().and_then(|m| m.image_url.as_deref()))
    }

    /// Unit base price; `None` when no source carries one
    pub fn base_price(&self) -> Option<f64> {
        let item = self.item;
        item.base_price_snapshot_at_order
            .or(item.base_price_snapshot)
            .or_else(|| item.menu_item.as_ref().and_then(|m| m.base_price))
    }

    /// Option names in selection order, skipping unnamed entries
    pub fn option_names(&self) -> Vec<&'a str> {
        self.item
            .options
            .iter()
            .flatten()
            .filter_map(|o| o.name.as_deref())
            .collect()
    }
}

/// Line amounts in Decimal, before rounding
struct LineTotals {
    base: Decimal,
    options: Decimal,
    quantity: Decimal,
    subtotal: Decimal,
    additions: Decimal,
    discount: Decimal,
}

impl LineTotals {
    fn of(item: &OrderItem) -> Self {
        let base = non_negative(ResolvedItem::new(item).base_price());
        let options: Decimal = item
            .options
            .iter()
            .flatten()
            .map(|o| non_negative(o.option_price_at_order))
            .sum();
        let quantity = Decimal::from(item.quantity.max(0));
        let subtotal = base * quantity;
        let additions = options * quantity;
        let discount = non_negative(item.total_discount);

        Self {
            base,
            options,
            quantity,
            subtotal,
            additions,
            discount,
        }
    }

    /// A discount larger than the line itself only zeroes the line
    fn final_price(&self) -> Decimal {
        (self.subtotal + self.additions - self.discount).max(Decimal::ZERO)
    }
}

/// Price one order line
pub fn reconcile_item(item: &OrderItem) -> ItemPricing {
    let line = LineTotals::of(item);
    ItemPricing {
        base_price: to_f64(line.base),
        options_per_unit: to_f64(line.options),
        quantity: item.quantity.max(0),
        subtotal: to_f64(line.subtotal),
        additions: to_f64(line.additions),
        discount: to_f64(line.discount),
        final_price: to_f64(line.final_price()),
    }
}

/// Order-level delivery fee: `deliveryCost`, then `deliveryPrice`, then `deliveryFee.fee`
pub fn delivery_fee(order: &Order) -> f64 {
    to_f64(delivery_fee_decimal(order))
}

fn delivery_fee_decimal(order: &Order) -> Decimal {
    non_negative(
        order
            .delivery_cost
            .or(order.delivery_price)
            .or_else(|| order.delivery_fee.as_ref().and_then(|f| f.fee)),
    )
}

/// Upstream grand total with the negative-sign quirk corrected
pub fn upstream_total(order: &Order) -> Option<f64> {
    order.total_price.map(|p| to_f64(to_decimal(p).abs()))
}

/// How far the upstream `totalPrice` is from `breakdown.total_with_fee`
///
/// `None` when the service sent no total or both agree to the cent.
pub fn upstream_drift(order: &Order, breakdown: &PricingBreakdown) -> Option<f64> {
    let upstream = upstream_total(order)?;
    if money_eq(upstream, breakdown.total_with_fee) {
        return None;
    }
    Some(to_f64(to_decimal(upstream) - to_decimal(breakdown.total_with_fee)))
}

/// Compute the canonical breakdown of `order`
pub fn reconcile(order: &Order) -> PricingBreakdown {
    let fee = delivery_fee_decimal(order);

    let items = order.items();
    if items.is_empty() {
        return reconcile_from_aggregates(order, fee);
    }

    let breakdown = reconcile_lines(items, fee);
    if let Some(drift) = upstream_drift(order, &breakdown) {
        tracing::debug!(
            order_id = order.id,
            drift,
            "recomputed total differs from totalPrice"
        );
    }
    breakdown
}

fn reconcile_lines(items: &[OrderItem], fee: Decimal) -> PricingBreakdown {

    let mut subtotal = Decimal::ZERO;
    let mut additions = Decimal::ZERO;
    let mut discount = Decimal::ZERO;
    for item in items {
        let line = LineTotals::of(item);
        subtotal += line.subtotal;
        additions += line.additions;
        discount += line.discount;
    }

    let before_discount = subtotal + additions;
    let after_discount = (before_discount - discount).max(Decimal::ZERO);

    PricingBreakdown {
        subtotal: to_f64(subtotal),
        total_additions: to_f64(additions),
        total_discount: to_f64(discount),
        total_before_discount: to_f64(before_discount),
        total_after_discount_before_delivery: to_f64(after_discount),
        delivery_fee: to_f64(fee),
        total_with_fee: to_f64(after_discount + fee),
    }
}

/// Breakdown for orders that arrive without lines
///
/// `totalWithoutFee` is the amount after discount and before delivery. When
/// it is missing, the (sign-corrected) `totalPrice` minus the fee stands in.
fn reconcile_from_aggregates(order: &Order, fee: Decimal) -> PricingBreakdown {
    tracing::debug!(order_id = order.id, "order has no lines, pricing from aggregates");
    if let Some(total) = order.total_price.filter(|p| *p < 0.0) {
        tracing::warn!(order_id = order.id, total, "negative totalPrice, using its absolute value");
    }
    let discount = non_negative(order.total_discount);
    let after_discount = match order.total_without_fee {
        Some(v) => to_decimal(v).abs(),
        None => order
            .total_price
            .map(|p| (to_decimal(p).abs() - fee).max(Decimal::ZERO))
            .unwrap_or_default(),
    };
    let before_discount = after_discount + discount;

    PricingBreakdown {
        subtotal: to_f64(before_discount),
        total_additions: 0.0,
        total_discount: to_f64(discount),
        total_before_discount: to_f64(before_discount),
        total_after_discount_before_delivery: to_f64(after_discount),
        delivery_fee: to_f64(fee),
        total_with_fee: to_f64(after_discount + fee),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryFeeRef, MenuItem, OrderItemOption};
    use crate::money::{format_money, parse_money};

    fn option(name: &str, price: f64) -> OrderItemOption {
        OrderItemOption {
            name: Some(name.to_string()),
            option_price_at_order: Some(price),
            ..Default::default()
        }
    }

    fn burger() -> OrderItem {
        OrderItem {
            quantity: 2,
            base_price_snapshot: Some(45.99),
            options: Some(vec![option("Cheese", 5.0)]),
            total_discount: Some(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_example() {
        let pricing = reconcile_item(&burger());
        assert_eq!(pricing.subtotal, 91.98);
        assert_eq!(pricing.additions, 10.0);
        assert_eq!(pricing.discount, 10.0);
        assert_eq!(pricing.final_price, 91.98);
    }

    #[test]
    fn test_breakdown_from_items() {
        let order = Order {
            id: 1,
            items: Some(vec![
                burger(),
                OrderItem {
                    quantity: 1,
                    base_price_snapshot_at_order: Some(12.5),
                    ..Default::default()
                },
            ]),
            delivery_fee: Some(DeliveryFeeRef {
                fee: Some(15.0),
                ..Default::default()
            }),
            total_price: Some(-999.0),
            ..Default::default()
        };

        let b = reconcile(&order);
        assert_eq!(b.subtotal, 104.48);
        assert_eq!(b.total_additions, 10.0);
        assert_eq!(b.total_discount, 10.0);
        assert_eq!(b.total_before_discount, 114.48);
        assert_eq!(b.total_after_discount_before_delivery, 104.48);
        assert_eq!(b.delivery_fee, 15.0);
        assert_eq!(b.total_with_fee, 119.48);
    }

    #[test]
    fn test_empty_items_use_aggregates() {
        let order = Order {
            id: 2,
            items: Some(vec![]),
            total_without_fee: Some(80.0),
            total_discount: Some(5.0),
            delivery_cost: Some(10.0),
            ..Default::default()
        };

        let b = reconcile(&order);
        assert_eq!(b.total_additions, 0.0);
        assert_eq!(b.total_after_discount_before_delivery, 80.0);
        assert_eq!(b.total_discount, 5.0);
        assert_eq!(b.total_before_discount, 85.0);
        assert_eq!(b.subtotal, 85.0);
        assert_eq!(b.delivery_fee, 10.0);
        assert_eq!(b.total_with_fee, 90.0);

        let absent = Order {
            items: None,
            ..order.clone()
        };
        assert_eq!(reconcile(&absent), b);
    }

    #[test]
    fn test_negative_total_price_is_absolute() {
        let order = Order {
            id: 3,
            total_price: Some(-57.5),
            delivery_price: Some(7.5),
            ..Default::default()
        };

        let b = reconcile(&order);
        assert_eq!(b.total_after_discount_before_delivery, 50.0);
        assert_eq!(b.total_with_fee, 57.5);
        assert_eq!(upstream_total(&order), Some(57.5));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let b = reconcile(&Order::default());
        assert_eq!(b, PricingBreakdown::default());
    }

    #[test]
    fn test_over_discount_clamps_to_zero() {
        let items: Vec<OrderItem> = [(10.0, 1, 50.0), (3.0, 4, 12.0), (0.0, 3, 1.0)]
            .into_iter()
            .map(|(price, qty, disc)| OrderItem {
                quantity: qty,
                base_price_snapshot: Some(price),
                total_discount: Some(disc),
                ..Default::default()
            })
            .collect();

        for item in &items {
            let p = reconcile_item(item);
            assert!(p.final_price >= 0.0);
            assert_eq!(p.final_price, 0.0);
        }

        let order = Order {
            id: 4,
            items: Some(items),
            ..Default::default()
        };
        let b = reconcile(&order);
        assert_eq!(b.total_after_discount_before_delivery, 0.0);
        assert_eq!(b.total_discount, 63.0);
        assert!(b.total_with_fee >= 0.0);
    }

    #[test]
    fn test_order_discount_sums_raw_line_discounts() {
        let line = |price: f64, disc: f64| OrderItem {
            quantity: 1,
            base_price_snapshot: Some(price),
            total_discount: Some(disc),
            ..Default::default()
        };
        let order = Order {
            id: 6,
            items: Some(vec![line(10.0, 50.0), line(20.0, 5.0)]),
            ..Default::default()
        };

        assert_eq!(reconcile_item(&line(10.0, 50.0)).discount, 50.0);
        assert_eq!(reconcile_item(&line(10.0, 50.0)).final_price, 0.0);

        let b = reconcile(&order);
        assert_eq!(b.total_discount, 55.0);
        assert_eq!(b.total_before_discount, 30.0);
        assert_eq!(b.total_after_discount_before_delivery, 0.0);
    }

    #[test]
    fn test_upstream_drift() {
        let order = Order {
            id: 7,
            items: Some(vec![burger()]),
            total_price: Some(-91.98),
            ..Default::default()
        };
        let b = reconcile(&order);
        assert_eq!(upstream_drift(&order, &b), None);

        let stale = Order {
            total_price: Some(100.0),
            ..order.clone()
        };
        assert_eq!(upstream_drift(&stale, &b), Some(8.02));
        assert_eq!(upstream_drift(&Order::default(), &b), None);
    }

    #[test]
    fn test_negative_fields_never_go_below_zero() {
        let order = Order {
            id: 5,
            delivery_cost: Some(-3.0),
            items: Some(vec![OrderItem {
                quantity: -2,
                base_price_snapshot: Some(-10.0),
                options: Some(vec![option("Bad", -4.0)]),
                total_discount: Some(-1.0),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let b = reconcile(&order);
        for v in [
            b.subtotal,
            b.total_additions,
            b.total_discount,
            b.total_before_discount,
            b.total_after_discount_before_delivery,
            b.delivery_fee,
            b.total_with_fee,
        ] {
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn test_snapshot_resolution_order() {
        let menu = MenuItem {
            name: Some("Live".into()),
            base_price: Some(1.0),
            image_url: Some("live.png".into()),
            ..Default::default()
        };
        let mut item = OrderItem {
            quantity: 1,
            name_snapshot_at_order: Some("New".into()),
            name_snapshot: Some("Old".into()),
            base_price_snapshot: Some(2.0),
            menu_item: Some(menu),
            ..Default::default()
        };

        let r = ResolvedItem::new(&item);
        assert_eq!(r.name(), Some("New"));
        assert_eq!(r.base_price(), Some(2.0));
        assert_eq!(r.image_url(), Some("live.png"));
        assert_eq!(r.description(), None);

        item.name_snapshot_at_order = None;
        item.base_price_snapshot = None;
        let r = ResolvedItem::new(&item);
        assert_eq!(r.name(), Some("Old"));
        assert_eq!(r.base_price(), Some(1.0));

        item.base_price_snapshot_at_order = Some(3.0);
        assert_eq!(ResolvedItem::new(&item).base_price(), Some(3.0));
    }

    #[test]
    fn test_delivery_fee_chain() {
        let mut order = Order {
            delivery_fee: Some(DeliveryFeeRef {
                fee: Some(9.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(delivery_fee(&order), 9.0);
        order.delivery_price = Some(8.0);
        assert_eq!(delivery_fee(&order), 8.0);
        order.delivery_cost = Some(7.0);
        assert_eq!(delivery_fee(&order), 7.0);
    }

    #[test]
    fn test_total_with_fee_display_round_trip() {
        let order = Order {
            id: 6,
            items: Some(vec![OrderItem {
                quantity: 3,
                base_price_snapshot: Some(0.1 + 0.2),
                options: Some(vec![option("Extra", 1.005)]),
                ..Default::default()
            }]),
            delivery_cost: Some(2.675),
            ..Default::default()
        };
        let total = reconcile(&order).total_with_fee;
        let parsed = parse_money(&format_money(total)).unwrap();
        assert!((parsed - total).abs() <= 0.01);
    }

    #[test]
    fn test_option_names() {
        let item = burger();
        assert_eq!(ResolvedItem::new(&item).option_names(), vec!["Cheese"]);
    }
}

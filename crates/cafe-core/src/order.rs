//! # Order Aggregator
//!
//! The bill a cashier builds on the store screen.
//!
//! ## Aggregation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  add_line(Burger)     ──► [Burger ×1]                                   │
//! │  add_line(Soda)       ──► [Burger ×1, Soda ×1]                          │
//! │  add_line(Burger)     ──► [Burger ×2, Soda ×1]   merged by id, order    │
//! │                                                  of first add kept      │
//! │  remove_line(Soda)    ──► [Burger ×2]            last unit drops line   │
//! │  remove_line(Fries)   ──► [Burger ×2]            unknown id: no-op      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per menu item id
//! - Every line has `quantity >= 1`
//! - Name and unit price are frozen at the first add
//!
//! Operations take the order by value and hand it back, so every caller owns
//! its bill outright; there is no session-global cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::MenuItem;
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Order Line
// =============================================================================

/// One menu item and how many of it are on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    /// Id of the menu item this line was created from.
    pub item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Between 1 and [`MAX_LINE_QUANTITY`].
    pub quantity: u32,
}

impl OrderLine {
    /// Starts a line with quantity 1 from a catalog item.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        OrderLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity: 1,
        }
    }

    /// Returns the frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity, unrounded (cents are exact).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

// =============================================================================
// Item Reference
// =============================================================================

/// What the cashier picked: a tile from the menu grid, or a line already on
/// the bill (the `+` button next to it).
///
/// Both carry an id, but only a catalog item is a source of truth for name
/// and price; re-adding a bill line reuses the line's frozen snapshot.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Catalog(&'a MenuItem),
    Line(&'a OrderLine),
}

impl<'a> ItemRef<'a> {
    /// The menu item id this selection refers to.
    pub fn id(&self) -> &'a str {
        match self {
            ItemRef::Catalog(item) => &item.id,
            ItemRef::Line(line) => &line.item_id,
        }
    }

    fn to_new_line(self) -> OrderLine {
        match self {
            ItemRef::Catalog(item) => OrderLine::from_menu_item(item),
            ItemRef::Line(line) => OrderLine {
                quantity: 1,
                ..line.clone()
            },
        }
    }
}

impl<'a> From<&'a MenuItem> for ItemRef<'a> {
    fn from(item: &'a MenuItem) -> Self {
        ItemRef::Catalog(item)
    }
}

impl<'a> From<&'a OrderLine> for ItemRef<'a> {
    fn from(line: &'a OrderLine) -> Self {
        ItemRef::Line(line)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The in-progress, unpersisted bill.
///
/// Lines are kept in first-add order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    lines: Vec<OrderLine>,
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Order::default()
    }

    /// Adds one unit of `item`.
    ///
    /// ## Behavior
    /// - Line with the same id exists: quantity + 1
    /// - Otherwise: append a new line with quantity 1, snapshotting name and
    ///   price now
    ///
    /// ```rust
    /// use cafe_core::{MenuItem, Money, Order};
    ///
    /// let tea = MenuItem::new("tea", "Tea", Money::from_cents(2000));
    /// let order = Order::new().add_line(&tea).add_line(&tea);
    /// assert_eq!(order.quantity_of("tea"), 2);
    /// assert_eq!(order.line_count(), 1);
    /// ```
    pub fn add_line<'a>(mut self, item: impl Into<ItemRef<'a>>) -> Self {
        self.push_unit(item.into());
        self
    }

    /// Removes one unit of the line for `item_id`.
    ///
    /// ## Behavior
    /// - quantity > 1: quantity - 1
    /// - quantity == 1: the line is removed
    /// - no such line: unchanged
    pub fn remove_line(mut self, item_id: &str) -> Self {
        self.pop_unit(item_id);
        self
    }

    /// Removes the whole line for `item_id`, whatever its quantity.
    pub fn drop_line(mut self, item_id: &str) -> Self {
        self.lines.retain(|l| l.item_id != item_id);
        self
    }

    /// Empties the order.
    pub fn clear(mut self) -> Self {
        self.lines.clear();
        self
    }

    /// In-place form of [`add_line`](Order::add_line).
    pub fn push_unit(&mut self, item: ItemRef<'_>) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id()) {
            if line.quantity < MAX_LINE_QUANTITY {
                line.quantity += 1;
            }
            return;
        }
        self.lines.push(item.to_new_line());
    }

    /// In-place form of [`remove_line`](Order::remove_line).
    pub fn pop_unit(&mut self, item_id: &str) {
        let Some(pos) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return;
        };

        if self.lines[pos].quantity > 1 {
            self.lines[pos].quantity -= 1;
        } else {
            self.lines.remove(pos);
        }
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Line at `index`, if any.
    pub fn line(&self, index: usize) -> Option<&OrderLine> {
        self.lines.get(index)
    }

    /// Quantity on the bill for `item_id` (0 when absent).
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity as u64).sum()
    }

    /// Checks if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ unit price × quantity over all lines, before discount and GST.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

/// Free-function form of [`Order::add_line`].
pub fn add_line<'a>(order: Order, item: impl Into<ItemRef<'a>>) -> Order {
    order.add_line(item)
}

/// Free-function form of [`Order::remove_line`].
pub fn remove_line(order: Order, item_id: &str) -> Order {
    order.remove_line(item_id)
}

/// Free-function form of [`Order::subtotal`].
pub fn subtotal(order: &Order) -> Money {
    order.subtotal()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, cents: i64) -> MenuItem {
        MenuItem::new(id, name, Money::from_cents(cents))
    }

    #[test]
    fn test_add_merges_by_id() {
        let burger = item("b", "Burger", 25000);
        let soda = item("s", "Soda", 6000);

        let order = Order::new()
            .add_line(&burger)
            .add_line(&soda)
            .add_line(&burger);

        assert_eq!(order.line_count(), 2);
        assert_eq!(order.lines()[0].item_id, "b");
        assert_eq!(order.lines()[0].quantity, 2);
        assert_eq!(order.lines()[1].item_id, "s");
        assert_eq!(order.total_quantity(), 3);
    }

    #[test]
    fn test_quantity_equals_number_of_adds() {
        let ids = ["a", "b", "a", "c", "a", "b"];
        let menu: Vec<MenuItem> = ["a", "b", "c"].iter().map(|id| item(id, id, 100)).collect();

        let mut order = Order::new();
        for id in ids {
            let picked = menu.iter().find(|m| m.id == id).unwrap();
            order = add_line(order, picked);
        }

        for m in &menu {
            let adds = ids.iter().filter(|id| **id == m.id).count() as u32;
            assert_eq!(order.quantity_of(&m.id), adds);
        }
    }

    #[test]
    fn test_add_then_remove_restores_empty() {
        let soda = item("s", "Soda", 6000);
        let order = remove_line(add_line(Order::new(), &soda), "s");
        assert_eq!(order, Order::new());
    }

    #[test]
    fn test_remove_decrements_then_drops() {
        let soda = item("s", "Soda", 6000);
        let order = Order::new().add_line(&soda).add_line(&soda);

        let order = order.remove_line("s");
        assert_eq!(order.quantity_of("s"), 1);

        let order = order.remove_line("s");
        assert!(order.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let soda = item("s", "Soda", 6000);
        let order = Order::new().add_line(&soda);
        let before = order.clone();

        assert_eq!(order.remove_line("missing"), before);
    }

    #[test]
    fn test_drop_line_ignores_quantity() {
        let soda = item("s", "Soda", 6000);
        let tea = item("t", "Tea", 2000);
        let order = Order::new()
            .add_line(&soda)
            .add_line(&soda)
            .add_line(&tea)
            .drop_line("s");

        assert_eq!(order.line_count(), 1);
        assert_eq!(order.quantity_of("s"), 0);
        assert_eq!(order.drop_line("nope").line_count(), 1);
    }

    #[test]
    fn test_price_snapshot_survives_catalog_edit() {
        let mut burger = item("b", "Burger", 25000);
        let order = Order::new().add_line(&burger);

        burger.price_cents = 30000;
        burger.name = "Cheese Burger".to_string();
        let order = order.add_line(&burger);

        assert_eq!(order.lines()[0].unit_price_cents, 25000);
        assert_eq!(order.lines()[0].name, "Burger");
        assert_eq!(order.subtotal().cents(), 50000);
    }

    #[test]
    fn test_readding_a_bill_line() {
        let burger = item("b", "Burger", 25000);
        let order = Order::new().add_line(&burger);
        let line = order.lines()[0].clone();

        let order = order.add_line(&line);
        assert_eq!(order.quantity_of("b"), 2);

        // A line carried over from a previous bill starts at 1 again
        let fresh = Order::new().add_line(&order.lines()[0].clone());
        assert_eq!(fresh.quantity_of("b"), 1);
    }

    #[test]
    fn test_subtotal() {
        let burger = item("b", "Burger", 25000);
        let soda = item("s", "Soda", 6000);
        let order = Order::new()
            .add_line(&burger)
            .add_line(&burger)
            .add_line(&soda);

        assert_eq!(subtotal(&order).cents(), 56000);
        assert_eq!(Order::new().subtotal(), Money::zero());
    }

    #[test]
    fn test_subtotal_independent_of_add_order() {
        let a = item("a", "A", 1999);
        let b = item("b", "B", 350);
        let c = item("c", "C", 12005);

        let first = Order::new().add_line(&a).add_line(&b).add_line(&a).add_line(&c);
        let second = Order::new().add_line(&c).add_line(&a).add_line(&a).add_line(&b);

        assert_ne!(first.lines(), second.lines());
        assert_eq!(first.subtotal(), second.subtotal());
    }

    #[test]
    fn test_quantity_stops_at_line_limit() {
        let tea = item("t", "Tea", 2000);
        let mut order = Order::new();
        for _ in 0..MAX_LINE_QUANTITY + 5 {
            order.push_unit(ItemRef::Catalog(&tea));
        }

        assert_eq!(order.quantity_of("t"), MAX_LINE_QUANTITY);
        order.pop_unit("t");
        assert_eq!(order.quantity_of("t"), MAX_LINE_QUANTITY - 1);
    }

    #[test]
    fn test_totals_exact_at_price_limit() {
        use crate::pricing::PricingPolicy;
        use crate::types::MenuItemDraft;
        use crate::MAX_PRICE_CENTS;

        let draft = MenuItemDraft::parse("Gold Platter", "10000000").unwrap();
        assert_eq!(draft.price.cents(), MAX_PRICE_CENTS);
        assert!(MenuItemDraft::parse("Gold Platter", "50000000000000000").is_err());

        let platter = MenuItem::new("g", &draft.name, draft.price);
        let tea = item("t", "Tea", 2000);
        let mut order = Order::new().add_line(&tea);
        for _ in 0..MAX_LINE_QUANTITY {
            order.push_unit(ItemRef::Catalog(&platter));
        }

        let expected = MAX_PRICE_CENTS * MAX_LINE_QUANTITY as i64 + 2000;
        assert_eq!(order.subtotal().cents(), expected);

        let bill = PricingPolicy::default().price(order.subtotal());
        assert_eq!(bill.discount.round_to_cents().cents(), expected / 10);
        assert_eq!(bill.after_discount.round_to_cents().cents(), expected / 10 * 9);
        assert_eq!(bill.gst.round_to_cents().cents(), expected / 10 * 9 / 20);
        assert_eq!(bill.amount_due().cents(), 944_055_001_890);
        assert!(bill.amount_due().cents() > 0);
    }

    #[test]
    fn test_clear() {
        let soda = item("s", "Soda", 6000);
        let order = Order::new().add_line(&soda).clear();
        assert!(order.is_empty());
    }
}

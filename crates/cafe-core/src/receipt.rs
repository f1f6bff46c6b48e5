//! # Receipt
//!
//! Plain-text bill for 58mm and 80mm thermal printers.
//!
//! ## Layout (80mm, 48 columns)
//! ```text
//!               CafeControl Invoice
//!      123 Tasty Street, Flavortown, FC 12345
//!                Date: 19/10/2026
//! ------------------------------------------------
//! Item                            Qty        Total
//! Burger                            2    Rs.500.00
//! Soda                              1     Rs.60.00
//! ------------------------------------------------
//! Subtotal:                              Rs.560.00
//! Discount (10%):                        -Rs.56.00
//! Subtotal After Discount:               Rs.504.00
//! GST (5%):                              +Rs.25.20
//! ================================================
//! Total:                                 Rs.529.20
//! ------------------------------------------------
//!          Thank you for dining with us!
//! ```
//!
//! Every amount is rounded to 2 decimals here and nowhere earlier.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::order::Order;
use crate::pricing::BillSummary;
use crate::DEFAULT_CURRENCY_LABEL;

const QTY_WIDTH: usize = 4;

// =============================================================================
// Paper Size
// =============================================================================

/// Receipt roll width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// 58mm roll, 32 characters per line.
    Small,
    /// 80mm roll, 48 characters per line.
    #[default]
    Large,
}

impl PaperSize {
    /// Characters per printed line.
    pub const fn columns(&self) -> usize {
        match self {
            PaperSize::Small => 32,
            PaperSize::Large => 48,
        }
    }

    /// Roll width label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaperSize::Small => "58mm",
            PaperSize::Large => "80mm",
        }
    }

    const fn amount_width(&self) -> usize {
        match self {
            PaperSize::Small => 11,
            PaperSize::Large => 12,
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "58" | "58mm" => Ok(PaperSize::Small),
            "large" | "80" | "80mm" => Ok(PaperSize::Large),
            other => Err(format!("Invalid paper size: {other} (expected small or large)")),
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Store details and formatting for the printed bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLayout {
    pub store_name: String,
    pub store_address: String,
    pub currency_label: String,
    pub footer: String,
    pub paper: PaperSize,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        ReceiptLayout {
            store_name: "CafeControl Invoice".to_string(),
            store_address: "123 Tasty Street, Flavortown, FC 12345".to_string(),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            footer: "Thank you for dining with us!".to_string(),
            paper: PaperSize::Large,
        }
    }
}

impl ReceiptLayout {
    /// Renders the full receipt. Lines are joined with `\n`.
    pub fn render(&self, order: &Order, bill: &BillSummary, date: NaiveDate) -> String {
        let width = self.paper.columns();
        let label = self.currency_label.as_str();
        let mut out: Vec<String> = Vec::new();

        out.push(center(&self.store_name, width));
        for line in wrap_words(&self.store_address, width) {
            out.push(center(&line, width));
        }
        out.push(center(&format!("Date: {}", date.format("%d/%m/%Y")), width));
        out.push("-".repeat(width));

        out.push(two_columns("Item", &self.qty_and_total("Qty", "Total"), width));
        for line in order.lines() {
            let total = line.line_total().format_with(label);
            out.push(two_columns(
                &line.name,
                &self.qty_and_total(&line.quantity.to_string(), &total),
                width,
            ));
        }
        out.push("-".repeat(width));

        out.push(two_columns("Subtotal:", &bill.subtotal.format_with(label), width));
        out.push(two_columns(
            &format!("Discount ({}):", bill.discount_rate.percent_label()),
            &format!("-{}", bill.discount.format_with(label)),
            width,
        ));
        out.push(two_columns(
            "Subtotal After Discount:",
            &bill.after_discount.format_with(label),
            width,
        ));
        out.push(two_columns(
            &format!("GST ({}):", bill.gst_rate.percent_label()),
            &format!("+{}", bill.gst.format_with(label)),
            width,
        ));
        out.push("=".repeat(width));
        out.push(two_columns("Total:", &bill.final_total.format_with(label), width));
        out.push("-".repeat(width));
        out.push(center(&self.footer, width));

        out.join("\n")
    }

    fn qty_and_total(&self, qty: &str, total: &str) -> String {
        format!(
            "{:>qw$} {:>tw$}",
            qty,
            total,
            qw = QTY_WIDTH,
            tw = self.paper.amount_width()
        )
    }
}

// =============================================================================
// Text Helpers
// =============================================================================

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text.trim(), width);
    let pad = (width - text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// `left` padded so `right` ends at column `width`; `left` is cut to fit.
fn two_columns(left: &str, right: &str, width: usize) -> String {
    let right = truncate(right, width);
    let room = width - right.chars().count();
    if room == 0 {
        return right;
    }
    let left = truncate(left, room - 1);
    let gap = width - left.chars().count() - right.chars().count();
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::pricing::PricingPolicy;
    use crate::types::MenuItem;

    fn burger_and_soda() -> Order {
        let burger = MenuItem::new("b", "Burger", Money::from_cents(25000));
        let soda = MenuItem::new("s", "Soda", Money::from_cents(6000));
        Order::new().add_line(&burger).add_line(&soda).add_line(&burger)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_render_large_receipt() {
        let order = burger_and_soda();
        let bill = PricingPolicy::default().price(order.subtotal());
        let text = ReceiptLayout::default().render(&order, &bill, date());

        assert!(text.contains("CafeControl Invoice"));
        assert!(text.contains("Date: 19/10/2026"));
        assert!(text.lines().any(|l| l.starts_with("Burger") && l.ends_with("2    Rs.500.00")));
        assert!(text.lines().any(|l| l.starts_with("Soda") && l.ends_with("Rs.60.00")));
        assert!(text.lines().any(|l| l.starts_with("Subtotal:") && l.ends_with("Rs.560.00")));
        assert!(text.lines().any(|l| l.starts_with("Discount (10%):") && l.ends_with("-Rs.56.00")));
        assert!(text
            .lines()
            .any(|l| l.starts_with("Subtotal After Discount:") && l.ends_with("Rs.504.00")));
        assert!(text.lines().any(|l| l.starts_with("GST (5%):") && l.ends_with("+Rs.25.20")));
        assert!(text.lines().any(|l| l.starts_with("Total:") && l.ends_with("Rs.529.20")));
        assert!(text.ends_with("Thank you for dining with us!"));
    }

    #[test]
    fn test_lines_fit_paper() {
        let long = MenuItem::new(
            "x",
            "Extra Large Triple Cheese Chicken Burger With Fries",
            Money::from_cents(9_999_900),
        );
        let order = burger_and_soda().add_line(&long);
        let bill = PricingPolicy::default().price(order.subtotal());

        for paper in [PaperSize::Small, PaperSize::Large] {
            let layout = ReceiptLayout {
                paper,
                ..ReceiptLayout::default()
            };
            let text = layout.render(&order, &bill, date());
            for line in text.lines() {
                assert!(
                    line.chars().count() <= paper.columns(),
                    "{paper}: {line:?} is too wide"
                );
            }
        }
    }

    #[test]
    fn test_small_paper_wraps_address() {
        let order = burger_and_soda();
        let bill = PricingPolicy::default().price(order.subtotal());
        let layout = ReceiptLayout {
            paper: PaperSize::Small,
            ..ReceiptLayout::default()
        };

        let text = layout.render(&order, &bill, date());
        assert!(!text.contains("FC 12345"));
        assert!(text.lines().any(|l| l.trim() == "12345"));
    }

    #[test]
    fn test_largest_amounts_print_in_full_on_small_paper() {
        use crate::order::ItemRef;
        use crate::{MAX_CURRENCY_LABEL_LEN, MAX_LINE_QUANTITY, MAX_PRICE_CENTS};

        let platter = MenuItem::new("g", "Gold Platter", Money::from_cents(MAX_PRICE_CENTS));
        let mut order = Order::new();
        for _ in 0..MAX_LINE_QUANTITY {
            order.push_unit(ItemRef::Catalog(&platter));
        }
        let bill = PricingPolicy::default().price(order.subtotal());
        let label = "NPRs.";
        assert_eq!(label.chars().count(), MAX_CURRENCY_LABEL_LEN);

        let layout = ReceiptLayout {
            currency_label: label.to_string(),
            paper: PaperSize::Small,
            ..ReceiptLayout::default()
        };
        let text = layout.render(&order, &bill, date());

        assert!(text.contains("999 NPRs.9990000000.00"));
        assert!(text.contains("-NPRs.999000000.00"));
        assert!(text.contains("NPRs.9440550000.00"));
        for line in text.lines() {
            assert!(line.chars().count() <= PaperSize::Small.columns());
        }
    }

    #[test]
    fn test_currency_label_is_configurable() {
        let order = burger_and_soda();
        let bill = PricingPolicy::default().price(order.subtotal());
        let layout = ReceiptLayout {
            currency_label: "₹".to_string(),
            ..ReceiptLayout::default()
        };

        let text = layout.render(&order, &bill, date());
        assert!(text.contains("₹529.20"));
        assert!(!text.contains("Rs."));
    }

    #[test]
    fn test_empty_order_still_prints_totals() {
        let order = Order::new();
        let bill = PricingPolicy::default().price(order.subtotal());
        let text = ReceiptLayout::default().render(&order, &bill, date());
        assert!(text.lines().any(|l| l.starts_with("Total:") && l.ends_with("Rs.0.00")));
    }

    #[test]
    fn test_paper_size_parsing() {
        assert_eq!("small".parse::<PaperSize>().unwrap(), PaperSize::Small);
        assert_eq!("80mm".parse::<PaperSize>().unwrap(), PaperSize::Large);
        assert!("a4".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(two_columns("Tax:", "1.00", 10), "Tax:  1.00");
        assert_eq!(two_columns("Abcdefghij", "1.00", 10), "Abcde 1.00");
        assert_eq!(center("ab", 6), "  ab");
        assert_eq!(wrap_words("one two three", 7), vec!["one two", "three"]);
    }
}

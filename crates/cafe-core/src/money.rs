//! # Money Module
//!
//! Two monetary types:
//!
//! - [`Money`]: integer cents. Menu prices, line totals and the subtotal.
//! - [`ExactMoney`]: fixed point with 10^-8 cent resolution. Discount, the
//!   post-discount amount, GST and the final total.
//!
//! ## Why Two Types?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND ONLY WHEN PRINTING                                               │
//! │                                                                         │
//! │  Subtotal 10.05 (1005 cents) with a 10% discount:                       │
//! │    discount      = 100.5 cents      ← not a whole cent                  │
//! │    after discount= 904.5 cents                                          │
//! │    GST 5%        = 45.225 cents                                         │
//! │    final         = 949.725 cents                                        │
//! │                                                                         │
//! │  Rounding the discount to 101 cents first would give a final total of   │
//! │  949.2 cents. Keeping every intermediate exact and rounding once at      │
//! │  display gives 9.50, the same as subtotal × 0.9 × 1.05.                 │
//! │                                                                         │
//! │  A basis-point rate divides by 10^4, so two successive rates need       │
//! │  10^8 sub-units per cent to stay exact.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafe_core::money::{ExactMoney, Money};
//! use cafe_core::types::Rate;
//!
//! let subtotal = Money::from_cents(1005);
//! let discount = ExactMoney::from(subtotal).apply_rate(Rate::from_bps(1000));
//! assert_eq!(discount.to_string(), "1.01");  // 1.005 rounds half away from zero
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between amounts may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price ──► OrderLine.unit_price ──► OrderLine.line_total
///                                                     │
///                                  Σ line totals ──► Order.subtotal()
///                                                     │
///                                   ExactMoney::from ─┘ (pricing pipeline)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use cafe_core::money::Money;
    ///
    /// let price = Money::from_cents(25000); // Rs.250.00
    /// assert_eq!(price.cents(), 25000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Formats with a currency label, e.g. `Rs.529.20` or `-Rs.5.50`.
    pub fn format_with(&self, label: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, label, self.major().abs(), self.minor())
    }
}

/// Plain two-decimal rendering without a currency label.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplies by a quantity.
///
/// ```rust
/// use cafe_core::money::Money;
///
/// let unit_price = Money::from_cents(6000); // Soda, Rs.60.00
/// assert_eq!((unit_price * 3).cents(), 18000);
/// ```
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Exact Money
// =============================================================================

/// Sub-units per cent. One basis point of one basis point of a cent.
pub const SUB_UNITS_PER_CENT: i128 = 100_000_000;

/// Basis points in a whole (100%).
const BPS_PER_WHOLE: i128 = 10_000;

/// An unrounded amount produced by the pricing pipeline.
///
/// Stored as an i128 count of 10^-8 cents. Any [`Money`] converts losslessly,
/// and up to two successive [`apply_rate`](ExactMoney::apply_rate) calls stay
/// exact. Rounding happens only in [`round_to_cents`](ExactMoney::round_to_cents)
/// and `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ExactMoney(i128);

impl ExactMoney {
    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        ExactMoney(0)
    }

    /// Raw sub-unit count (10^-8 cent).
    #[inline]
    pub const fn sub_units(&self) -> i128 {
        self.0
    }

    /// Builds from a raw sub-unit count.
    #[inline]
    pub const fn from_sub_units(units: i128) -> Self {
        ExactMoney(units)
    }

    /// Multiplies by a rate.
    ///
    /// Exact whenever `self` is a multiple of 10^4 sub-units, which holds for
    /// any converted `Money` and for the result of one prior `apply_rate`
    /// subtracted from or added to it. Otherwise truncates toward zero.
    pub fn apply_rate(&self, rate: Rate) -> ExactMoney {
        ExactMoney(self.0 * rate.bps() as i128 / BPS_PER_WHOLE)
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// ```rust
    /// use cafe_core::money::{ExactMoney, SUB_UNITS_PER_CENT};
    ///
    /// let half = ExactMoney::from_sub_units(SUB_UNITS_PER_CENT / 2);
    /// assert_eq!(half.round_to_cents().cents(), 1);
    /// assert_eq!((-half).round_to_cents().cents(), -1);
    /// ```
    pub fn round_to_cents(&self) -> Money {
        let whole = self.0 / SUB_UNITS_PER_CENT;
        let rest = self.0 % SUB_UNITS_PER_CENT;
        let rounded = if rest.abs() * 2 >= SUB_UNITS_PER_CENT {
            whole + self.0.signum()
        } else {
            whole
        };
        Money::from_cents(rounded as i64)
    }

    /// True when no rounding would be needed to express this in cents.
    pub fn is_whole_cents(&self) -> bool {
        self.0 % SUB_UNITS_PER_CENT == 0
    }

    /// Formats rounded to 2 decimals with a currency label.
    pub fn format_with(&self, label: &str) -> String {
        self.round_to_cents().format_with(label)
    }
}

impl From<Money> for ExactMoney {
    fn from(money: Money) -> Self {
        ExactMoney(money.cents() as i128 * SUB_UNITS_PER_CENT)
    }
}

/// Rounded two-decimal rendering.
impl fmt::Display for ExactMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.round_to_cents(), f)
    }
}

impl Add for ExactMoney {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        ExactMoney(self.0 + other.0)
    }
}

impl Sub for ExactMoney {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        ExactMoney(self.0 - other.0)
    }
}

impl Neg for ExactMoney {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ExactMoney(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display_and_label() {
        assert_eq!(Money::from_cents(52920).to_string(), "529.20");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(6000).format_with("Rs."), "Rs.60.00");
        assert_eq!(Money::from_cents(-550).format_with("Rs."), "-Rs.5.50");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_exact_conversion_is_lossless() {
        let exact = ExactMoney::from(Money::from_cents(56000));
        assert!(exact.is_whole_cents());
        assert_eq!(exact.round_to_cents().cents(), 56000);
    }

    #[test]
    fn test_two_rates_stay_exact() {
        // 10.05 × 10% = 1.005, then (10.05 - 1.005) × 5% = 0.45225
        let subtotal = ExactMoney::from(Money::from_cents(1005));
        let discount = subtotal.apply_rate(Rate::from_bps(1000));
        let after = subtotal - discount;
        let tax = after.apply_rate(Rate::from_bps(500));

        assert_eq!(discount.sub_units(), 1005 * SUB_UNITS_PER_CENT / 10);
        assert!(!discount.is_whole_cents());
        assert_eq!(tax.sub_units(), 4_522_500_000);
        assert_eq!((after + tax).round_to_cents().cents(), 950);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        let just_below = ExactMoney::from_sub_units(SUB_UNITS_PER_CENT / 2 - 1);
        assert_eq!(just_below.round_to_cents().cents(), 0);

        let half = ExactMoney::from_sub_units(150 * SUB_UNITS_PER_CENT / 100);
        assert_eq!(half.round_to_cents().cents(), 2);
        assert_eq!((-half).round_to_cents().cents(), -2);
    }

    #[test]
    fn test_exact_display_rounds() {
        let discount = ExactMoney::from(Money::from_cents(1005)).apply_rate(Rate::from_bps(1000));
        assert_eq!(discount.to_string(), "1.01");
        assert_eq!(discount.format_with("Rs."), "Rs.1.01");
    }
}

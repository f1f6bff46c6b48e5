//! # Pricing Pipeline
//!
//! Turns a subtotal into the amount due.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal S                                                 560.00      │
//! │      │                                                                  │
//! │      ├── discount  = S × d             (d = 10%)             56.00      │
//! │      ▼                                                                  │
//! │  after discount A = S − discount                            504.00      │
//! │      │                                                                  │
//! │      ├── GST       = A × t             (t = 5%)              25.20      │
//! │      ▼                                                                  │
//! │  final total      = A + GST                                 529.20      │
//! │                                                                         │
//! │  GST is charged on the DISCOUNTED amount, never on S.                   │
//! │  final = S × (1 − d) × (1 + t)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is rounded here. [`BillSummary`] holds exact amounts and the
//! receipt rounds each one to 2 decimals when printing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{ExactMoney, Money};
use crate::types::Rate;
use crate::{DEFAULT_DISCOUNT_BPS, DEFAULT_GST_BPS};

/// The store's fixed discount and GST rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    discount: Rate,
    gst: Rate,
}

impl PricingPolicy {
    /// Creates a policy. Both rates must be proportions in [0, 1).
    pub fn new(discount: Rate, gst: Rate) -> CoreResult<Self> {
        for (name, rate) in [("discount", discount), ("gst", gst)] {
            if !rate.is_proportion() {
                return Err(CoreError::InvalidRate {
                    name: name.to_string(),
                    bps: rate.bps(),
                });
            }
        }
        Ok(PricingPolicy { discount, gst })
    }

    /// Discount rate.
    pub fn discount_rate(&self) -> Rate {
        self.discount
    }

    /// GST rate.
    pub fn gst_rate(&self) -> Rate {
        self.gst
    }

    /// Runs the pipeline: discount first, then GST on what remains.
    pub fn price(&self, subtotal: Money) -> BillSummary {
        let exact_subtotal = ExactMoney::from(subtotal);
        let discount = exact_subtotal.apply_rate(self.discount);
        let after_discount = exact_subtotal - discount;
        let gst = after_discount.apply_rate(self.gst);

        BillSummary {
            subtotal,
            discount,
            after_discount,
            gst,
            final_total: after_discount + gst,
            discount_rate: self.discount,
            gst_rate: self.gst,
        }
    }
}

/// 10% discount, 5% GST.
impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            discount: Rate::from_bps(DEFAULT_DISCOUNT_BPS),
            gst: Rate::from_bps(DEFAULT_GST_BPS),
        }
    }
}

/// Every figure printed under the line items.
///
/// Only `final_total` is the amount due; the rest are shown for the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub subtotal: Money,
    pub discount: ExactMoney,
    pub after_discount: ExactMoney,
    pub gst: ExactMoney,
    pub final_total: ExactMoney,
    pub discount_rate: Rate,
    pub gst_rate: Rate,
}

impl BillSummary {
    /// The amount due, rounded to cents.
    pub fn amount_due(&self) -> Money {
        self.final_total.round_to_cents()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Money Module
//!
//! Provides the `Money` type used for every price, cost and receipt.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Cost with a weight component, in floating point:                       │
//! │    (40 + 2 * 50 / 1000) * 3 = 120.30000000000001  ❌                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents, exact intermediate math                   │
//! │    (4000 * 1000 + 2 * 5000) * 3 = 12_030_000 milli-cents               │
//! │    12_030_000 / 1000 = 12_030 cents = 120.30  ✅                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(10_000); // 100.00
//! let subtotal = price.multiply_quantity(3);
//! assert_eq!(subtotal.cents(), 30_000);
//!
//! let discount = Money::from_cents(2_500);
//! assert_eq!((subtotal - discount).to_string(), "275.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and corrections can push values below zero
/// - **Tuple struct**: zero-cost over i64, serialized as a bare integer
///
/// ## Where Money Flows
/// ```text
/// SaleItem.price ───► item_subtotal ──► total_amount ──┐
/// SaleItemDetail.unit_cost ─┐                          │
/// SaleItemDetail.cost_per_kg ┴► item_cost ► total_cost │
///                                                      ▼
/// Sale.total_amount - Sale.discount_amount ──► gross receipt
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a value expressed in thousandths of a cent to whole cents.
    ///
    /// Halves round away from zero, so `1_500` → 2 cents and `-1_500` → -2.
    /// The wide input type lets callers accumulate products like
    /// `grams * cost_per_kg * quantity`; a result beyond the `i64` range
    /// saturates at `i64::MIN`/`i64::MAX` instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_milli_cents(12_030_000).cents(), 12_030);
    /// assert_eq!(Money::from_milli_cents(1_499).cents(), 1);
    /// assert_eq!(Money::from_milli_cents(1_500).cents(), 2);
    /// assert_eq!(Money::from_milli_cents(-1_500).cents(), -2);
    /// assert_eq!(Money::from_milli_cents(i128::MAX).cents(), i64::MAX);
    /// ```
    pub fn from_milli_cents(milli_cents: i128) -> Self {
        let half = 500;
        let rounded = if milli_cents >= 0 {
            milli_cents.saturating_add(half) / 1000
        } else {
            milli_cents.saturating_sub(half) / 1000
        };
        let cents = i64::try_from(rounded).unwrap_or(if rounded > 0 { i64::MAX } else { i64::MIN });
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in thousandths of a cent.
    #[inline]
    pub const fn milli_cents(&self) -> i128 {
        self.0 as i128 * 1000
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a per-unit amount by a quantity, saturating on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
// Arithmetic saturates at the i64 bounds so folds never panic or wrap.

/// Plain decimal rendering without a currency symbol.
///
/// The dashboard formats with the store's locale and currency; this is for
/// logs and test output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Folding an iterator of amounts; an empty iterator sums to zero.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

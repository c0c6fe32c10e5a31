//! # Stock Aggregator
//!
//! Folds stock ledger snapshots into quantities at product, variant or
//! location granularity, and derives stock-movement lines from sales.
//!
//! ## Ledger Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  location   purchase lot   variant   quantity                           │
//! │  ────────   ────────────   ───────   ────────                           │
//! │  WH-1       P-100          red/M        +10                             │
//! │  WH-1       P-100          red/M         -2   ← correction, counted     │
//! │  SHOP       P-100          red/M         +4   ← same lot, own row       │
//! │                                                                         │
//! │  total = 12     WH-1 = 8     SHOP = 4                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every row is an independent ledger entry. Negative rows are never
//! filtered out and rows sharing a purchase lot are never merged. The backend
//! owns the records; these functions only read a snapshot.

use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{SaleItem, StockMovementItem, StockRecord};

// =============================================================================
// Quantity Folds
// =============================================================================

/// Total stock across every record.
///
/// ## Example
/// ```rust
/// use stockroom_core::stock::total_quantity;
///
/// assert_eq!(total_quantity(&[]), 0);
/// ```
pub fn total_quantity(records: &[StockRecord]) -> i64 {
    records.iter().map(|record| record.quantity).sum()
}

/// Stock held at one location; 0 when no record matches.
pub fn quantity_at_location(location_id: &str, records: &[StockRecord]) -> i64 {
    sum_where(records, |record| record.location_id == location_id)
}

/// Stock of one product across every location and variant.
pub fn quantity_for_product(product_id: &str, records: &[StockRecord]) -> i64 {
    sum_where(records, |record| record.product_id == product_id)
}

/// Stock of one variant across every location.
pub fn quantity_for_variant(variant_id: &str, records: &[StockRecord]) -> i64 {
    sum_where(records, |record| record.variant_id == variant_id)
}

fn sum_where(records: &[StockRecord], keep: impl Fn(&StockRecord) -> bool) -> i64 {
    records
        .iter()
        .filter(|record| keep(record))
        .map(|record| record.quantity)
        .sum()
}

// =============================================================================
// Breakdowns
// =============================================================================

/// Quantity per location, sorted by location id.
///
/// The values add up to [`total_quantity`].
pub fn quantities_by_location(records: &[StockRecord]) -> BTreeMap<String, i64> {
    breakdown(records, |record| &record.location_id)
}

/// Quantity per variant, sorted by variant id.
pub fn quantities_by_variant(records: &[StockRecord]) -> BTreeMap<String, i64> {
    breakdown(records, |record| &record.variant_id)
}

fn breakdown<'a>(
    records: &'a [StockRecord],
    key: impl Fn(&'a StockRecord) -> &'a String,
) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(record).clone()).or_insert(0) += record.quantity;
    }
    totals
}

// =============================================================================
// Stock Movements
// =============================================================================

/// Movement lines for the stock a sale item consumes.
///
/// One line per detail: the lot, the variant, the detail quantity, valued at
/// the lot's unit cost.
///
/// ## User Workflow
/// ```text
/// Sale item: red/M × 5, fulfilled from lots P-1 (3) and P-2 (2)
///      │
///      ▼
/// movement_items_for_sale_item("SM-9", item) ← THIS FUNCTION
///      │
///      ▼
/// [ SM-9 / P-1 / red-M / 3 @ cost(P-1),  SM-9 / P-2 / red-M / 2 @ cost(P-2) ]
/// ```
pub fn movement_items_for_sale_item(stock_movement_id: &str, item: &SaleItem) -> Vec<StockMovementItem> {
    item.details
        .iter()
        .map(|detail| StockMovementItem {
            stock_movement_id: stock_movement_id.to_string(),
            purchase_item_id: detail.purchase_item_id.clone(),
            variant_id: item.variant_id.clone(),
            quantity: detail.quantity,
            price: detail.unit_cost,
        })
        .collect()
}

/// Units moved by a set of movement lines.
pub fn movement_quantity(items: &[StockMovementItem]) -> i64 {
    items.iter().map(|item| item.quantity).sum()
}

/// Value moved: Σ price × quantity.
pub fn movement_value(items: &[StockMovementItem]) -> Money {
    items
        .iter()
        .map(|item| item.price.multiply_quantity(item.quantity))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

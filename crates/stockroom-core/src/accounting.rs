//! # Sale Accounting Engine
//!
//! Line-item and whole-sale money figures, with channel- and status-gated
//! gross receipts.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleItemDetail.quantity ──► item_quantity ──► item_subtotal            │
//! │                                   × price          │                    │
//! │                                                    ▼                    │
//! │                                              total_amount               │
//! │                                                                         │
//! │  (unit_cost + weight × cost_per_kg / 1000) × quantity                   │
//! │        per detail ──► item_cost ──► total_cost                          │
//! │                                                                         │
//! │  Sale.total_amount - discount ──► sale_gross_receipt                    │
//! │                                        │                                │
//! │        ┌───────────────────────────────┼──────────────────────┐         │
//! │        ▼                               ▼                      ▼         │
//! │   Store: COMPLETED only        Online: COMPLETED only   Advance: not    │
//! │                                                         CANCELED, uses  │
//! │                                                         paid_amount     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here fails. Empty inputs and non-receipting statuses produce zero,
//! so a caller cannot tell "validly zero" from "not loaded yet" by the value
//! alone. Inputs are trusted; run the `validation` checks first if needed.
//!
//! ## Example
//! ```rust
//! use stockroom_core::accounting::{item_cost, item_subtotal};
//! use stockroom_core::money::Money;
//! use stockroom_core::types::{SaleItem, SaleItemDetail};
//!
//! let item = SaleItem {
//!     variant_id: "v-1".into(),
//!     price: Money::from_cents(10_000),
//!     weight: 2,
//!     details: vec![SaleItemDetail {
//!         purchase_item_id: "p-1".into(),
//!         quantity: 3,
//!         unit_cost: Money::from_cents(4_000),
//!         cost_per_kg: Money::from_cents(5_000),
//!     }],
//! };
//!
//! assert_eq!(item_subtotal(&item).to_string(), "300.00");
//! assert_eq!(item_cost(&item).to_string(), "120.30");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{
    AdvanceSale, AdvanceSaleStatus, ChannelSale, OnlineSale, OnlineSaleStatus, Sale, SaleChannel,
    SaleItem, SaleItemDetail, StoreSale, StoreSaleStatus,
};
use crate::GRAMS_PER_KILOGRAM;

// =============================================================================
// Line Items
// =============================================================================

/// Units taken from one purchase lot.
#[inline]
pub fn detail_quantity(detail: &SaleItemDetail) -> i64 {
    detail.quantity
}

/// Units sold for an item across all of its lots.
pub fn item_quantity(item: &SaleItem) -> i64 {
    item.details.iter().map(detail_quantity).sum()
}

/// Selling value of an item: quantity × unit price.
pub fn item_subtotal(item: &SaleItem) -> Money {
    item.price.multiply_quantity(item_quantity(item))
}

/// Cost basis of an item.
///
/// Each lot contributes `(unit_cost + weight × cost_per_kg / 1000) ×
/// quantity`, where `weight` is the variant's unit weight in grams and is
/// shared by every lot. The sum is carried exactly in thousandths of a cent
/// and rounded to cents once.
pub fn item_cost(item: &SaleItem) -> Money {
    Money::from_milli_cents(item_cost_milli_cents(item))
}

// grams × cents-per-kg is already in thousandths of a cent
fn item_cost_milli_cents(item: &SaleItem) -> i128 {
    let weight = item.weight as i128;
    item.details
        .iter()
        .map(|detail| {
            let per_unit = (detail.unit_cost.cents() as i128)
                .saturating_mul(GRAMS_PER_KILOGRAM as i128)
                .saturating_add(weight.saturating_mul(detail.cost_per_kg.cents() as i128));
            per_unit.saturating_mul(detail.quantity as i128)
        })
        .fold(0, i128::saturating_add)
}

/// Selling value of all items; zero for no items.
pub fn total_amount(items: &[SaleItem]) -> Money {
    items.iter().map(item_subtotal).sum()
}

/// Cost basis of all items; zero for no items.
///
/// Sub-cent weight costs are summed across items before the single rounding,
/// so `total_cost` can differ from the sum of per-item [`item_cost`]s.
pub fn total_cost(items: &[SaleItem]) -> Money {
    let milli_cents = items
        .iter()
        .map(item_cost_milli_cents)
        .fold(0, i128::saturating_add);
    Money::from_milli_cents(milli_cents)
}

// =============================================================================
// Gross Receipts
// =============================================================================

/// Total after the whole-sale discount.
pub fn sale_gross_receipt(sale: &Sale) -> Money {
    sale.total_amount - sale.discount()
}

/// Realized revenue of a store sale: only a completed sale counts.
pub fn store_sale_gross_receipt(store_sale: &StoreSale) -> Money {
    match store_sale.status {
        StoreSaleStatus::Completed => sale_gross_receipt(&store_sale.sale),
        StoreSaleStatus::Pending | StoreSaleStatus::Canceled => Money::zero(),
    }
}

/// Realized revenue of an online order: only a completed order counts.
pub fn online_sale_gross_receipt(online_sale: &OnlineSale) -> Money {
    match online_sale.status {
        OnlineSaleStatus::Completed => sale_gross_receipt(&online_sale.sale),
        OnlineSaleStatus::Pending | OnlineSaleStatus::Returned | OnlineSaleStatus::Canceled => {
            Money::zero()
        }
    }
}

/// Realized revenue of an advance sale.
///
/// Advance sales accrue as deposits come in, so the receipt is the amount
/// paid so far less the discount, in any state except canceled.
///
/// ## Example
/// ```rust
/// use stockroom_core::accounting::advance_sale_gross_receipt;
/// use stockroom_core::money::Money;
/// use stockroom_core::types::{AdvanceSale, AdvanceSaleStatus, Sale};
///
/// let mut advance = AdvanceSale {
///     sale: Sale {
///         total_amount: Money::from_cents(100_000),
///         discount_amount: Some(Money::from_cents(5_000)),
///         items: vec![],
///     },
///     status: AdvanceSaleStatus::Pending,
///     paid_amount: Money::from_cents(30_000),
/// };
/// assert_eq!(advance_sale_gross_receipt(&advance).cents(), 25_000);
///
/// advance.status = AdvanceSaleStatus::Canceled;
/// assert!(advance_sale_gross_receipt(&advance).is_zero());
/// ```
pub fn advance_sale_gross_receipt(advance_sale: &AdvanceSale) -> Money {
    match advance_sale.status {
        AdvanceSaleStatus::Canceled => Money::zero(),
        AdvanceSaleStatus::Pending | AdvanceSaleStatus::Completed => {
            advance_sale.paid_amount - advance_sale.sale.discount()
        }
    }
}

/// Gross receipt of a sale from any channel.
pub fn gross_receipt(sale: &ChannelSale) -> Money {
    match sale {
        ChannelSale::Store(s) => store_sale_gross_receipt(s),
        ChannelSale::Online(s) => online_sale_gross_receipt(s),
        ChannelSale::Advance(s) => advance_sale_gross_receipt(s),
    }
}

/// Sum of gross receipts, e.g. for a dashboard revenue tile.
pub fn realized_revenue(sales: &[ChannelSale]) -> Money {
    sales.iter().map(gross_receipt).sum()
}

// =============================================================================
// Sale Summary
// =============================================================================

/// The figures shown for one sale row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub channel: SaleChannel,
    /// Selling value of the items.
    pub amount: Money,
    /// Cost basis of the items.
    pub cost: Money,
    /// Status-gated realized revenue.
    pub gross_receipt: Money,
}

/// Computes the amount, cost and receipt of a sale.
pub fn summarize(sale: &ChannelSale) -> SaleSummary {
    let items = &sale.sale().items;
    SaleSummary {
        channel: sale.channel(),
        amount: total_amount(items),
        cost: total_cost(items),
        gross_receipt: gross_receipt(sale),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(lot: &str, quantity: i64, unit_cost: i64, cost_per_kg: i64) -> SaleItemDetail {
        SaleItemDetail {
            purchase_item_id: lot.to_string(),
            quantity,
            unit_cost: Money::from_cents(unit_cost),
            cost_per_kg: Money::from_cents(cost_per_kg),
        }
    }

    fn item(price: i64, weight: i64, details: Vec<SaleItemDetail>) -> SaleItem {
        SaleItem {
            variant_id: "v-1".to_string(),
            price: Money::from_cents(price),
            weight,
            details,
        }
    }

    fn sale(total: i64, discount: Option<i64>) -> Sale {
        Sale {
            total_amount: Money::from_cents(total),
            discount_amount: discount.map(Money::from_cents),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_store_sale_item_scenario() {
        // price 100, weight 2, 3 units at cost 40 with 50 per kg
        let item = item(10_000, 2, vec![detail("p-1", 3, 4_000, 5_000)]);

        assert_eq!(item_quantity(&item), 3);
        assert_eq!(item_subtotal(&item), Money::from_cents(30_000));
        assert_eq!(item_cost(&item), Money::from_cents(12_030));
    }

    #[test]
    fn test_item_quantity_sums_details() {
        let item = item(
            250,
            0,
            vec![detail("p-1", 2, 100, 0), detail("p-2", 5, 120, 0), detail("p-3", 1, 90, 0)],
        );
        let expected: i64 = item.details.iter().map(|d| d.quantity).sum();
        assert_eq!(item_quantity(&item), expected);
        assert_eq!(item_subtotal(&item), Money::from_cents(250 * expected));
    }

    #[test]
    fn test_item_cost_uses_each_lot_basis() {
        // weight 500 g: lot 1 adds 500 × 200 / 1000 = 100, lot 2 adds 500 × 300 / 1000 = 150
        let item = item(
            5_000,
            500,
            vec![detail("p-1", 2, 1_000, 200), detail("p-2", 1, 1_200, 300)],
        );
        assert_eq!(item_cost(&item), Money::from_cents((1_000 + 100) * 2 + (1_200 + 150)));
    }

    #[test]
    fn test_item_cost_rounds_once_per_item() {
        // each unit carries 0.4 cents of weight cost: 3 units → 1.2 → 1 cent
        let item = item(0, 1, vec![detail("p-1", 3, 0, 400)]);
        assert_eq!(item_cost(&item), Money::from_cents(1));

        // 0.6 cents per unit → 1.8 → 2 cents
        let item = self::item(0, 3, vec![detail("p-1", 3, 0, 200)]);
        assert_eq!(item_cost(&item), Money::from_cents(2));
    }

    #[test]
    fn test_total_cost_rounds_once_across_items() {
        // 0.4 cents of weight cost each: 1.2 cents in total → 1 cent
        let items = vec![
            item(0, 1, vec![detail("p-1", 1, 0, 400)]),
            item(0, 1, vec![detail("p-2", 1, 0, 400)]),
            item(0, 1, vec![detail("p-3", 1, 0, 400)]),
        ];
        assert!(items.iter().all(|i| item_cost(i).is_zero()));
        assert_eq!(total_cost(&items), Money::from_cents(1));

        // 10.3 cents each: 30.9 → 31 cents, not 3 × 10
        let items: Vec<SaleItem> = (0..3)
            .map(|_| item(0, 3, vec![detail("p-1", 1, 10, 100)]))
            .collect();
        assert_eq!(total_cost(&items), Money::from_cents(31));

        let sale = ChannelSale::Store(StoreSale {
            sale: Sale { items, ..sale(0, None) },
            status: StoreSaleStatus::Completed,
        });
        assert_eq!(summarize(&sale).cost, Money::from_cents(31));
    }

    #[test]
    fn test_overflowing_figures_saturate() {
        let heavy = item(0, i64::MAX, vec![detail("p-1", 1_000, 0, 1_000_000)]);
        assert_eq!(item_cost(&heavy).cents(), i64::MAX);
        assert_eq!(total_cost(&[heavy.clone(), heavy]).cents(), i64::MAX);

        let pricey = item(i64::MAX / 2, 0, vec![detail("p-1", 3, 0, 0)]);
        assert_eq!(item_subtotal(&pricey).cents(), i64::MAX);
        assert_eq!(total_amount(&[pricey.clone(), pricey]).cents(), i64::MAX);
    }

    #[test]
    fn test_item_without_details_is_zero() {
        let item = item(10_000, 2, Vec::new());
        assert_eq!(item_quantity(&item), 0);
        assert!(item_subtotal(&item).is_zero());
        assert!(item_cost(&item).is_zero());
    }

    #[test]
    fn test_totals_over_items() {
        let items = vec![
            item(10_000, 2, vec![detail("p-1", 3, 4_000, 5_000)]),
            item(2_500, 0, vec![detail("p-2", 4, 1_000, 0)]),
        ];
        assert_eq!(total_amount(&items), Money::from_cents(30_000 + 10_000));
        assert_eq!(total_cost(&items), Money::from_cents(12_030 + 4_000));
    }

    #[test]
    fn test_totals_of_empty_or_missing_items_are_zero() {
        assert_eq!(total_amount(&[]), Money::zero());
        assert_eq!(total_cost(&[]), Money::zero());

        let loading: Sale =
            serde_json::from_value(json!({ "totalAmount": 5000, "items": null })).unwrap();
        assert_eq!(total_amount(&loading.items), Money::zero());
        assert_eq!(total_cost(&loading.items), Money::zero());
    }

    #[test]
    fn test_sale_gross_receipt() {
        assert_eq!(sale_gross_receipt(&sale(100_000, Some(20_000))), Money::from_cents(80_000));
        assert_eq!(sale_gross_receipt(&sale(100_000, None)), Money::from_cents(100_000));
    }

    #[test]
    fn test_store_sale_receipt_requires_completion() {
        let mut store = StoreSale {
            sale: sale(100_000, Some(20_000)),
            status: StoreSaleStatus::Canceled,
        };
        assert!(store_sale_gross_receipt(&store).is_zero());

        store.status = StoreSaleStatus::Pending;
        assert!(store_sale_gross_receipt(&store).is_zero());

        store.status = StoreSaleStatus::Completed;
        assert_eq!(store_sale_gross_receipt(&store), Money::from_cents(80_000));
    }

    #[test]
    fn test_online_sale_receipt_requires_completion() {
        for status in [
            OnlineSaleStatus::Pending,
            OnlineSaleStatus::Returned,
            OnlineSaleStatus::Canceled,
        ] {
            let online = OnlineSale {
                sale: sale(50_000, Some(1_000)),
                status,
            };
            assert!(online_sale_gross_receipt(&online).is_zero(), "{status}");
        }

        let online = OnlineSale {
            sale: sale(50_000, Some(1_000)),
            status: OnlineSaleStatus::Completed,
        };
        assert_eq!(online_sale_gross_receipt(&online), Money::from_cents(49_000));
    }

    #[test]
    fn test_advance_sale_receipt_is_paid_amount() {
        let mut advance = AdvanceSale {
            sale: sale(100_000, Some(5_000)),
            status: AdvanceSaleStatus::Pending,
            paid_amount: Money::from_cents(30_000),
        };
        assert_eq!(advance_sale_gross_receipt(&advance), Money::from_cents(25_000));

        advance.status = AdvanceSaleStatus::Completed;
        assert_eq!(advance_sale_gross_receipt(&advance), Money::from_cents(25_000));

        advance.status = AdvanceSaleStatus::Canceled;
        assert!(advance_sale_gross_receipt(&advance).is_zero());
    }

    #[test]
    fn test_advance_sale_without_discount() {
        let advance = AdvanceSale {
            sale: sale(100_000, None),
            status: AdvanceSaleStatus::Pending,
            paid_amount: Money::from_cents(40_000),
        };
        assert_eq!(advance_sale_gross_receipt(&advance), Money::from_cents(40_000));
    }

    #[test]
    fn test_realized_revenue_across_channels() {
        let sales: Vec<ChannelSale> = vec![
            StoreSale {
                sale: sale(10_000, None),
                status: StoreSaleStatus::Completed,
            }
            .into(),
            StoreSale {
                sale: sale(99_000, None),
                status: StoreSaleStatus::Canceled,
            }
            .into(),
            OnlineSale {
                sale: sale(20_000, Some(2_000)),
                status: OnlineSaleStatus::Completed,
            }
            .into(),
            AdvanceSale {
                sale: sale(80_000, Some(1_000)),
                status: AdvanceSaleStatus::Pending,
                paid_amount: Money::from_cents(11_000),
            }
            .into(),
        ];

        assert_eq!(realized_revenue(&sales), Money::from_cents(10_000 + 18_000 + 10_000));
        assert_eq!(realized_revenue(&[]), Money::zero());
    }

    #[test]
    fn test_summarize_from_payload() {
        let sale: ChannelSale = serde_json::from_value(json!({
            "channel": "STORE",
            "status": "COMPLETED",
            "sale": {
                "totalAmount": 30000,
                "discountAmount": 1000,
                "items": [{
                    "variantId": "v-1",
                    "price": 10000,
                    "weight": 2,
                    "details": [
                        { "purchaseItemId": "p-1", "quantity": 3, "unitCost": 4000, "costPerKg": 5000 }
                    ]
                }]
            }
        }))
        .unwrap();

        let summary = summarize(&sale);
        assert_eq!(summary.channel, SaleChannel::Store);
        assert_eq!(summary.amount, Money::from_cents(30_000));
        assert_eq!(summary.cost, Money::from_cents(12_030));
        assert_eq!(summary.gross_receipt, Money::from_cents(29_000));
    }
}

//! # Domain Types
//!
//! Entity shapes handed to this crate by the dashboard's API layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                  Stock                    Sales                │
//! │  ───────                  ─────                    ─────                │
//! │  AttributeDefinition      StockRecord              Sale                 │
//! │  AttributeValueSelection  StockMovementItem        ├── SaleItem         │
//! │  VariantCombination                                │   └── SaleItemDetail│
//! │  └── AttributeValue                                │                    │
//! │                                                    ChannelSale          │
//! │                                                    ├── StoreSale        │
//! │                                                    ├── OnlineSale       │
//! │                                                    └── AdvanceSale      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Field names are camelCase and statuses are `SCREAMING_SNAKE_CASE`.
//! Money fields decode from integer cents only: a decimal amount such as
//! `1000.5` is rejected, so callers convert backend amounts to cents before
//! decoding. Weights are whole grams.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog: Attributes and Variants
// =============================================================================

/// An attribute declared on a product category (color, size, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub attribute_id: String,

    /// Marks the attribute used to group variants in the UI.
    /// At most one per category.
    #[serde(default)]
    pub is_primary: bool,
}

impl AttributeDefinition {
    /// A non-primary attribute.
    pub fn new(attribute_id: impl Into<String>) -> Self {
        AttributeDefinition {
            attribute_id: attribute_id.into(),
            is_primary: false,
        }
    }

    /// The category's primary attribute.
    pub fn primary(attribute_id: impl Into<String>) -> Self {
        AttributeDefinition {
            attribute_id: attribute_id.into(),
            is_primary: true,
        }
    }
}

/// Values chosen per attribute during one product create/update session.
///
/// A missing attribute reads as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct AttributeValueSelection(HashMap<String, Vec<String>>);

impl AttributeValueSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selected values of an attribute.
    pub fn insert<I, S>(&mut self, attribute_id: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(attribute_id.into(), values.into_iter().map(Into::into).collect());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<I, S>(mut self, attribute_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(attribute_id, values);
        self
    }

    /// The values selected for an attribute, empty when it has no entry.
    pub fn values_for(&self, attribute_id: &str) -> &[String] {
        self.0.get(attribute_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the attribute has an entry at all (possibly empty).
    pub fn contains(&self, attribute_id: &str) -> bool {
        self.0.contains_key(attribute_id)
    }
}

impl<K, V, S> FromIterator<(K, V)> for AttributeValueSelection
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut selection = AttributeValueSelection::new();
        for (attribute_id, values) in iter {
            selection.insert(attribute_id, values);
        }
        selection
    }
}

/// One `(attribute, value)` pair of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub attribute_id: String,
    pub value: String,
}

impl AttributeValue {
    pub fn new(attribute_id: impl Into<String>, value: impl Into<String>) -> Self {
        AttributeValue {
            attribute_id: attribute_id.into(),
            value: value.into(),
        }
    }
}

/// A concrete variant: one pair per attribute, in attribute-definition order.
///
/// Two combinations are equal only if every pair matches in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct VariantCombination(Vec<AttributeValue>);

impl VariantCombination {
    /// The empty combination (the identity of the cartesian product).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy extended with one more pair.
    pub fn extended(&self, pair: AttributeValue) -> Self {
        let mut pairs = Vec::with_capacity(self.0.len() + 1);
        pairs.extend(self.0.iter().cloned());
        pairs.push(pair);
        VariantCombination(pairs)
    }

    pub fn pairs(&self) -> &[AttributeValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value this combination assigns to an attribute.
    pub fn value_of(&self, attribute_id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|pair| pair.attribute_id == attribute_id)
            .map(|pair| pair.value.as_str())
    }

    /// Display label such as `"red / M"`.
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(|pair| pair.value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl From<Vec<AttributeValue>> for VariantCombination {
    fn from(pairs: Vec<AttributeValue>) -> Self {
        VariantCombination(pairs)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// One stock ledger row for a (location, purchase lot, variant).
///
/// Negative quantities are reversals/corrections and count like any other row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub location_id: String,
    pub purchase_item_id: String,
    pub product_id: String,
    pub variant_id: String,
    pub quantity: i64,
}

/// One line of a stock transfer or adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementItem {
    pub stock_movement_id: String,
    pub purchase_item_id: String,
    pub variant_id: String,
    /// Always positive.
    pub quantity: i64,
    /// Per-unit value of the moved stock.
    pub price: Money,
}

// =============================================================================
// Sale Items
// =============================================================================

/// A slice of a sold item fulfilled from one purchase lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemDetail {
    pub purchase_item_id: String,
    /// Units taken from this lot. Always positive.
    pub quantity: i64,
    /// The lot's purchase cost per unit.
    pub unit_cost: Money,
    /// The lot's shipping/handling cost per kilogram.
    pub cost_per_kg: Money,
}

/// One variant sold, possibly drawn from several purchase lots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub variant_id: String,
    /// Selling price per unit, the same for every lot.
    pub price: Money,
    /// Unit weight of the variant in whole grams.
    ///
    /// Fractional weights do not decode; round or convert to grams first.
    pub weight: i64,
    #[serde(default)]
    pub details: Vec<SaleItemDetail>,
}

// =============================================================================
// Sale (channel-agnostic core)
// =============================================================================

/// The part of a sale shared by every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub total_amount: Money,
    #[serde(default)]
    pub discount_amount: Option<Money>,
    /// Line items. A `null` or otherwise non-array payload decodes as empty,
    /// so a sale whose items are still loading totals to zero.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// The discount, zero when none was recorded.
    #[inline]
    pub fn discount(&self) -> Money {
        self.discount_amount.unwrap_or_default()
    }
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<SaleItem>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        value @ Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        other => {
            let kind = match other {
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                _ => "object",
            };
            warn!(kind, "sale items payload is not an array, treating as empty");
            Ok(Vec::new())
        }
    }
}

// =============================================================================
// Channel Statuses
// =============================================================================

/// Lifecycle of an in-store sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreSaleStatus {
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl StoreSaleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StoreSaleStatus::Pending => "Pending",
            StoreSaleStatus::Completed => "Completed",
            StoreSaleStatus::Canceled => "Canceled",
        }
    }

    /// Whether the backend will never move the sale out of this state.
    pub fn is_terminal(&self) -> bool {
        match self {
            StoreSaleStatus::Pending => false,
            StoreSaleStatus::Completed | StoreSaleStatus::Canceled => true,
        }
    }
}

/// Lifecycle of an online order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlineSaleStatus {
    #[default]
    Pending,
    Completed,
    Returned,
    Canceled,
}

impl OnlineSaleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OnlineSaleStatus::Pending => "Pending",
            OnlineSaleStatus::Completed => "Completed",
            OnlineSaleStatus::Returned => "Returned",
            OnlineSaleStatus::Canceled => "Canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            OnlineSaleStatus::Pending => false,
            OnlineSaleStatus::Completed
            | OnlineSaleStatus::Returned
            | OnlineSaleStatus::Canceled => true,
        }
    }
}

/// Lifecycle of an advance (deposit-based) sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvanceSaleStatus {
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl AdvanceSaleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AdvanceSaleStatus::Pending => "Pending",
            AdvanceSaleStatus::Completed => "Completed",
            AdvanceSaleStatus::Canceled => "Canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            AdvanceSaleStatus::Pending => false,
            AdvanceSaleStatus::Completed | AdvanceSaleStatus::Canceled => true,
        }
    }
}

macro_rules! display_as_label {
    ($($status:ty),*) => {
        $(
            impl fmt::Display for $status {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_as_label!(StoreSaleStatus, OnlineSaleStatus, AdvanceSaleStatus);

// =============================================================================
// Channel Sales
// =============================================================================

/// A sale rung up at a store counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSale {
    pub sale: Sale,
    pub status: StoreSaleStatus,
}

/// An order placed through the online shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OnlineSale {
    pub sale: Sale,
    pub status: OnlineSaleStatus,
}

/// A sale paid in deposits ahead of delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceSale {
    pub sale: Sale,
    pub status: AdvanceSaleStatus,
    /// Deposits received so far.
    pub paid_amount: Money,
}

/// The channel a sale came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleChannel {
    Store,
    Online,
    Advance,
}

/// A sale from any channel.
///
/// ## JSON
/// ```json
/// { "channel": "ADVANCE", "sale": { "totalAmount": 1000 }, "status": "PENDING", "paidAmount": 300 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "channel", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelSale {
    Store(StoreSale),
    Online(OnlineSale),
    Advance(AdvanceSale),
}

impl ChannelSale {
    pub fn channel(&self) -> SaleChannel {
        match self {
            ChannelSale::Store(_) => SaleChannel::Store,
            ChannelSale::Online(_) => SaleChannel::Online,
            ChannelSale::Advance(_) => SaleChannel::Advance,
        }
    }

    /// The shared sale record.
    pub fn sale(&self) -> &Sale {
        match self {
            ChannelSale::Store(s) => &s.sale,
            ChannelSale::Online(s) => &s.sale,
            ChannelSale::Advance(s) => &s.sale,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            ChannelSale::Store(s) => s.status.label(),
            ChannelSale::Online(s) => s.status.label(),
            ChannelSale::Advance(s) => s.status.label(),
        }
    }
}

impl From<StoreSale> for ChannelSale {
    fn from(sale: StoreSale) -> Self {
        ChannelSale::Store(sale)
    }
}

impl From<OnlineSale> for ChannelSale {
    fn from(sale: OnlineSale) -> Self {
        ChannelSale::Online(sale)
    }
}

impl From<AdvanceSale> for ChannelSale {
    fn from(sale: AdvanceSale) -> Self {
        ChannelSale::Advance(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_missing_attribute_is_empty() {
        let selection = AttributeValueSelection::new().with("color", ["red", "blue"]);
        assert_eq!(selection.values_for("color"), ["red", "blue"]);
        assert!(selection.values_for("size").is_empty());
        assert!(!selection.contains("size"));
    }

    #[test]
    fn test_selection_deserializes_from_plain_map() {
        let selection: AttributeValueSelection =
            serde_json::from_value(json!({ "A": ["red", "blue"], "B": [] })).unwrap();
        assert_eq!(selection.values_for("A").len(), 2);
        assert!(selection.contains("B"));
        assert!(selection.values_for("B").is_empty());
    }

    #[test]
    fn test_combination_helpers() {
        let combo = VariantCombination::empty()
            .extended(AttributeValue::new("color", "red"))
            .extended(AttributeValue::new("size", "M"));
        assert_eq!(combo.len(), 2);
        assert_eq!(combo.value_of("size"), Some("M"));
        assert_eq!(combo.value_of("material"), None);
        assert_eq!(combo.label(), "red / M");
    }

    #[test]
    fn test_combination_identity_is_ordered() {
        let a = VariantCombination::from(vec![
            AttributeValue::new("A", "red"),
            AttributeValue::new("B", "S"),
        ]);
        let b = VariantCombination::from(vec![
            AttributeValue::new("B", "S"),
            AttributeValue::new("A", "red"),
        ]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sale_items_null_or_non_array_decode_as_empty() {
        let sale: Sale =
            serde_json::from_value(json!({ "totalAmount": 1000, "items": null })).unwrap();
        assert!(sale.items.is_empty());

        let sale: Sale =
            serde_json::from_value(json!({ "totalAmount": 1000, "items": { "oops": 1 } })).unwrap();
        assert!(sale.items.is_empty());

        let sale: Sale = serde_json::from_value(json!({ "totalAmount": 1000 })).unwrap();
        assert!(sale.items.is_empty());
        assert_eq!(sale.discount(), Money::zero());
    }

    #[test]
    fn test_sale_items_array_decodes() {
        let sale: Sale = serde_json::from_value(json!({
            "totalAmount": 30000,
            "discountAmount": 500,
            "items": [{
                "variantId": "v-1",
                "price": 10000,
                "weight": 2,
                "details": [
                    { "purchaseItemId": "p-1", "quantity": 3, "unitCost": 4000, "costPerKg": 5000 }
                ]
            }]
        }))
        .unwrap();
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].details[0].cost_per_kg, Money::from_cents(5000));
        assert_eq!(sale.discount(), Money::from_cents(500));
    }

    #[test]
    fn test_amounts_and_weights_must_be_integers() {
        let fractional_amount: Result<Sale, _> =
            serde_json::from_value(json!({ "totalAmount": 1000.5 }));
        assert!(fractional_amount.is_err());

        let fractional_weight: Result<SaleItem, _> = serde_json::from_value(json!({
            "variantId": "v-1",
            "price": 1000,
            "weight": 2.5,
            "details": []
        }));
        assert!(fractional_weight.is_err());

        let whole: SaleItem = serde_json::from_value(json!({
            "variantId": "v-1",
            "price": 1000,
            "weight": 2500
        }))
        .unwrap();
        assert_eq!(whole.weight, 2500);
    }

    #[test]
    fn test_malformed_item_inside_array_is_an_error() {
        let result: Result<Sale, _> = serde_json::from_value(json!({
            "totalAmount": 0,
            "items": [{ "variantId": 7 }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_wire_names_and_labels() {
        let status: OnlineSaleStatus = serde_json::from_value(json!("RETURNED")).unwrap();
        assert_eq!(status, OnlineSaleStatus::Returned);
        assert_eq!(status.label(), "Returned");
        assert_eq!(
            serde_json::to_value(StoreSaleStatus::Canceled).unwrap(),
            json!("CANCELED")
        );
        assert_eq!(AdvanceSaleStatus::default(), AdvanceSaleStatus::Pending);
        assert_eq!(AdvanceSaleStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!StoreSaleStatus::Pending.is_terminal());
        assert!(StoreSaleStatus::Canceled.is_terminal());
        assert!(OnlineSaleStatus::Returned.is_terminal());
        assert!(!AdvanceSaleStatus::Pending.is_terminal());
    }

    #[test]
    fn test_channel_sale_tagged_json() {
        let sale: ChannelSale = serde_json::from_value(json!({
            "channel": "ADVANCE",
            "sale": { "totalAmount": 1000, "discountAmount": 50 },
            "status": "PENDING",
            "paidAmount": 300
        }))
        .unwrap();
        assert_eq!(sale.channel(), SaleChannel::Advance);
        assert_eq!(sale.sale().total_amount, Money::from_cents(1000));
        assert_eq!(sale.status_label(), "Pending");
    }
}

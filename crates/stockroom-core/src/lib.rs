//! # stockroom-core: Inventory & Sales Reconciliation
//!
//! The domain layer of the Stockroom retail dashboard: the handful of
//! calculations that many screens share and that cost money when wrong.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockroom Data Flow                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Dashboard (products, stock, sales screens)         │   │
//! │  └──────────────▲──────────────────────────────┬───────────────────┘   │
//! │                 │ combinations, quantities,    │ fetched entities      │
//! │                 │ totals                       ▼                       │
//! │  ┌──────────────┴──────────────────────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐   ┌───────────┐   ┌────────────┐  ┌──────────┐  │   │
//! │  │   │  variant  │   │   stock   │   │ accounting │  │validation│  │   │
//! │  │   │ cartesian │   │  ledger   │   │ cost, gross│  │  opt-in  │  │   │
//! │  │   │  product  │   │   folds   │   │  receipts  │  │  checks  │  │   │
//! │  │   └───────────┘   └───────────┘   └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                 ▲                                       │
//! │                     remote backend API (not here)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity shapes (attributes, stock records, channel sales)
//! - [`money`] - Integer-cent money type
//! - [`variant`] - Variant combination generator
//! - [`stock`] - Stock aggregation and movement lines
//! - [`accounting`] - Sale amounts, costs and gross receipts
//! - [`validation`] - Input checks callers may run first
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; safe to call from any thread
//! 2. **Zero, not errors**: canceled sales and empty inputs yield zero
//! 3. **Integer Money**: all amounts are cents (i64)
//! 4. **Closed statuses**: one enum per channel, matched exhaustively
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::accounting::store_sale_gross_receipt;
//! use stockroom_core::{Money, Sale, StoreSale, StoreSaleStatus};
//!
//! let mut store_sale = StoreSale {
//!     sale: Sale {
//!         total_amount: Money::from_cents(100_000),
//!         discount_amount: Some(Money::from_cents(20_000)),
//!         items: vec![],
//!     },
//!     status: StoreSaleStatus::Canceled,
//! };
//! assert!(store_sale_gross_receipt(&store_sale).is_zero());
//!
//! store_sale.status = StoreSaleStatus::Completed;
//! assert_eq!(store_sale_gross_receipt(&store_sale).to_string(), "800.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounting;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;
pub mod variant;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
pub use variant::{EmptyAttributePolicy, GeneratorConfig};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Grams in a kilogram; scales `weight × cost_per_kg` into per-unit cost.
pub const GRAMS_PER_KILOGRAM: i64 = 1000;

/// Default ceiling on variants generated for one product.
///
/// ## Business Reason
/// A product form that would submit thousands of create-variant requests is
/// almost always a mis-click in the value pickers.
pub const DEFAULT_MAX_COMBINATIONS: usize = 1000;

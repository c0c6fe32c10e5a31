//! # Validation Module
//!
//! Opt-in checks for data headed into the generator and accounting engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form schemas (TypeScript)                           │
//! │  ├── Field formats, required inputs                                     │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Cross-field rules (one primary attribute, discount ≤ total)        │
//! │  └── Called explicitly; computations never call it themselves           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::types::AttributeDefinition;
//! use stockroom_core::validation::validate_attribute_definitions;
//!
//! let ok = vec![AttributeDefinition::primary("color"), AttributeDefinition::new("size")];
//! assert!(validate_attribute_definitions(&ok).is_ok());
//!
//! let two_primary = vec![AttributeDefinition::primary("color"), AttributeDefinition::primary("size")];
//! assert!(validate_attribute_definitions(&two_primary).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{AdvanceSale, AttributeDefinition, AttributeValueSelection, Sale, SaleItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifiers
// =============================================================================

/// Validates an entity id issued by the backend.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_id;
///
/// assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_id("not-a-uuid").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Attributes
// =============================================================================

/// Checks a category's attribute definitions.
///
/// ## Rules
/// - Attribute ids are non-blank and unique
/// - At most one attribute is primary
pub fn validate_attribute_definitions(definitions: &[AttributeDefinition]) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for definition in definitions {
        if definition.attribute_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "attributeId".to_string(),
            });
        }
        if !seen.insert(definition.attribute_id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "attributeId".to_string(),
                value: definition.attribute_id.clone(),
            });
        }
    }

    let primaries: Vec<String> = definitions
        .iter()
        .filter(|definition| definition.is_primary)
        .map(|definition| definition.attribute_id.clone())
        .collect();
    if primaries.len() > 1 {
        return Err(ValidationError::MultiplePrimaryAttributes { found: primaries });
    }

    Ok(())
}

/// Checks selected values against the definitions.
///
/// ## Rules
/// - Every definition has an entry (it may be empty)
/// - Values are non-blank and unique within their attribute
pub fn validate_selection(
    definitions: &[AttributeDefinition],
    selections: &AttributeValueSelection,
) -> ValidationResult<()> {
    for definition in definitions {
        let attribute_id = definition.attribute_id.as_str();
        if !selections.contains(attribute_id) {
            return Err(ValidationError::Required {
                field: format!("values.{attribute_id}"),
            });
        }

        let mut seen = HashSet::new();
        for value in selections.values_for(attribute_id) {
            if value.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: format!("values.{attribute_id}"),
                });
            }
            if !seen.insert(value.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: format!("values.{attribute_id}"),
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Sales
// =============================================================================

/// Checks one sale item and its lot details.
///
/// ## Rules
/// - Price and weight are not negative
/// - At least one detail
/// - Detail quantities are positive, detail costs not negative
pub fn validate_sale_item(item: &SaleItem) -> ValidationResult<()> {
    non_negative("price", item.price)?;
    if item.weight < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "weight".to_string(),
        });
    }
    if item.details.is_empty() {
        return Err(ValidationError::Required {
            field: "details".to_string(),
        });
    }

    for (index, detail) in item.details.iter().enumerate() {
        if detail.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("details[{index}].quantity"),
            });
        }
        non_negative(&format!("details[{index}].unitCost"), detail.unit_cost)?;
        non_negative(&format!("details[{index}].costPerKg"), detail.cost_per_kg)?;
    }

    Ok(())
}

/// Checks the channel-agnostic sale record.
///
/// ## Rules
/// - Total is not negative
/// - Discount lies within `0..=total`
/// - Every item passes [`validate_sale_item`]
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    non_negative("totalAmount", sale.total_amount)?;
    if let Some(discount) = sale.discount_amount {
        within_total("discountAmount", discount, sale.total_amount)?;
    }
    sale.items.iter().try_for_each(validate_sale_item)
}

/// Checks the deposits of an advance sale: `0..=total`.
pub fn validate_advance_payment(advance_sale: &AdvanceSale) -> ValidationResult<()> {
    within_total("paidAmount", advance_sale.paid_amount, advance_sale.sale.total_amount)
}

fn non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn within_total(field: &str, amount: Money, total: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount > total {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: total.cents(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

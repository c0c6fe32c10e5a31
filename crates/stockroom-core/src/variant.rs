//! # Variant Combination Generator
//!
//! Expands a category's attribute definitions and the values picked for
//! them into every concrete variant of a product.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Left-to-right cartesian product                                       │
//! │                                                                         │
//! │  start:        [ [] ]                                                  │
//! │  A = red,blue  [ [A=red], [A=blue] ]                                   │
//! │  B = S,M       [ [A=red,B=S], [A=red,B=M], [A=blue,B=S], [A=blue,B=M] ]│
//! │                                                                         │
//! │  count = |A| × |B| × ...   (zero attributes → exactly one empty combo) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An attribute with no selected values is a sharp edge. Under the default
//! [`EmptyAttributePolicy::Annihilate`] it cross-joins with the empty set and
//! the product has zero variants; [`EmptyAttributePolicy::Skip`] leaves it
//! out of the product instead.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::types::{AttributeDefinition, AttributeValueSelection};
//! use stockroom_core::variant::generate_combinations;
//!
//! let definitions = vec![AttributeDefinition::primary("color"), AttributeDefinition::new("size")];
//! let selection = AttributeValueSelection::new()
//!     .with("color", ["red", "blue"])
//!     .with("size", ["S", "M"]);
//!
//! let combos = generate_combinations(&definitions, &selection);
//! let labels: Vec<String> = combos.iter().map(|c| c.label()).collect();
//! assert_eq!(labels, ["red / S", "red / M", "blue / S", "blue / M"]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{AttributeDefinition, AttributeValue, AttributeValueSelection, VariantCombination};
use crate::DEFAULT_MAX_COMBINATIONS;

// =============================================================================
// Configuration
// =============================================================================

/// What to do with an attribute that has no selected values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmptyAttributePolicy {
    /// Cross-join with the empty set: no variants at all.
    #[default]
    Annihilate,
    /// Leave the attribute out of every combination.
    Skip,
}

/// Options for variant generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub empty_attribute_policy: EmptyAttributePolicy,
    /// Upper bound enforced by [`try_generate_combinations`].
    pub max_combinations: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            empty_attribute_policy: EmptyAttributePolicy::Annihilate,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
        }
    }
}

impl GeneratorConfig {
    /// Default limit, skipping attributes without values.
    pub fn skip_empty() -> Self {
        GeneratorConfig {
            empty_attribute_policy: EmptyAttributePolicy::Skip,
            ..Self::default()
        }
    }

    /// Default policy with a custom limit.
    pub fn with_max_combinations(max_combinations: usize) -> Self {
        GeneratorConfig {
            max_combinations,
            ..Self::default()
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Generates every variant combination, empty attributes annihilating.
///
/// Equivalent to [`generate_combinations_with`] under the default config.
pub fn generate_combinations(
    definitions: &[AttributeDefinition],
    selections: &AttributeValueSelection,
) -> Vec<VariantCombination> {
    generate_combinations_with(definitions, selections, &GeneratorConfig::default())
}

/// Generates every variant combination under the given policy.
///
/// `max_combinations` is not checked here; see [`try_generate_combinations`].
pub fn generate_combinations_with(
    definitions: &[AttributeDefinition],
    selections: &AttributeValueSelection,
    config: &GeneratorConfig,
) -> Vec<VariantCombination> {
    let mut combinations = vec![VariantCombination::empty()];

    for definition in definitions {
        let values = selections.values_for(&definition.attribute_id);

        if values.is_empty() {
            match config.empty_attribute_policy {
                EmptyAttributePolicy::Skip => {
                    debug!(attribute_id = %definition.attribute_id, "no values selected, attribute skipped");
                    continue;
                }
                EmptyAttributePolicy::Annihilate => {
                    debug!(attribute_id = %definition.attribute_id, "no values selected, no combinations remain");
                }
            }
        }

        combinations = combinations
            .iter()
            .flat_map(|partial| {
                values.iter().map(move |value| {
                    partial.extended(AttributeValue::new(definition.attribute_id.as_str(), value.as_str()))
                })
            })
            .collect();
    }

    trace!(
        attributes = definitions.len(),
        count = combinations.len(),
        "generated variant combinations"
    );
    combinations
}

/// Number of combinations generation would produce, without building them.
///
/// Saturates at `usize::MAX`.
///
/// ## Example
/// ```rust
/// use stockroom_core::types::{AttributeDefinition, AttributeValueSelection};
/// use stockroom_core::variant::{combination_count, EmptyAttributePolicy};
///
/// let definitions = vec![AttributeDefinition::new("color"), AttributeDefinition::new("size")];
/// let selection = AttributeValueSelection::new().with("color", ["red", "blue", "green"]);
///
/// assert_eq!(combination_count(&definitions, &selection, EmptyAttributePolicy::Annihilate), 0);
/// assert_eq!(combination_count(&definitions, &selection, EmptyAttributePolicy::Skip), 3);
/// ```
pub fn combination_count(
    definitions: &[AttributeDefinition],
    selections: &AttributeValueSelection,
    policy: EmptyAttributePolicy,
) -> usize {
    definitions
        .iter()
        .map(|definition| selections.values_for(&definition.attribute_id).len())
        .filter(|&count| count > 0 || policy == EmptyAttributePolicy::Annihilate)
        .fold(1usize, usize::saturating_mul)
}

/// Generates combinations, refusing when the count exceeds the limit.
///
/// The count is checked before anything is allocated.
///
/// ## User Workflow
/// ```text
/// Product form: pick values per attribute
///      │
///      ▼
/// try_generate_combinations ← THIS FUNCTION
///      │
///      ├── count > max? → Err(TooManyCombinations)
///      │
///      └── OK → variants submitted as create-variant requests
/// ```
pub fn try_generate_combinations(
    definitions: &[AttributeDefinition],
    selections: &AttributeValueSelection,
    config: &GeneratorConfig,
) -> CoreResult<Vec<VariantCombination>> {
    let count = combination_count(definitions, selections, config.empty_attribute_policy);
    if count > config.max_combinations {
        warn!(count, max = config.max_combinations, "variant combination limit exceeded");
        return Err(CoreError::TooManyCombinations {
            count,
            max: config.max_combinations,
        });
    }

    Ok(generate_combinations_with(definitions, selections, config))
}

// =============================================================================
// Primary Attribute Grouping
// =============================================================================

/// Combinations sharing one value of the primary attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantGroup {
    /// `None` when the category has no primary attribute.
    pub primary_value: Option<String>,
    pub combinations: Vec<VariantCombination>,
}

/// The category's primary attribute, if any.
///
/// Callers guarantee at most one; should several be flagged the first wins.
pub fn primary_attribute(definitions: &[AttributeDefinition]) -> Option<&AttributeDefinition> {
    definitions.iter().find(|definition| definition.is_primary)
}

/// Groups combinations by their primary attribute value, in first-seen order.
///
/// Without a primary attribute everything lands in one group. Combinations
/// that lack the primary attribute (it was skipped) group under `None`.
pub fn group_by_primary(
    combinations: &[VariantCombination],
    definitions: &[AttributeDefinition],
) -> Vec<VariantGroup> {
    let Some(primary) = primary_attribute(definitions) else {
        if combinations.is_empty() {
            return Vec::new();
        }
        return vec![VariantGroup {
            primary_value: None,
            combinations: combinations.to_vec(),
        }];
    };

    let mut groups: Vec<VariantGroup> = Vec::new();
    for combination in combinations {
        let value = combination.value_of(&primary.attribute_id);
        match groups
            .iter_mut()
            .find(|group| group.primary_value.as_deref() == value)
        {
            Some(group) => group.combinations.push(combination.clone()),
            None => groups.push(VariantGroup {
                primary_value: value.map(str::to_string),
                combinations: vec![combination.clone()],
            }),
        }
    }
    groups
}

// =============================================================================
// Unit Tests
// =============================================================================

//! Category to factor mapping.
//!
//! | Category     | Value factor | Emissions factor |
//! |--------------|--------------|------------------|
//! | WindOffshore | Low          | 0                |
//! | WindOnshore  | High         | 0                |
//! | Gas          | Medium       | Medium           |
//! | Coal         | Medium       | High             |

use crate::types::{CoreError, FactorTable, GeneratorCategory};

/// Value and emissions factor resolved for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorPair {
    /// Factor applied to energy x price
    pub value_factor: f64,
    /// Factor applied to energy x emissions rating
    pub emission_factor: f64,
}

/// Maps a generator category to its factors.
///
/// Implementations must fail with [`CoreError::InvalidCategory`] for any
/// category they do not cover instead of falling back to a default.
pub trait FactorResolver: Send + Sync {
    /// Resolve the factors for `category`.
    fn resolve(&self, category: GeneratorCategory) -> Result<FactorPair, CoreError>;
}

/// Resolver backed by the reference factor table.
///
/// # Examples
///
/// ```
/// use fleet_core::resolver::{FactorResolver, ReferenceFactorResolver};
/// use fleet_core::types::{FactorTable, FactorTriple, GeneratorCategory};
///
/// let resolver = ReferenceFactorResolver::new(FactorTable::new(
///     FactorTriple::new(0.946, 0.696, 0.265),
///     FactorTriple::new(0.812, 0.562, 0.312),
/// ));
///
/// let coal = resolver.resolve(GeneratorCategory::Coal).unwrap();
/// assert_eq!(coal.value_factor, 0.696);
/// assert_eq!(coal.emission_factor, 0.812);
/// ```
#[derive(Debug, Clone)]
pub struct ReferenceFactorResolver {
    table: FactorTable,
}

impl ReferenceFactorResolver {
    /// Create a resolver over a loaded factor table
    pub fn new(table: FactorTable) -> Self {
        Self { table }
    }
}

impl FactorResolver for ReferenceFactorResolver {
    fn resolve(&self, category: GeneratorCategory) -> Result<FactorPair, CoreError> {
        let value = &self.table.value_factor;
        let emissions = &self.table.emissions_factor;

        let (value_factor, emission_factor) = match category {
            GeneratorCategory::WindOffshore => (value.low, 0.0),
            GeneratorCategory::WindOnshore => (value.high, 0.0),
            GeneratorCategory::Gas => (value.medium, emissions.medium),
            GeneratorCategory::Coal => (value.medium, emissions.high),
        };

        Ok(FactorPair {
            value_factor,
            emission_factor,
        })
    }
}

//! Reference factors loaded once per run.

/// High/Medium/Low coefficients of one factor group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FactorTriple {
    /// High coefficient
    pub high: f64,
    /// Medium coefficient
    pub medium: f64,
    /// Low coefficient
    pub low: f64,
}

impl FactorTriple {
    /// Create a new factor triple
    pub fn new(high: f64, medium: f64, low: f64) -> Self {
        Self { high, medium, low }
    }
}

/// Value and emissions factor groups.
///
/// Immutable once loaded and shared read-only for the whole run.
///
/// # Examples
///
/// ```
/// use fleet_core::types::{FactorTable, FactorTriple};
///
/// let table = FactorTable::new(
///     FactorTriple::new(0.946, 0.696, 0.265),
///     FactorTriple::new(0.812, 0.562, 0.312),
/// );
/// assert_eq!(table.value_factor.low, 0.265);
/// assert_eq!(table.emissions_factor.high, 0.812);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FactorTable {
    /// Coefficients converting energy x price into generation value
    pub value_factor: FactorTriple,
    /// Coefficients converting energy x emissions rating into emissions
    pub emissions_factor: FactorTriple,
}

impl FactorTable {
    /// Create a new factor table
    pub fn new(value_factor: FactorTriple, emissions_factor: FactorTriple) -> Self {
        Self {
            value_factor,
            emissions_factor,
        }
    }
}

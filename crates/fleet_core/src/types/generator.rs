//! Generator records and their daily production.
//!
//! # Examples
//!
//! ```
//! use fleet_core::types::{GeneratorCategory, GeneratorRecord};
//!
//! let coal = GeneratorRecord::new("Coal[1]", GeneratorCategory::Coal)
//!     .with_emissions_rating(0.482)
//!     .with_heat_input(11.815)
//!     .with_net_generation(11.815);
//!
//! assert!(coal.category.is_emitting());
//! assert!(coal.days.is_empty());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use super::error::CoreError;

/// Timestamp of a daily record.
///
/// Kept with its original UTC offset so it can be echoed unchanged in output.
pub type ReportDate = DateTime<FixedOffset>;

/// Generator technology class.
///
/// The set is closed: it drives which factors and formula branches apply.
///
/// # Examples
///
/// ```
/// use fleet_core::types::GeneratorCategory;
///
/// let gas: GeneratorCategory = "gas".parse().unwrap();
/// assert_eq!(gas, GeneratorCategory::Gas);
/// assert!("Nuclear".parse::<GeneratorCategory>().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorCategory {
    /// Offshore wind farm
    WindOffshore,
    /// Onshore wind farm
    WindOnshore,
    /// Gas-fired plant
    Gas,
    /// Coal-fired plant
    Coal,
}

impl GeneratorCategory {
    /// All categories, in declaration order.
    pub const ALL: [GeneratorCategory; 4] = [
        GeneratorCategory::WindOffshore,
        GeneratorCategory::WindOnshore,
        GeneratorCategory::Gas,
        GeneratorCategory::Coal,
    ];

    /// Canonical name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorCategory::WindOffshore => "WindOffshore",
            GeneratorCategory::WindOnshore => "WindOnshore",
            GeneratorCategory::Gas => "Gas",
            GeneratorCategory::Coal => "Coal",
        }
    }

    /// Whether generators of this category produce emissions.
    pub fn is_emitting(&self) -> bool {
        matches!(self, GeneratorCategory::Gas | GeneratorCategory::Coal)
    }
}

impl fmt::Display for GeneratorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::invalid_category(s))
    }
}

/// One day of production for a generator.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    /// Day the production belongs to
    pub date: ReportDate,
    /// Energy produced
    pub energy: f64,
    /// Price per unit of energy
    pub price: f64,
}

impl DailyRecord {
    /// Create a new daily record
    pub fn new(date: ReportDate, energy: f64, price: f64) -> Self {
        Self {
            date,
            energy,
            price,
        }
    }
}

/// A generator as read from a generation report.
///
/// `total_heat_input` and `actual_net_generation` are only meaningful for
/// coal and are 0 for every other category. `emissions_rating` is 0 for wind.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorRecord {
    /// Generator label, e.g. "Coal[1]"
    pub name: String,
    /// Technology class
    pub category: GeneratorCategory,
    /// Emissions coefficient
    pub emissions_rating: f64,
    /// Total heat input (coal only)
    pub total_heat_input: f64,
    /// Actual net generation (coal only)
    pub actual_net_generation: f64,
    /// Daily production, in report order
    pub days: Vec<DailyRecord>,
}

impl GeneratorRecord {
    /// Create a generator with zeroed coefficients and no days.
    pub fn new(name: impl Into<String>, category: GeneratorCategory) -> Self {
        Self {
            name: name.into(),
            category,
            emissions_rating: 0.0,
            total_heat_input: 0.0,
            actual_net_generation: 0.0,
            days: Vec::new(),
        }
    }

    /// Set the emissions rating
    pub fn with_emissions_rating(mut self, rating: f64) -> Self {
        self.emissions_rating = rating;
        self
    }

    /// Set the total heat input
    pub fn with_heat_input(mut self, total_heat_input: f64) -> Self {
        self.total_heat_input = total_heat_input;
        self
    }

    /// Set the actual net generation
    pub fn with_net_generation(mut self, actual_net_generation: f64) -> Self {
        self.actual_net_generation = actual_net_generation;
        self
    }

    /// Replace the daily records
    pub fn with_days(mut self, days: Vec<DailyRecord>) -> Self {
        self.days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in GeneratorCategory::ALL {
            let parsed: GeneratorCategory = category.name().parse().unwrap();
            assert_eq!(parsed, category);
            assert_eq!(category.to_string(), category.name());
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(
            "windoffshore".parse::<GeneratorCategory>().unwrap(),
            GeneratorCategory::WindOffshore
        );
        assert_eq!(
            " COAL ".parse::<GeneratorCategory>().unwrap(),
            GeneratorCategory::Coal
        );
    }

    #[test]
    fn test_unknown_category_is_invalid() {
        let err = "Solar".parse::<GeneratorCategory>().unwrap_err();
        assert_eq!(err, CoreError::InvalidCategory("Solar".to_string()));
    }

    #[test]
    fn test_emitting_categories() {
        assert!(GeneratorCategory::Gas.is_emitting());
        assert!(GeneratorCategory::Coal.is_emitting());
        assert!(!GeneratorCategory::WindOffshore.is_emitting());
        assert!(!GeneratorCategory::WindOnshore.is_emitting());
    }

    #[test]
    fn test_builder_defaults() {
        let gas = GeneratorRecord::new("Gas[1]", GeneratorCategory::Gas).with_emissions_rating(0.038);
        assert_eq!(gas.name, "Gas[1]");
        assert_eq!(gas.emissions_rating, 0.038);
        assert_eq!(gas.total_heat_input, 0.0);
        assert_eq!(gas.actual_net_generation, 0.0);
        assert!(gas.days.is_empty());
    }
}

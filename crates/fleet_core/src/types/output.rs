//! Derived outputs of one aggregation run.

use super::generator::ReportDate;

/// Total generation value of one generator across all its days.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalValue {
    /// Generator label
    pub generator_name: String,
    /// Sum of daily generation values
    pub total_value: f64,
}

/// Generator with the highest emissions on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEmissionLeader {
    /// Generator label
    pub generator_name: String,
    /// Emissions of the leading generator on that date
    pub emission: f64,
    /// The date, echoed from the input
    pub date: ReportDate,
}

/// Heat rate of an eligible coal generator.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatRate {
    /// Generator label
    pub generator_name: String,
    /// Total heat input over actual net generation
    pub heat_rate: f64,
}

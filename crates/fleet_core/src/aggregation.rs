//! Fleet-wide aggregation.
//!
//! Turns a set of generator records into:
//! 1. one [`TotalValue`] per generator, in input order
//! 2. one [`DailyEmissionLeader`] per date that received emissions, ordered by date
//! 3. one [`HeatRate`] per eligible coal generator, in input order
//!
//! Heat-rate eligibility is `category == Coal && actual_net_generation == 0`.
//! This predicate is kept exactly as the reporting pipeline has always
//! applied it, so eligible generators always report a heat rate of 0.
//!
//! When two generators tie for the highest emission on a date, the one that
//! appears first in the input wins.

use std::collections::BTreeMap;

use crate::metrics::{actual_heat_rate, daily_emissions, daily_generation_value};
use crate::resolver::FactorResolver;
use crate::types::{
    CoreError, DailyEmissionLeader, GeneratorCategory, GeneratorRecord, HeatRate, ReportDate,
    TotalValue,
};

/// The three result collections of one aggregation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    /// Total generation value per generator, in input order
    pub totals: Vec<TotalValue>,
    /// Highest emitter per date, ordered by date
    pub daily_emission_leaders: Vec<DailyEmissionLeader>,
    /// Heat rates of eligible coal generators, in input order
    pub heat_rates: Vec<HeatRate>,
}

impl AggregationResult {
    /// Whether all three collections are empty
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty() && self.daily_emission_leaders.is_empty() && self.heat_rates.is_empty()
    }
}

/// Current leader for one date, pointing back into the input slice.
#[derive(Debug, Clone, Copy)]
struct LeaderCandidate {
    record: usize,
    emission: f64,
    date: ReportDate,
}

impl LeaderCandidate {
    /// Strictly greater wins; a NaN leader yields to any number.
    fn is_beaten_by(&self, emission: f64) -> bool {
        emission > self.emission || (self.emission.is_nan() && !emission.is_nan())
    }
}

fn is_heat_rate_eligible(record: &GeneratorRecord) -> bool {
    record.category == GeneratorCategory::Coal && record.actual_net_generation == 0.0
}

/// Aggregate generator records into totals, daily emission leaders and heat rates.
///
/// Performs no I/O and holds no state between calls. Errors from the
/// resolver propagate unchanged and abort the whole run.
///
/// # Errors
///
/// Returns [`CoreError::InvalidCategory`] if the resolver rejects a
/// record's category.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, FixedOffset};
/// use fleet_core::prelude::*;
///
/// let resolver = ReferenceFactorResolver::new(FactorTable::new(
///     FactorTriple::new(0.946, 0.696, 0.265),
///     FactorTriple::new(0.812, 0.562, 0.312),
/// ));
/// let date: DateTime<FixedOffset> = "2017-01-01T00:00:00+00:00".parse().unwrap();
///
/// let records = vec![
///     GeneratorRecord::new("Gas[1]", GeneratorCategory::Gas)
///         .with_emissions_rating(0.038)
///         .with_days(vec![DailyRecord::new(date, 259.235, 15.837)]),
///     GeneratorRecord::new("Coal[1]", GeneratorCategory::Coal)
///         .with_emissions_rating(0.482)
///         .with_heat_input(11.815)
///         .with_net_generation(11.815)
///         .with_days(vec![DailyRecord::new(date, 350.487, 10.146)]),
/// ];
///
/// let result = aggregate(&records, &resolver).unwrap();
/// assert_eq!(result.daily_emission_leaders[0].generator_name, "Coal[1]");
/// assert!(result.heat_rates.is_empty());
/// ```
pub fn aggregate<R>(records: &[GeneratorRecord], resolver: &R) -> Result<AggregationResult, CoreError>
where
    R: FactorResolver + ?Sized,
{
    let mut totals = Vec::with_capacity(records.len());
    let mut heat_rates = Vec::new();
    let mut leaders: BTreeMap<ReportDate, LeaderCandidate> = BTreeMap::new();

    for (index, record) in records.iter().enumerate() {
        if is_heat_rate_eligible(record) {
            heat_rates.push(HeatRate {
                generator_name: record.name.clone(),
                heat_rate: actual_heat_rate(record.total_heat_input, record.actual_net_generation),
            });
        }

        let factors = resolver.resolve(record.category)?;
        let emitting = record.category.is_emitting();
        let mut total_value = 0.0;

        for day in &record.days {
            total_value += daily_generation_value(day.energy, day.price, factors.value_factor);

            if !emitting {
                continue;
            }

            let emission = daily_emissions(day.energy, record.emissions_rating, factors.emission_factor);
            leaders
                .entry(day.date)
                .and_modify(|leader| {
                    if leader.is_beaten_by(emission) {
                        leader.record = index;
                        leader.emission = emission;
                    }
                })
                .or_insert(LeaderCandidate {
                    record: index,
                    emission,
                    date: day.date,
                });
        }

        totals.push(TotalValue {
            generator_name: record.name.clone(),
            total_value,
        });
    }

    let daily_emission_leaders: Vec<DailyEmissionLeader> = leaders
        .into_values()
        .map(|leader| DailyEmissionLeader {
            generator_name: records[leader.record].name.clone(),
            emission: leader.emission,
            date: leader.date,
        })
        .collect();

    tracing::debug!(
        generators = records.len(),
        totals = totals.len(),
        emission_days = daily_emission_leaders.len(),
        heat_rates = heat_rates.len(),
        "Aggregation complete"
    );

    Ok(AggregationResult {
        totals,
        daily_emission_leaders,
        heat_rates,
    })
}

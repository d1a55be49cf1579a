//! Pure metric formulas.
//!
//! - [`daily_generation_value`]: energy x price x value factor
//! - [`daily_emissions`]: energy x emissions rating x emissions factor
//! - [`actual_heat_rate`]: total heat input / actual net generation, 0 when net generation is 0

/// Generation value of one day.
///
/// # Examples
///
/// ```
/// use fleet_core::metrics::daily_generation_value;
///
/// assert_eq!(daily_generation_value(50.0, 10.0, 0.265), 50.0 * 10.0 * 0.265);
/// ```
#[inline]
pub fn daily_generation_value(energy: f64, price: f64, value_factor: f64) -> f64 {
    energy * price * value_factor
}

/// Emissions of one day.
///
/// Exactly 0 when `emissions_rating` is 0, which is the case for wind.
#[inline]
pub fn daily_emissions(energy: f64, emissions_rating: f64, emission_factor: f64) -> f64 {
    energy * emissions_rating * emission_factor
}

/// Heat rate of a coal generator.
///
/// Zero net generation is valid input and yields exactly 0.
///
/// # Examples
///
/// ```
/// use fleet_core::metrics::actual_heat_rate;
///
/// assert_eq!(actual_heat_rate(100.0, 50.0), 2.0);
/// assert_eq!(actual_heat_rate(10.0, 0.0), 0.0);
/// ```
#[inline]
pub fn actual_heat_rate(total_heat_input: f64, actual_net_generation: f64) -> f64 {
    if actual_net_generation == 0.0 {
        return 0.0;
    }
    total_heat_input / actual_net_generation
}

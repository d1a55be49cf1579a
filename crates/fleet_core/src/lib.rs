//! # fleet_core: Calculation Engine for Generation Reports
//!
//! ## Kernel Layer Role
//!
//! fleet_core is the bottom layer of the workspace and holds the only real
//! domain logic:
//! - Generator, daily production and factor types (`types`)
//! - Category to factor mapping (`resolver`)
//! - Pure metric formulas (`metrics`)
//! - Fleet-wide aggregation into totals, daily emission leaders and heat rates (`aggregation`)
//! - Fixed-precision number and date formatting for serialisation (`format`)
//!
//! ## No I/O
//!
//! Nothing in this crate touches the filesystem. Parsing and writing live in
//! `adapter_xml`; orchestration lives in `service_watcher`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use fleet_core::prelude::*;
//!
//! let table = FactorTable::new(
//!     FactorTriple::new(0.946, 0.696, 0.265),
//!     FactorTriple::new(0.812, 0.562, 0.312),
//! );
//! let resolver = ReferenceFactorResolver::new(table);
//!
//! let date: DateTime<FixedOffset> = "2017-01-01T00:00:00+00:00".parse().unwrap();
//! let records = vec![GeneratorRecord::new("Wind[Offshore]", GeneratorCategory::WindOffshore)
//!     .with_days(vec![DailyRecord::new(date, 100.368, 20.148)])];
//!
//! let result = aggregate(&records, &resolver).unwrap();
//! assert_eq!(result.totals.len(), 1);
//! assert!(result.daily_emission_leaders.is_empty());
//! assert!(result.heat_rates.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod aggregation;
pub mod format;
pub mod metrics;
pub mod resolver;
pub mod types;

pub use aggregation::aggregate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregation::{aggregate, AggregationResult};
    pub use crate::format::{format_date, format_value, parse_date, parse_value};
    pub use crate::metrics::{actual_heat_rate, daily_emissions, daily_generation_value};
    pub use crate::resolver::{FactorPair, FactorResolver, ReferenceFactorResolver};
    pub use crate::types::{
        CoreError, DailyEmissionLeader, DailyRecord, FactorTable, FactorTriple,
        GeneratorCategory, GeneratorRecord, HeatRate, TotalValue,
    };
}

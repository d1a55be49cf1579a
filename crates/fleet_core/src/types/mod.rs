//! Generator, factor and result types.
//!
//! This module provides:
//! - `generator`: `GeneratorCategory`, `GeneratorRecord`, `DailyRecord`
//! - `factors`: `FactorTriple`, `FactorTable`
//! - `output`: `TotalValue`, `DailyEmissionLeader`, `HeatRate`
//! - `error`: `CoreError`
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod factors;
pub mod generator;
pub mod output;

pub use error::CoreError;
pub use factors::{FactorTable, FactorTriple};
pub use generator::{DailyRecord, GeneratorCategory, GeneratorRecord, ReportDate};
pub use output::{DailyEmissionLeader, HeatRate, TotalValue};

//! # service_watcher: Report Processing Service
//!
//! Watches an input folder for generation reports and turns each one into a
//! `GenerationOutput.xml` document.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the other layers
//! together:
//!
//! - [`FolderWatcher`] polls the input folder and sends new or rewritten
//!   report paths over an `async_channel`.
//! - [`run_workers`] drains that channel with a fixed number of tasks, each
//!   running [`ReportProcessor::process_file`] on the blocking pool.
//! - [`ReportProcessor`] parses the report (`adapter_xml`), aggregates it
//!   (`fleet_core`) and writes the output document.

pub mod error;
pub mod processor;
pub mod watcher;
pub mod worker;

pub use error::{Result, ServiceError};
pub use processor::{ProcessOutcome, ReportProcessor};
pub use watcher::FolderWatcher;
pub use worker::{process_with_timeout, run_workers, WorkerSummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

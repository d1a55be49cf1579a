//! # adapter_xml: XML Adapters for Generation Reports
//!
//! Adapter layer between the XML files on disk and the `fleet_core` types:
//!
//! - [`report`]: `GenerationReport.xml` into `GeneratorRecord`s
//! - [`reference`]: `ReferenceData.xml` into a `FactorTable`
//! - [`writer`]: an `AggregationResult` into `GenerationOutput.xml`
//!
//! Parsing goes through a small element tree built with quick-xml
//! ([`tree`]), so lookups read like "first `ValueFactor` anywhere in the
//! document" rather than a hand-written state machine per file.

pub mod error;
pub mod reference;
pub mod report;
pub mod tree;
pub mod writer;

pub use error::XmlError;
pub use reference::ReferenceDataParser;
pub use report::GenerationReportParser;
pub use writer::GenerationOutputWriter;

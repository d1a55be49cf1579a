//! Generation report parser.
//!
//! Reads `WindGenerator`, `GasGenerator` and `CoalGenerator` elements from
//! anywhere in the document. Generators are returned grouped by kind (all
//! wind, then gas, then coal), each group in document order.
//!
//! Numeric generator fields are read leniently: a missing or unparseable
//! value becomes 0. A `Day` is kept only when its date, energy and price all
//! parse; otherwise it is skipped.

use std::path::Path;

use fleet_core::format::{parse_date, parse_value};
use fleet_core::types::{DailyRecord, GeneratorCategory, GeneratorRecord};
use tracing::{debug, error, info};

use crate::error::XmlError;
use crate::tree::{parse_document, XmlNode};

/// Parser for generation report XML.
pub struct GenerationReportParser;

impl GenerationReportParser {
    /// Parse a generation report from an XML string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adapter_xml::GenerationReportParser;
    /// use fleet_core::types::GeneratorCategory;
    ///
    /// let xml = r#"
    /// <GenerationReport><Wind><WindGenerator>
    ///   <Name>Wind[Offshore]</Name>
    ///   <Generation><Day>
    ///     <Date>2017-01-01T00:00:00+00:00</Date><Energy>100.368</Energy><Price>20.148</Price>
    ///   </Day></Generation>
    ///   <Location>Offshore</Location>
    /// </WindGenerator></Wind></GenerationReport>"#;
    ///
    /// let generators = GenerationReportParser::parse(xml).unwrap();
    /// assert_eq!(generators[0].category, GeneratorCategory::WindOffshore);
    /// assert_eq!(generators[0].days.len(), 1);
    /// ```
    pub fn parse(xml: &str) -> Result<Vec<GeneratorRecord>, XmlError> {
        let doc = parse_document(xml)?;

        let mut generators: Vec<GeneratorRecord> = doc
            .descendants("WindGenerator")
            .into_iter()
            .map(parse_wind_generator)
            .collect();
        generators.extend(doc.descendants("GasGenerator").into_iter().map(parse_gas_generator));
        generators.extend(doc.descendants("CoalGenerator").into_iter().map(parse_coal_generator));

        Ok(generators)
    }

    /// Load and parse a generation report file.
    pub fn load(path: &Path) -> Result<Vec<GeneratorRecord>, XmlError> {
        if path.as_os_str().is_empty() || !path.is_file() {
            error!(path = %path.display(), "Generation report XML not found");
            return Err(XmlError::FileNotFound(path.to_path_buf()));
        }

        info!(path = %path.display(), "Loading generation report");
        let xml = std::fs::read_to_string(path)?;
        let generators = Self::parse(&xml)?;

        debug!(path = %path.display(), generators = generators.len(), "Generation report parsed");
        Ok(generators)
    }
}

fn lenient_number(node: &XmlNode, element: &str) -> f64 {
    node.child_text(element)
        .and_then(|text| parse_value(text).ok())
        .unwrap_or(0.0)
}

fn generator_name(node: &XmlNode) -> String {
    node.child_text("Name").unwrap_or_default().to_string()
}

fn parse_wind_generator(node: &XmlNode) -> GeneratorRecord {
    let offshore = node
        .child_text("Location")
        .is_some_and(|location| location.eq_ignore_ascii_case("Offshore"));
    let category = if offshore {
        GeneratorCategory::WindOffshore
    } else {
        GeneratorCategory::WindOnshore
    };

    GeneratorRecord::new(generator_name(node), category).with_days(parse_days(node))
}

fn parse_gas_generator(node: &XmlNode) -> GeneratorRecord {
    GeneratorRecord::new(generator_name(node), GeneratorCategory::Gas)
        .with_emissions_rating(lenient_number(node, "EmissionsRating"))
        .with_days(parse_days(node))
}

fn parse_coal_generator(node: &XmlNode) -> GeneratorRecord {
    GeneratorRecord::new(generator_name(node), GeneratorCategory::Coal)
        .with_emissions_rating(lenient_number(node, "EmissionsRating"))
        .with_heat_input(lenient_number(node, "TotalHeatInput"))
        .with_net_generation(lenient_number(node, "ActualNetGeneration"))
        .with_days(parse_days(node))
}

fn parse_days(generator: &XmlNode) -> Vec<DailyRecord> {
    let Some(generation) = generator.child("Generation") else {
        return Vec::new();
    };

    generation
        .descendants("Day")
        .into_iter()
        .filter_map(|day| {
            let parsed = parse_day(day);
            if parsed.is_none() {
                debug!(
                    generator = %generator.child_text("Name").unwrap_or_default(),
                    date = ?day.child_text("Date"),
                    "Skipping day with unparseable date, energy or price"
                );
            }
            parsed
        })
        .collect()
}

fn parse_day(day: &XmlNode) -> Option<DailyRecord> {
    let date = parse_date(day.child_text("Date")?).ok()?;
    let energy = parse_value(day.child_text("Energy")?).ok()?;
    let price = parse_value(day.child_text("Price")?).ok()?;
    Some(DailyRecord::new(date, energy, price))
}

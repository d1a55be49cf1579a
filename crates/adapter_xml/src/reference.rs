//! Reference factor parser.
//!
//! Takes the first `ValueFactor` and the first `EmissionsFactor` element in
//! the document. Both groups are required. Inside a group a missing
//! `High`/`Medium`/`Low` reads as 0, but a present value that is not a
//! number is rejected.

use std::path::Path;

use fleet_core::types::{FactorTable, FactorTriple};
use tracing::{debug, error, info};

use crate::error::XmlError;
use crate::tree::{parse_document, XmlNode};

const VALUE_FACTOR: &str = "ValueFactor";
const EMISSIONS_FACTOR: &str = "EmissionsFactor";

/// Parser for reference data XML.
pub struct ReferenceDataParser;

impl ReferenceDataParser {
    /// Parse reference factors from an XML string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adapter_xml::ReferenceDataParser;
    ///
    /// let xml = r#"<ReferenceData><Factors>
    ///   <ValueFactor><High>0.946</High><Medium>0.696</Medium><Low>0.265</Low></ValueFactor>
    ///   <EmissionsFactor><High>0.812</High><Medium>0.562</Medium><Low>0.312</Low></EmissionsFactor>
    /// </Factors></ReferenceData>"#;
    ///
    /// let table = ReferenceDataParser::parse(xml).unwrap();
    /// assert_eq!(table.value_factor.medium, 0.696);
    /// ```
    pub fn parse(xml: &str) -> Result<FactorTable, XmlError> {
        let doc = parse_document(xml)?;

        let value_node = doc
            .first_descendant(VALUE_FACTOR)
            .ok_or_else(|| XmlError::missing_element(VALUE_FACTOR))?;
        let emissions_node = doc
            .first_descendant(EMISSIONS_FACTOR)
            .ok_or_else(|| XmlError::missing_element(EMISSIONS_FACTOR))?;

        Ok(FactorTable::new(
            parse_triple(value_node)?,
            parse_triple(emissions_node)?,
        ))
    }

    /// Load and parse a reference data file.
    pub fn load(path: &Path) -> Result<FactorTable, XmlError> {
        if path.as_os_str().is_empty() || !path.is_file() {
            error!(path = %path.display(), "Reference data XML not found");
            return Err(XmlError::FileNotFound(path.to_path_buf()));
        }

        info!(path = %path.display(), "Loading reference factors");
        let xml = std::fs::read_to_string(path)?;
        let table = Self::parse(&xml)?;

        debug!(
            value_high = table.value_factor.high,
            value_medium = table.value_factor.medium,
            value_low = table.value_factor.low,
            emissions_high = table.emissions_factor.high,
            emissions_medium = table.emissions_factor.medium,
            emissions_low = table.emissions_factor.low,
            "Loaded reference factors"
        );
        Ok(table)
    }
}

fn parse_triple(group: &XmlNode) -> Result<FactorTriple, XmlError> {
    Ok(FactorTriple::new(
        strict_number(group, "High")?,
        strict_number(group, "Medium")?,
        strict_number(group, "Low")?,
    ))
}

fn strict_number(group: &XmlNode, element: &str) -> Result<f64, XmlError> {
    match group.child_text(element) {
        None => Ok(0.0),
        Some(text) => text.trim().parse().map_err(|_| XmlError::InvalidNumber {
            element: element.to_string(),
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EXAMPLE_XML: &str = r#"
<ReferenceData>
  <Factors>
    <ValueFactor>
      <High>0.946</High>
      <Medium>0.696</Medium>
      <Low>0.265</Low>
    </ValueFactor>
    <EmissionsFactor>
      <High>0.812</High>
      <Medium>0.562</Medium>
      <Low>0.312</Low>
    </EmissionsFactor>
  </Factors>
</ReferenceData>"#;

    #[test]
    fn test_parses_values() {
        let table = ReferenceDataParser::parse(EXAMPLE_XML).unwrap();

        assert_abs_diff_eq!(table.value_factor.high, 0.946);
        assert_abs_diff_eq!(table.value_factor.medium, 0.696);
        assert_abs_diff_eq!(table.value_factor.low, 0.265);
        assert_abs_diff_eq!(table.emissions_factor.high, 0.812);
        assert_abs_diff_eq!(table.emissions_factor.medium, 0.562);
        assert_abs_diff_eq!(table.emissions_factor.low, 0.312);
    }

    #[test]
    fn test_missing_group_is_an_error() {
        let xml = "<ReferenceData><ValueFactor><High>1</High></ValueFactor></ReferenceData>";
        let err = ReferenceDataParser::parse(xml).unwrap_err();
        assert!(matches!(err, XmlError::MissingElement(ref name) if name == "EmissionsFactor"));
    }

    #[test]
    fn test_missing_coefficient_reads_as_zero() {
        let xml = r#"<ReferenceData>
            <ValueFactor><High>1</High></ValueFactor>
            <EmissionsFactor><Low>0.3</Low></EmissionsFactor>
        </ReferenceData>"#;
        let table = ReferenceDataParser::parse(xml).unwrap();

        assert_eq!(table.value_factor, FactorTriple::new(1.0, 0.0, 0.0));
        assert_eq!(table.emissions_factor, FactorTriple::new(0.0, 0.0, 0.3));
    }

    #[test]
    fn test_non_numeric_coefficient_is_rejected() {
        let xml = r#"<ReferenceData>
            <ValueFactor><High>high</High></ValueFactor>
            <EmissionsFactor/>
        </ReferenceData>"#;
        let err = ReferenceDataParser::parse(xml).unwrap_err();
        assert!(matches!(err, XmlError::InvalidNumber { ref element, .. } if element == "High"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ReferenceData.xml");
        std::fs::write(&path, EXAMPLE_XML).unwrap();

        let table = ReferenceDataParser::load(&path).unwrap();
        assert_abs_diff_eq!(table.emissions_factor.low, 0.312);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReferenceDataParser::load(Path::new("missing/ReferenceData.xml")).unwrap_err();
        assert!(matches!(err, XmlError::FileNotFound(_)));
    }
}

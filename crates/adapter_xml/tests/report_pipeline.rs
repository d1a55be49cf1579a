//! Integration tests: files on disk through parsing, aggregation and output.

use adapter_xml::tree::parse_document;
use adapter_xml::{GenerationOutputWriter, GenerationReportParser, ReferenceDataParser};
use approx::assert_abs_diff_eq;
use fleet_core::format::parse_value;
use fleet_core::prelude::*;

const REFERENCE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ReferenceData>
  <Factors>
    <ValueFactor><High>0.946</High><Medium>0.696</Medium><Low>0.265</Low></ValueFactor>
    <EmissionsFactor><High>0.812</High><Medium>0.562</Medium><Low>0.312</Low></EmissionsFactor>
  </Factors>
</ReferenceData>"#;

const REPORT_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<GenerationReport>
  <Wind>
    <WindGenerator>
      <Name>Wind[Offshore]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>100.368</Energy><Price>20.148</Price></Day>
        <Day><Date>2017-01-02T00:00:00+00:00</Date><Energy>90.843</Energy><Price>25.516</Price></Day>
      </Generation>
      <Location>Offshore</Location>
    </WindGenerator>
  </Wind>
  <Gas>
    <GasGenerator>
      <Name>Gas[1]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>259.235</Energy><Price>15.837</Price></Day>
        <Day><Date>2017-01-02T00:00:00+00:00</Date><Energy>235.975</Energy><Price>16.556</Price></Day>
      </Generation>
      <EmissionsRating>0.038</EmissionsRating>
    </GasGenerator>
  </Gas>
  <Coal>
    <CoalGenerator>
      <Name>Coal[1]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>350.487</Energy><Price>10.146</Price></Day>
        <Day><Date>2017-01-02T00:00:00+00:00</Date><Energy>0</Energy><Price>11.815</Price></Day>
      </Generation>
      <TotalHeatInput>11.815</TotalHeatInput>
      <ActualNetGeneration>0</ActualNetGeneration>
      <EmissionsRating>0.482</EmissionsRating>
    </CoalGenerator>
  </Coal>
</GenerationReport>"#;

#[test]
fn test_files_to_output_document() {
    let dir = tempfile::tempdir().unwrap();
    let reference_path = dir.path().join("ReferenceData.xml");
    let report_path = dir.path().join("GenerationReport.xml");
    let output_path = dir.path().join("output").join("GenerationOutput.xml");
    std::fs::write(&reference_path, REFERENCE_XML).unwrap();
    std::fs::write(&report_path, REPORT_XML).unwrap();

    let resolver = ReferenceFactorResolver::new(ReferenceDataParser::load(&reference_path).unwrap());
    let generators = GenerationReportParser::load(&report_path).unwrap();
    let result = aggregate(&generators, &resolver).unwrap();
    GenerationOutputWriter::new().write(&output_path, &result).unwrap();

    let doc = parse_document(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    let root = doc.child("GenerationOutput").unwrap();

    let totals = &root.child("Totals").unwrap().children;
    assert_eq!(totals.len(), 3);
    let offshore_total = parse_value(totals[0].child_text("Total").unwrap()).unwrap();
    assert_abs_diff_eq!(
        offshore_total,
        100.368 * 20.148 * 0.265 + 90.843 * 25.516 * 0.265,
        epsilon = 1e-9
    );

    let days = &root.child("MaxEmissionGenerators").unwrap().children;
    let leaders: Vec<_> = days
        .iter()
        .map(|d| (d.child_text("Date").unwrap(), d.child_text("Name").unwrap()))
        .collect();
    assert_eq!(
        leaders,
        vec![
            ("2017-01-01T00:00:00+00:00", "Coal[1]"),
            ("2017-01-02T00:00:00+00:00", "Gas[1]"),
        ]
    );

    let heat_rates = &root.child("ActualHeatRates").unwrap().children;
    assert_eq!(heat_rates.len(), 1);
    assert_eq!(heat_rates[0].child_text("Name"), Some("Coal[1]"));
    assert_eq!(heat_rates[0].child_text("HeatRate"), Some("0.000000000"));
}

#[test]
fn test_every_number_has_nine_decimals() {
    let resolver = ReferenceFactorResolver::new(ReferenceDataParser::parse(REFERENCE_XML).unwrap());
    let generators = GenerationReportParser::parse(REPORT_XML).unwrap();
    let result = aggregate(&generators, &resolver).unwrap();
    let xml = GenerationOutputWriter::new().render(&result).unwrap();

    let doc = parse_document(&xml).unwrap();
    let numbers = ["Total", "Emission", "HeatRate"]
        .iter()
        .flat_map(|name| doc.descendants(name))
        .map(|node| node.text.clone())
        .collect::<Vec<_>>();

    assert!(!numbers.is_empty());
    for number in numbers {
        let decimals = number.split('.').nth(1).unwrap_or_default();
        assert_eq!(decimals.len(), 9, "{number}");
    }
}

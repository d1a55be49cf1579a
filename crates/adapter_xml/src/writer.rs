//! Generation output writer.
//!
//! Output shape:
//!
//! ```xml
//! <GenerationOutput>
//!   <Totals>
//!     <Generator><Name>Coal[1]</Name><Total>5341.716526632</Total></Generator>
//!   </Totals>
//!   <MaxEmissionGenerators>
//!     <Day><Name>Coal[1]</Name><Date>2017-01-01T00:00:00+00:00</Date><Emission>137.175004008</Emission></Day>
//!   </MaxEmissionGenerators>
//!   <ActualHeatRates>
//!     <CoalGenerator><Name>Coal[1]</Name><HeatRate>12.849293200</HeatRate></CoalGenerator>
//!   </ActualHeatRates>
//! </GenerationOutput>
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use fleet_core::aggregation::AggregationResult;
use fleet_core::format::{format_date, format_value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::XmlError;

/// Writes aggregation results as generation output XML.
#[derive(Debug, Clone)]
pub struct GenerationOutputWriter {
    indent: usize,
}

impl Default for GenerationOutputWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationOutputWriter {
    /// Create a writer with two-space indentation
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Set the indentation width (0 writes a single line)
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Render the output document to a string.
    pub fn render(&self, result: &AggregationResult) -> Result<String, XmlError> {
        let mut writer = if self.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.indent)
        } else {
            Writer::new(Vec::new())
        };

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        open(&mut writer, "GenerationOutput")?;

        open(&mut writer, "Totals")?;
        for total in &result.totals {
            open(&mut writer, "Generator")?;
            text_element(&mut writer, "Name", &total.generator_name)?;
            text_element(&mut writer, "Total", &format_value(total.total_value))?;
            close(&mut writer, "Generator")?;
        }
        close(&mut writer, "Totals")?;

        open(&mut writer, "MaxEmissionGenerators")?;
        for leader in &result.daily_emission_leaders {
            open(&mut writer, "Day")?;
            text_element(&mut writer, "Name", &leader.generator_name)?;
            text_element(&mut writer, "Date", &format_date(&leader.date))?;
            text_element(&mut writer, "Emission", &format_value(leader.emission))?;
            close(&mut writer, "Day")?;
        }
        close(&mut writer, "MaxEmissionGenerators")?;

        open(&mut writer, "ActualHeatRates")?;
        for heat_rate in &result.heat_rates {
            open(&mut writer, "CoalGenerator")?;
            text_element(&mut writer, "Name", &heat_rate.generator_name)?;
            text_element(&mut writer, "HeatRate", &format_value(heat_rate.heat_rate))?;
            close(&mut writer, "CoalGenerator")?;
        }
        close(&mut writer, "ActualHeatRates")?;

        close(&mut writer, "GenerationOutput")?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| XmlError::malformed(format!("output is not UTF-8: {}", e)))
    }

    /// Write the output document to `path`.
    ///
    /// The parent directory is created if needed. The document is rendered
    /// in full, written to a uniquely named temporary sibling and renamed into
    /// place, so a failure never leaves a partial file at `path` and
    /// concurrent writers never share a staging file. The last rename wins.
    pub fn write(&self, path: &Path, result: &AggregationResult) -> Result<(), XmlError> {
        let document = self.render(result)?;

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut staging = NamedTempFile::new_in(parent)?;
        staging.write_all(document.as_bytes())?;
        staging.as_file().sync_all()?;
        // Dropping the staging file on error removes it.
        staging.persist(path).map_err(|e| e.error)?;

        info!(
            path = %path.display(),
            totals = result.totals.len(),
            emission_days = result.daily_emission_leaders.len(),
            heat_rates = result.heat_rates.len(),
            "Successfully wrote generation output"
        );
        Ok(())
    }
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), XmlError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), XmlError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), XmlError> {
    open(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, name)
}

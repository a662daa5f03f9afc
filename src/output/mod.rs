//! Output formatting for CLI results

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::ReleaseDisplay;

pub mod formatters;
pub mod json;
pub mod table;
pub mod transform;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        let output = self.format(format)?;
        println!("{}", output);
        Ok(())
    }
}

/// Release records as returned by the API, after the record pipeline
impl Formattable for [Value] {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(json::format_json(self)?),
            OutputFormat::Table => {
                let rows: Vec<ReleaseDisplay> = self.iter().map(ReleaseDisplay::from).collect();
                Ok(table::format_table(&rows))
            }
            OutputFormat::Pretty => Ok(formatters::format_releases_pretty(self)),
        }
    }
}

impl Formattable for Vec<Value> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        self.as_slice().format(format)
    }
}

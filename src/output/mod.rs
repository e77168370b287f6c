//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use onfleet::Result;

pub mod display;
pub mod json;
pub mod table;

pub use display::Record;

/// Render a list of resources: one table row each, or a JSON array.
pub fn render_list<T, D>(items: &[T], format: OutputFormat) -> Result<String>
where
    T: Serialize,
    D: Tabled + for<'a> From<&'a T>,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<D> = items.iter().map(D::from).collect();
            Ok(table::format_table(&rows))
        }
        OutputFormat::Json => Ok(json::format_json_list(items)?),
    }
}

/// Render one resource: a FIELD / VALUE table, or a JSON object.
pub fn render_record<T: Serialize + Record>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::format_record(&item.record())),
        OutputFormat::Json => Ok(json::format_json(item)?),
    }
}

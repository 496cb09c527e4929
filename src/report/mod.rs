pub mod aggregate;
pub mod csv;

pub use aggregate::{aggregate, AggregatedRow, Report};
pub use csv::{default_export_filename, render_csv, write_csv};

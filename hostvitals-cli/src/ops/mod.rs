mod output;
mod report;
mod ui;

pub use output::OutputFormat;
pub use report::{list_facets, local_report, show_facet, show_report};

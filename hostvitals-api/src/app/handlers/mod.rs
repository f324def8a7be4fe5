mod health;
mod report;

pub use health::{handler_404, health};
pub use report::{get_facet, get_report, list_facets};

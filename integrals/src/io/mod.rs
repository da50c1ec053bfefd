//! Logging setup and report output

mod output;

pub use output::{save_json_report, setup_output, write_json_report};

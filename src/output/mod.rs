//! Output formatting module

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter, ReportGenerator};

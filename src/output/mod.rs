//! Output module: C10, the end-of-crawl text report.

mod log;

pub use log::{log_file_path, write_report, CrawlReport, LogWriteError};

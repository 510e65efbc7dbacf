//! Logger: C10. Writes the end-of-crawl text report. Grounded in the
//! teacher's `generate_markdown_summary` file-writing idiom
//! (`std::fs::File` + `Write`), retargeted from markdown to the plain-text
//! per-line format the spec mandates.

use crate::visited::VisitedRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogWriteError {
    #[error("failed to write crawl log to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the report needs beyond the per-URL records themselves.
pub struct CrawlReport<'a> {
    pub records: &'a [VisitedRecord],
    pub elapsed_secs: f64,
    pub final_frontier_size: usize,
    pub final_distinct_host_count: usize,
    pub num_workers: usize,
}

/// Builds the path `./data/crawler_log_<YYYY-MM-DD-HH-MM-SS>.txt` under
/// `log_dir`, from `now`.
pub fn log_file_path(log_dir: &str, now: DateTime<Utc>) -> PathBuf {
    let stamp = now.format("%Y-%m-%d-%H-%M-%S");
    Path::new(log_dir).join(format!("crawler_log_{stamp}.txt"))
}

/// Renders and writes the report. Log write failure is reported by the
/// caller (non-fatal per the spec) rather than propagated as a crawl error.
pub fn write_report(path: &Path, report: &CrawlReport) -> Result<(), LogWriteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LogWriteError::Io {
            path: path.display().to_string(),
            source,
        })?;
    }

    let mut file = File::create(path).map_err(|source| LogWriteError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let rendered = render_report(report);
    file.write_all(rendered.as_bytes())
        .map_err(|source| LogWriteError::Io {
            path: path.display().to_string(),
            source,
        })
}

fn render_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    for record in report.records {
        out.push_str(&format_record_line(record));
        out.push('\n');
    }

    let total_pages = report.records.len() as u64;
    let total_bytes: u64 = report.records.iter().map(|r| r.size).sum();
    let numeric_records: Vec<&VisitedRecord> = report
        .records
        .iter()
        .filter(|r| r.status.parse::<u16>().is_ok())
        .collect();
    let successful_records: Vec<&&VisitedRecord> = numeric_records
        .iter()
        .filter(|r| r.status.parse::<u16>().is_ok_and(|code| (200..300).contains(&code)))
        .collect();
    let avg_successful_size = if successful_records.is_empty() {
        0.0
    } else {
        successful_records.iter().map(|r| r.size).sum::<u64>() as f64
            / successful_records.len() as f64
    };
    let redirects = report
        .records
        .iter()
        .filter(|r| r.redirect_target.is_some())
        .count();

    out.push_str("\n--- totals ---\n");
    out.push_str(&format!("pages: {total_pages}\n"));
    out.push_str(&format!("bytes: {total_bytes}\n"));
    out.push_str(&format!("avg_successful_page_size: {avg_successful_size:.1}\n"));
    out.push_str(&format!("redirects: {redirects}\n"));
    out.push_str(&format!("elapsed_seconds: {:.1}\n", report.elapsed_secs));

    out.push_str("\n--- status histogram ---\n");
    let mut histogram: HashMap<&str, u64> = HashMap::new();
    for record in report.records {
        *histogram.entry(record.status.as_str()).or_insert(0) += 1;
    }
    let mut histogram: Vec<(&str, u64)> = histogram.into_iter().collect();
    histogram.sort_by(|a, b| a.0.cmp(b.0));
    for (status, count) in histogram {
        out.push_str(&format!("{status}: {count}\n"));
    }

    out.push_str("\n--- per-worker visit counts ---\n");
    let mut per_worker: HashMap<usize, u64> = HashMap::new();
    for record in report.records {
        *per_worker.entry(record.worker_id).or_insert(0) += 1;
    }
    let mut per_worker: Vec<(usize, u64)> = per_worker.into_iter().collect();
    per_worker.sort_by_key(|(worker, _)| *worker);
    for (worker, count) in per_worker {
        out.push_str(&format!("worker {worker}: {count}\n"));
    }

    out.push_str("\n--- final state ---\n");
    out.push_str(&format!("final_frontier_size: {}\n", report.final_frontier_size));
    out.push_str(&format!(
        "final_distinct_host_count: {}\n",
        report.final_distinct_host_count
    ));

    out
}

fn format_record_line(record: &VisitedRecord) -> String {
    let seed_marker = if record.is_seed { "seed" } else { "-" };
    let redirect = record.redirect_target.as_deref().unwrap_or("-");
    format!(
        "depth={} status={} seed={} url={} redirect={} ts={} size={}",
        record.depth,
        record.status,
        seed_marker,
        record.url_normalized,
        redirect,
        record.timestamp.to_rfc3339(),
        record.size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample_record(status: &str, order: u64, worker_id: usize) -> VisitedRecord {
        VisitedRecord {
            url_normalized: format!("https://{order}.nz/"),
            size: 1234,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            status: status.to_string(),
            depth: 0,
            visit_order: order,
            redirect_target: None,
            is_seed: order == 1,
            worker_id,
        }
    }

    #[test]
    fn log_file_path_uses_expected_stamp_format() {
        let now = Utc.with_ymd_and_hms(2026, 7, 28, 13, 5, 9).unwrap();
        let path = log_file_path("./data", now);
        assert_eq!(path, PathBuf::from("./data/crawler_log_2026-07-28-13-05-09.txt"));
    }

    #[test]
    fn render_report_includes_totals_and_histogram() {
        let records = vec![
            sample_record("200", 1, 0),
            sample_record("200", 2, 1),
            sample_record("Timeout", 3, 0),
        ];
        let report = CrawlReport {
            records: &records,
            elapsed_secs: 12.5,
            final_frontier_size: 4,
            final_distinct_host_count: 2,
            num_workers: 2,
        };

        let rendered = render_report(&report);
        assert!(rendered.contains("pages: 3"));
        assert!(rendered.contains("200: 2"));
        assert!(rendered.contains("Timeout: 1"));
        assert!(rendered.contains("worker 0: 2"));
        assert!(rendered.contains("worker 1: 1"));
        assert!(rendered.contains("final_frontier_size: 4"));
    }

    #[test]
    fn write_report_creates_parent_dir_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");
        let records = vec![sample_record("200", 1, 0)];
        let report = CrawlReport {
            records: &records,
            elapsed_secs: 1.0,
            final_frontier_size: 0,
            final_distinct_host_count: 1,
            num_workers: 1,
        };

        write_report(&path, &report).unwrap();
        assert!(path.exists());
    }
}

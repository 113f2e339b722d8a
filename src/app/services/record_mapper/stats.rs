//! Parsing statistics and result structures for record mapping
//!
//! This module provides types for tracking line counts, success rates and
//! skipped-line errors alongside the parsed records.

use serde::{Deserialize, Serialize};

/// Parsing result with records and statistics
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    /// Successfully parsed records, in input order
    pub records: Vec<T>,

    /// Line-level statistics
    pub stats: ParseStats,
}

/// Line-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines read
    pub lines_read: usize,

    /// Lines that were empty after trimming
    pub blank_lines: usize,

    /// Lines that started with a comment prefix
    pub comment_lines: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of lines skipped due to errors
    pub lines_skipped: usize,

    /// Skipped-line errors, capped by configuration
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that carried data (neither blank nor comments)
    pub fn data_lines(&self) -> usize {
        self.lines_read - self.blank_lines - self.comment_lines
    }

    /// Calculate success rate over data lines as a percentage
    pub fn success_rate(&self) -> f64 {
        let data_lines = self.data_lines();
        if data_lines == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / data_lines as f64) * 100.0
        }
    }

    /// Whether every data line produced a record
    pub fn is_clean(&self) -> bool {
        self.lines_skipped == 0
    }

    /// Record a skipped line, keeping at most `limit` error strings
    pub fn record_skip(&mut self, message: String, limit: usize) {
        self.lines_skipped += 1;
        if self.errors.len() < limit {
            self.errors.push(message);
        }
    }

    /// Merge statistics from another file
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines_read += other.lines_read;
        self.blank_lines += other.blank_lines;
        self.comment_lines += other.comment_lines;
        self.records_parsed += other.records_parsed;
        self.lines_skipped += other.lines_skipped;
        self.errors.extend(other.errors.iter().cloned());
    }
}

//! Outcome tracking for `--all` runs

use super::Transfer;
use crate::error::{EnvputError, EnvputResult};

/// Per-environment results of a batch transfer
#[derive(Debug)]
pub struct BatchReport {
    verb: &'static str,
    pub completed: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, EnvputError)>,
}

impl BatchReport {
    /// `verb` is the past tense used in the summary ("uploaded", "downloaded")
    pub fn new(verb: &'static str) -> Self {
        Self {
            verb,
            completed: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, result: EnvputResult<Transfer>) {
        match result {
            Ok(Transfer::Completed) => self.completed.push(name.to_string()),
            Ok(Transfer::Skipped) => self.skipped.push(name.to_string()),
            Err(err) => self.failed.push((name.to_string(), err)),
        }
    }

    pub fn total(&self) -> usize {
        self.completed.len() + self.skipped.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} {}, {} skipped, {} failed",
            self.completed.len(),
            self.verb,
            self.skipped.len(),
            self.failed.len()
        );
        if self.has_failures() {
            let names: Vec<&str> = self.failed.iter().map(|(name, _)| name.as_str()).collect();
            line.push_str(&format!(" ({})", names.join(", ")));
        }
        line
    }

    pub fn print_summary(&self) {
        println!();
        println!("📊 {}", self.summary());
    }

    /// Collapse into the command result; any failure fails the command
    pub fn into_result(self) -> EnvputResult<()> {
        if self.has_failures() {
            Err(EnvputError::BatchFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        } else {
            Ok(())
        }
    }
}

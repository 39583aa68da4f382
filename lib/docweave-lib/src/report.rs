use std::fmt;

use chrono::{DateTime, Local};

use crate::docweave_error::DocweaveError;

/// A page that failed to render, kept with its error so one broken page
/// never hides the others.
#[derive(Debug)]
pub struct PageFailure {
    pub location: String,
    pub error: DocweaveError,
}

/// Outcome of one build pass over the pages tree.
#[derive(Debug)]
pub struct BuildReport {
    timestamp: DateTime<Local>,
    rendered: Vec<String>,
    failures: Vec<PageFailure>,
}

impl BuildReport {
    pub fn new() -> BuildReport {
        BuildReport {
            timestamp: Local::now(),
            rendered: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn page_rendered(&mut self, location: impl Into<String>) {
        self.rendered.push(location.into());
    }

    pub fn page_failed(&mut self, location: impl Into<String>, error: DocweaveError) {
        self.failures.push(PageFailure {
            location: location.into(),
            error,
        });
    }

    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    pub fn failures(&self) -> &[PageFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl Default for BuildReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Documentation build finished at {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )?;
        write!(
            f,
            "{} pages rendered, {} failed",
            self.rendered.len(),
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(
                f,
                "\n  {}: [{:?}] {}",
                failure.location,
                failure.error.kind(),
                failure.error
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report() {
        let mut report = BuildReport::new();
        report.page_rendered("writing-algorithms/a");
        report.page_rendered("writing-algorithms/b");
        report.page_failed(
            "cloud-platform/broken",
            DocweaveError::unknown_fragment("unknown fragment 'missing'"),
        );
        assert!(report.has_failures());
        assert_eq!(report.rendered().len(), 2);

        let printed = report.to_string();
        assert!(printed.contains("2 pages rendered, 1 failed"));
        assert!(printed.contains("cloud-platform/broken: [UnknownFragment]"));
    }

    #[test]
    fn test_clean_report() {
        let mut report = BuildReport::new();
        report.page_rendered("writing-algorithms/a");
        assert!(!report.has_failures());
        assert!(report.to_string().contains("1 pages rendered, 0 failed"));
    }
}

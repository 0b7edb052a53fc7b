//! Batch orchestration
//!
//! Runs one engine call per target, never stopping early, then escalates
//! to the worst severity seen: any terminal failure makes the whole batch
//! a [`Error::BatchFailure`], otherwise any recoverable error makes it a
//! [`Error::BatchError`].

use std::fmt;
use std::path::Path;

use crate::context::SiteContext;
use crate::mode::Mode;
use crate::{Error, Result, Severity, placement, reversal};

/// Why one batch item did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDiagnostic {
    /// Position in the input sequence
    pub index: usize,
    pub item: String,
    pub severity: Severity,
    pub message: String,
}

/// Outcome of every item in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Command name shown in diagnostics
    pub verb: String,
    pub succeeded: Vec<String>,
    pub errors: Vec<ItemDiagnostic>,
    pub failures: Vec<ItemDiagnostic>,
}

impl BatchReport {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            ..Default::default()
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.errors.len() + self.failures.len()
    }

    /// Errors and failures together, in input order.
    pub fn diagnostics(&self) -> Vec<&ItemDiagnostic> {
        let mut all: Vec<_> = self.errors.iter().chain(&self.failures).collect();
        all.sort_by_key(|d| d.index);
        all
    }

    /// The worst severity present, `None` when every item succeeded.
    pub fn severity(&self) -> Option<Severity> {
        if !self.failures.is_empty() {
            Some(Severity::Failure)
        } else if !self.errors.is_empty() {
            Some(Severity::Error)
        } else {
            None
        }
    }

    fn record(&mut self, index: usize, item: &str, error: Error) {
        let diagnostic = ItemDiagnostic {
            index,
            item: item.to_string(),
            severity: error.severity(),
            message: error.to_string(),
        };
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Failure => self.failures.push(diagnostic),
        }
    }

    /// Turn the report into the call's result.
    pub fn into_result(self) -> Result<Self> {
        match self.severity() {
            Some(Severity::Failure) => Err(Error::BatchFailure(self)),
            Some(Severity::Error) => Err(Error::BatchError(self)),
            None => Ok(self),
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostics = self.diagnostics();
        write!(f, "{} total", diagnostics.len())?;
        for d in diagnostics {
            write!(
                f,
                "\n- {} {:?}\n    - {}",
                self.verb,
                d.item,
                d.message.lines().collect::<Vec<_>>().join("\n    ")
            )?;
        }
        if self.total() > 1 {
            write!(
                f,
                "\nResult (success={}, errors={}, failures={})",
                self.succeeded.len(),
                self.errors.len(),
                self.failures.len()
            )?;
        }
        Ok(())
    }
}

/// Apply `op` to every item and aggregate the outcomes.
pub fn run_batch<T, F>(verb: &str, items: &[String], mut op: F) -> Result<BatchReport>
where
    F: FnMut(&str) -> Result<T>,
{
    if items.is_empty() {
        return Err(Error::invalid_input("Need a directory or file path."));
    }

    let mut report = BatchReport::new(verb);
    for (index, item) in items.iter().enumerate() {
        match op(item) {
            Ok(_) => report.succeeded.push(item.clone()),
            Err(e) => {
                tracing::debug!(item = %item, error = %e, "Batch item did not succeed");
                report.record(index, item, e);
            }
        }
    }
    report.into_result()
}

/// Place every item in `mode`.
pub fn place_all(ctx: &SiteContext, mode: Mode, items: &[String]) -> Result<BatchReport> {
    run_batch(mode.as_str(), items, |item| placement::place(ctx, mode, item))
}

/// Undo the `mode` placement of every item.
pub fn remove_all(
    ctx: &SiteContext,
    mode: Mode,
    items: &[String],
    name_only: bool,
) -> Result<BatchReport> {
    if items.is_empty() {
        return Err(Error::invalid_input(
            "Need a package name, directory, or file path.",
        ));
    }
    run_batch(mode.undo_verb(), items, |item| {
        reversal::remove_raw(ctx, mode, item, name_only)
    })
}

/// Read batch targets from a file: one per line, skipping blank lines and
/// `#` comments.
pub fn read_target_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::invalid_input(format!(
            "File not found {:?}",
            path.display().to_string()
        )));
    }
    let content = sitepath_fs::io::read_text(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn items(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_success_returns_report() {
        let report = run_batch("copy", &items(&["a", "b"]), |_| Ok(())).unwrap();
        assert_eq!(report.succeeded, items(&["a", "b"]));
        assert_eq!(report.severity(), None);
    }

    #[test]
    fn every_item_is_attempted_after_errors() {
        let mut seen = Vec::new();
        let result = run_batch("copy", &items(&["a", "b", "c"]), |item| {
            seen.push(item.to_string());
            if item == "a" {
                Err(Error::invalid_input("bad"))
            } else {
                Ok(())
            }
        });
        assert_eq!(seen, items(&["a", "b", "c"]));
        assert!(matches!(result, Err(Error::BatchError(_))));
    }

    #[test]
    fn failure_outranks_error() {
        let result = run_batch("uncopy", &items(&["a", "b"]), |item| -> Result<()> {
            if item == "a" {
                Err(Error::invalid_input("bad"))
            } else {
                Err(Error::NotFound {
                    name: item.to_string(),
                    attempts: Vec::new(),
                })
            }
        });
        let Err(Error::BatchFailure(report)) = result else {
            panic!("expected batch failure");
        };
        let order: Vec<_> = report.diagnostics().iter().map(|d| d.item.clone()).collect();
        assert_eq!(order, items(&["a", "b"]));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn empty_batch_is_an_error() {
        let err = run_batch("copy", &[], |_| Ok(())).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn display_lists_items_and_totals() {
        let result = run_batch("copy", &items(&["ok", "bad"]), |item| {
            if item == "bad" {
                Err(Error::invalid_input("line one\nline two"))
            } else {
                Ok(())
            }
        });
        let text = result.unwrap_err().to_string();
        assert!(text.starts_with("1 total"));
        assert!(text.contains("- copy \"bad\"\n    - line one\n    line two"));
        assert!(text.ends_with("Result (success=1, errors=1, failures=0)"));
    }

    #[test]
    fn target_file_skips_blanks_and_comments() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("reqs.txt");
        fs::write(&file, "# sitepath-copied\n/src/a\n\n  /src/b  \n#/src/c\n").unwrap();

        assert_eq!(read_target_file(&file).unwrap(), items(&["/src/a", "/src/b"]));
    }

    #[test]
    fn missing_target_file_is_recoverable() {
        let dir = tempdir().unwrap();
        let err = read_target_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.is_recoverable());
    }
}

//! Terminal reporting for the fix command

use colored::Colorize;
use std::path::Path;

use crate::commands::FileOutcome;

/// Totals over one run
#[derive(Debug, Clone, Default)]
pub struct FixSummary {
    pub directories: usize,
    pub files_checked: usize,
    pub files_rewritten: usize,
    pub diagnostics: usize,
    pub fixes_applied: usize,
}

impl FixSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_checked += 1;
        self.diagnostics += outcome.diagnostics;
        self.fixes_applied += outcome.fixes;
        if outcome.fixes > 0 {
            self.files_rewritten += 1;
        }
    }

    /// Diagnostics that were reported but not fixed
    pub fn unfixed(&self) -> usize {
        self.diagnostics.saturating_sub(self.fixes_applied)
    }
}

pub fn print_file_fixed(path: &Path, fixes: usize) {
    println!(
        "{} {} ({})",
        "fixed".green().bold(),
        path.display(),
        plural(fixes, "fix", "fixes")
    );
}

pub fn print_summary(summary: &FixSummary) {
    let rewritten = if summary.files_rewritten > 0 {
        plural(summary.files_rewritten, "file", "files").green().to_string()
    } else {
        "no files".to_string()
    };
    println!(
        "Checked {} in {}, rewrote {} with {}",
        plural(summary.files_checked, "file", "files"),
        plural(summary.directories, "directory", "directories"),
        rewritten,
        plural(summary.fixes_applied, "fix", "fixes"),
    );

    let unfixed = summary.unfixed();
    if unfixed > 0 {
        println!(
            "{}",
            format!("{} left unfixed", plural(unfixed, "diagnostic", "diagnostics")).yellow()
        );
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = FixSummary::default();
        summary.record(&FileOutcome {
            diagnostics: 3,
            fixes: 1,
        });
        summary.record(&FileOutcome::default());
        assert_eq!(summary.files_checked, 2);
        assert_eq!(summary.files_rewritten, 1);
        assert_eq!(summary.unfixed(), 2);
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "fix", "fixes"), "1 fix");
        assert_eq!(plural(0, "fix", "fixes"), "0 fixes");
    }
}

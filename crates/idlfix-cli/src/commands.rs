//! The batch fix command
//!
//! Directories are processed in the order given and files in name order. A
//! file is written back only when at least one fix was applied; a syntax
//! error stops the run before the failing file is touched.

use anyhow::{Context, Result};
use idlfix_core::{
    AutofixConfiguration, ConfigLoader, Dialect, IdlfixError, parse_with, write,
};
use idlfix_rules::{RuleEngine, apply_fixes};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::output::{self, FixSummary};

/// Validate and fix every matching file of `directories`
pub fn fix_command(directories: &[PathBuf]) -> Result<FixSummary> {
    let config = ConfigLoader::load(None, None)?;
    let engine = RuleEngine::from_config(&config)?;
    let policy = config.autofix_config();
    let dialect = config.dialect();
    let files_config = config.files_config();
    let extension = files_config.extension();
    debug!(%dialect, extension, "loaded configuration");

    let mut summary = FixSummary::default();
    for directory in directories {
        let files = list_files(directory, extension)?;
        debug!(directory = %directory.display(), files = files.len(), "processing directory");

        for path in files {
            let outcome = fix_file(&path, dialect, &engine, &policy)?;
            if outcome.fixes > 0 {
                output::print_file_fixed(&path, outcome.fixes);
            }
            summary.record(&outcome);
        }
        summary.directories += 1;
    }

    Ok(summary)
}

/// What happened to one file
#[derive(Debug, Clone, Copy, Default)]
pub struct FileOutcome {
    pub diagnostics: usize,
    pub fixes: usize,
}

fn fix_file(
    path: &Path,
    dialect: Dialect,
    engine: &RuleEngine,
    policy: &AutofixConfiguration,
) -> Result<FileOutcome> {
    let source = fs::read_to_string(path).map_err(|e| IdlfixError::io_error(path, e))?;
    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut root = parse_with(&source, &source_name, dialect)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let diagnostics = engine.validate(&root);
    for diagnostic in &diagnostics {
        debug!("{diagnostic}");
    }
    let fixes = apply_fixes(&mut root, &diagnostics, policy);

    if fixes > 0 {
        fs::write(path, write(&root)).map_err(|e| IdlfixError::io_error(path, e))?;
        info!(path = %path.display(), fixes, "rewrote file");
    }

    Ok(FileOutcome {
        diagnostics: diagnostics.len(),
        fixes,
    })
}

/// Files directly inside `directory` whose extension is `extension`, sorted
/// by name
fn list_files(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", directory.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|ext| ext.to_str()) == Some(extension)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.webidl", "a.webidl", "notes.txt", "c.webidl.bak"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.webidl")).unwrap();
        fs::write(dir.path().join("nested.webidl").join("d.webidl"), "").unwrap();

        let files = list_files(dir.path(), "webidl").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.webidl", "b.webidl"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_files(&dir.path().join("missing"), "webidl").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read directory"));
    }

    #[test]
    fn test_fix_file_writes_only_when_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let engine = RuleEngine::new();
        let policy = AutofixConfiguration::default();

        let clean = dir.path().join("Clean.webidl");
        fs::write(&clean, "[Exposed=Window]\ninterface Clean {};\n").unwrap();
        let outcome = fix_file(&clean, Dialect::Gecko, &engine, &policy).unwrap();
        assert_eq!(outcome.fixes, 0);

        let dirty = dir.path().join("Dirty.webidl");
        fs::write(&dirty, "interface Dirty {\n  void f();\n};\n").unwrap();
        let outcome = fix_file(&dirty, Dialect::Gecko, &engine, &policy).unwrap();
        assert_eq!(outcome.diagnostics, 2);
        assert_eq!(outcome.fixes, 1);
        assert_eq!(
            fs::read_to_string(&dirty).unwrap(),
            "interface Dirty {\n  undefined f();\n};\n"
        );
    }
}

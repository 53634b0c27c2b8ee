//! Directory scanning.

use crate::archive::extract_and_process;
use crate::convert::{convert, ConvertOptions};
use crate::detect::FileKind;
use crate::error::Error;
use crate::report::{BatchSummary, Reporter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Settings shared by every job in a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Destination for all outputs; `None` writes each next to its input
    pub output_dir: Option<PathBuf>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Extract and scan `.zip` archives
    pub include_zip: bool,
}

impl BatchOptions {
    /// Create default options: top level only, archives skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable recursion into subdirectories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Enable or disable archive extraction.
    pub fn with_include_zip(mut self, include_zip: bool) -> Self {
        self.include_zip = include_zip;
        self
    }

    /// Conversion options for one file of this batch.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            rename: None,
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Convert every eligible file under `dir`.
///
/// Without `recursive` only the directory's own files are considered. The
/// file list is collected up front, so outputs written during the walk are
/// not visited. One file failing never stops the rest.
pub fn walk(
    dir: impl AsRef<Path>,
    options: &BatchOptions,
    reporter: &mut dyn Reporter,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in list_files(dir.as_ref(), options.recursive, reporter, &mut summary) {
        match FileKind::from_path(&path) {
            FileKind::Archive if options.include_zip => {
                summary.merge(extract_and_process(&path, options, reporter));
            }
            FileKind::Archive => summary.skipped_archives.push(path),
            FileKind::Spreadsheet => {
                reporter.processing(&path);
                match convert(&path, &options.convert_options()) {
                    Ok(done) => {
                        reporter.converted(&done);
                        summary.converted += 1;
                    }
                    Err(e) => {
                        reporter.failed(&path, &e);
                        summary.failed += 1;
                    }
                }
            }
            FileKind::Other => {}
        }
    }

    summary
}

/// Files under `dir`, in file-name order.
///
/// Symlinks to files are listed; symlinked directories are not descended.
/// Entries that cannot be read count as failures in `summary`.
fn list_files(
    dir: &Path,
    recursive: bool,
    reporter: &mut dyn Reporter,
    summary: &mut BatchSummary,
) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.path().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                reporter.failed(&path, &Error::from(e));
                summary.failed += 1;
            }
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;
    use std::fs;

    #[test]
    fn test_list_files_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.xls"), b"x").unwrap();
        fs::write(dir.path().join("a.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.xls"), b"x").unwrap();

        let mut summary = BatchSummary::default();
        let top = list_files(dir.path(), false, &mut NullReporter, &mut summary);
        let names: Vec<_> = top
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.xls"]);

        let all = list_files(dir.path(), true, &mut NullReporter, &mut summary);
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|p| p.ends_with("sub/c.xls")));
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_unreadable_root_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let summary = walk(&missing, &BatchOptions::new(), &mut NullReporter);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_listed_but_not_dir() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        fs::write(elsewhere.path().join("real.xls"), b"x").unwrap();
        fs::write(elsewhere.path().join("inner.xls"), b"x").unwrap();
        symlink(elsewhere.path().join("real.xls"), dir.path().join("link.xls")).unwrap();
        symlink(elsewhere.path(), dir.path().join("linked_dir")).unwrap();

        let mut summary = BatchSummary::default();
        let files = list_files(dir.path(), true, &mut NullReporter, &mut summary);
        assert_eq!(files, vec![dir.path().join("link.xls")]);
    }

    #[test]
    fn test_skipped_archive_recorded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bundle.zip"), b"PK").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        let summary = walk(dir.path(), &BatchOptions::new(), &mut NullReporter);
        assert_eq!(summary.converted, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.skipped_archives, vec![dir.path().join("bundle.zip")]);
    }

    #[test]
    fn test_batch_convert_options() {
        let options = BatchOptions::new().with_output_dir("out");
        let convert = options.convert_options();
        assert!(convert.rename.is_none());
        assert_eq!(convert.output_dir, Some(PathBuf::from("out")));
    }
}

//! Zip archive extraction and scanning.

use crate::error::{Error, Result};
use crate::report::{BatchSummary, Reporter};
use crate::walk::{walk, BatchOptions};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix for scratch extraction directories.
const SCRATCH_PREFIX: &str = "upsheet-";

/// Extract `archive` into a scratch directory and convert what it holds.
///
/// The extracted tree is walked with the same options, so nested archives
/// are opened too when `include_zip` is set. Outputs land in
/// `options.output_dir`, or next to the archive when none is set. The
/// scratch directory is removed before returning, whatever the outcome.
pub fn extract_and_process(
    archive: impl AsRef<Path>,
    options: &BatchOptions,
    reporter: &mut dyn Reporter,
) -> BatchSummary {
    let archive = archive.as_ref();
    let mut summary = BatchSummary::default();

    let scratch = match tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            reporter.failed(archive, &Error::from(e));
            summary.failed += 1;
            return summary;
        }
    };
    reporter.extracting(archive, scratch.path());

    match extract(archive, &scratch) {
        Ok(()) => {
            let options = BatchOptions {
                output_dir: Some(
                    options
                        .output_dir
                        .clone()
                        .unwrap_or_else(|| archive_dir(archive)),
                ),
                ..options.clone()
            };
            summary.merge(walk(scratch.path(), &options, reporter));
        }
        Err(e) => {
            reporter.failed(archive, &e);
            summary.failed += 1;
        }
    }

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        reporter.warning(&format!(
            "could not remove {}: {}",
            scratch_path.display(),
            e
        ));
    }

    summary
}

fn extract(archive: &Path, scratch: &TempDir) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
    zip.extract(scratch.path())?;
    Ok(())
}

fn archive_dir(archive: &Path) -> PathBuf {
    archive.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Default)]
    struct Recorder {
        scratch: Vec<PathBuf>,
        failures: Vec<String>,
    }

    impl Reporter for Recorder {
        fn extracting(&mut self, _archive: &Path, scratch: &Path) {
            self.scratch.push(scratch.to_path_buf());
        }

        fn failed(&mut self, _path: &Path, error: &Error) {
            self.failures.push(error.to_string());
        }
    }

    #[test]
    fn test_corrupt_archive_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let mut recorder = Recorder::default();
        let summary = extract_and_process(&archive, &BatchOptions::new(), &mut recorder);

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.converted, 0);
        assert_eq!(recorder.failures.len(), 1);
        assert_eq!(recorder.scratch.len(), 1);
        assert!(!recorder.scratch[0].exists());
    }

    #[test]
    fn test_missing_archive_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::default();
        let summary = extract_and_process(
            dir.path().join("absent.zip"),
            &BatchOptions::new(),
            &mut recorder,
        );

        assert_eq!(summary.failed, 1);
        assert!(!recorder.scratch[0].exists());
    }

    #[test]
    fn test_archive_dir() {
        assert_eq!(
            archive_dir(Path::new("in/batch.zip")),
            PathBuf::from("in")
        );
        assert_eq!(archive_dir(Path::new("batch.zip")), PathBuf::new());
    }
}

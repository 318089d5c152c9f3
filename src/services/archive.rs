//! Archive extraction
//!
//! The billing export ships as a zip archive holding a single CSV file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{CostSplitError, CostSplitResult};

/// Extract `entry_name` from the archive at `archive_path` into `folder`
///
/// Returns the path of the extracted file. A missing archive is reported as
/// [`CostSplitError::ArchiveMissing`] so callers can tell it apart from a
/// broken or mismatched archive.
pub fn extract_entry(archive_path: &Path, entry_name: &str, folder: &Path) -> CostSplitResult<PathBuf> {
    if !archive_path.is_file() {
        return Err(CostSplitError::ArchiveMissing {
            path: archive_path.to_path_buf(),
        });
    }

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = archive.by_name(entry_name).map_err(|e| match e {
        ZipError::FileNotFound => CostSplitError::Archive(format!(
            "{} does not contain {}",
            archive_path.display(),
            entry_name
        )),
        other => other.into(),
    })?;

    let dest = folder.join(entry_name);
    let out = File::create(&dest).map_err(|e| {
        CostSplitError::Io(format!("Failed to create {}: {}", dest.display(), e))
    })?;
    let mut writer = BufWriter::new(out);
    let bytes = std::io::copy(&mut entry, &mut writer)?;
    writer.flush()?;

    info!(archive = %archive_path.display(), dest = %dest.display(), bytes, "extracted export");
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_archive(path: &Path, entry: &str, contents: &str) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file(entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_entry() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("billing-2025-01.csv.zip");
        write_archive(&archive, "billing-2025-01.csv", "LinkedAccountId,BlendedCost\n1,2\n");

        let dest = extract_entry(&archive, "billing-2025-01.csv", temp_dir.path()).unwrap();
        assert_eq!(dest, temp_dir.path().join("billing-2025-01.csv"));
        assert_eq!(
            std::fs::read_to_string(dest).unwrap(),
            "LinkedAccountId,BlendedCost\n1,2\n"
        );
    }

    #[test]
    fn test_missing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("absent.csv.zip");

        let err = extract_entry(&archive, "absent.csv", temp_dir.path()).unwrap_err();
        assert!(err.is_archive_missing());
    }

    #[test]
    fn test_missing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("billing-2025-01.csv.zip");
        write_archive(&archive, "other.csv", "x");

        let err = extract_entry(&archive, "billing-2025-01.csv", temp_dir.path()).unwrap_err();
        assert!(matches!(err, CostSplitError::Archive(_)));
    }

    #[test]
    fn test_corrupt_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("billing-2025-01.csv.zip");
        std::fs::write(&archive, b"not a zip").unwrap();

        let err = extract_entry(&archive, "billing-2025-01.csv", temp_dir.path()).unwrap_err();
        assert!(matches!(err, CostSplitError::Archive(_)));
    }
}

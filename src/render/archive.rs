//! Archiving payslips under their payment date.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::config::ArchiveConfig;
use crate::error::{ArchiveError, ArchiveResult};

/// Builds the archive file name `<prefix>-YYYY-MM-DD.<extension>`.
///
/// A leading dot on `extension` is ignored.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payslip_parser::render::archive_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2023, 9, 21).unwrap();
/// assert_eq!(archive_file_name("Payslip", date, "pdf"), "Payslip-2023-09-21.pdf");
/// ```
pub fn archive_file_name(prefix: &str, payment_date: NaiveDate, extension: &str) -> String {
    format!(
        "{}-{}.{}",
        prefix,
        payment_date.format("%Y-%m-%d"),
        extension.trim_start_matches('.')
    )
}

/// Copies `source` into the archive directory, named after `payment_date`.
///
/// The directory is created if needed, an existing copy with the same name is
/// replaced, and the copy's modification time is set to midnight (UTC) on the
/// payment date. The extension of `source` is kept; a file without one is
/// archived as `.txt`.
///
/// Returns the path of the archived copy.
pub fn archive_document(
    source: &Path,
    payment_date: NaiveDate,
    config: &ArchiveConfig,
) -> ArchiveResult<PathBuf> {
    fs::create_dir_all(&config.directory).map_err(|source| ArchiveError::CreateDirectory {
        path: config.directory.display().to_string(),
        source,
    })?;

    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("txt");
    let target = config
        .directory
        .join(archive_file_name(&config.file_prefix, payment_date, extension));

    fs::copy(source, &target).map_err(|err| ArchiveError::Copy {
        from: source.display().to_string(),
        to: target.display().to_string(),
        source: err,
    })?;

    let modified = SystemTime::from(payment_date.and_time(NaiveTime::MIN).and_utc());
    File::options()
        .write(true)
        .open(&target)
        .and_then(|file| file.set_modified(modified))
        .map_err(|source| ArchiveError::SetModified {
            path: target.display().to_string(),
            source,
        })?;

    debug!(
        from = %source.display(),
        to = %target.display(),
        payment_date = %payment_date,
        "Archived payslip"
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_archive_file_name_strips_leading_dot() {
        assert_eq!(
            archive_file_name("Acme", date(2024, 1, 4), ".txt"),
            "Acme-2024-01-04.txt"
        );
    }

    #[test]
    fn test_archive_document_copies_and_touches() {
        let workspace = tempfile::tempdir().unwrap();
        let source = workspace.path().join("statement.pdf");
        fs::write(&source, b"payslip body").unwrap();

        let config = ArchiveConfig {
            directory: workspace.path().join("archive").join("2023"),
            file_prefix: "Payslip".to_string(),
        };
        let target = archive_document(&source, date(2023, 9, 21), &config).unwrap();

        assert_eq!(target, config.directory.join("Payslip-2023-09-21.pdf"));
        assert_eq!(fs::read(&target).unwrap(), b"payslip body");

        let modified = fs::metadata(&target).unwrap().modified().unwrap();
        let since_epoch = modified.duration_since(SystemTime::UNIX_EPOCH).unwrap();
        // 2023-09-21T00:00:00Z
        assert_eq!(since_epoch, Duration::from_secs(1_695_254_400));
    }

    #[test]
    fn test_archive_document_without_extension_uses_txt() {
        let workspace = tempfile::tempdir().unwrap();
        let source = workspace.path().join("statement");
        fs::write(&source, b"x").unwrap();

        let config = ArchiveConfig {
            directory: workspace.path().to_path_buf(),
            file_prefix: "Payslip".to_string(),
        };
        let target = archive_document(&source, date(2024, 1, 4), &config).unwrap();
        assert_eq!(target.file_name().unwrap(), "Payslip-2024-01-04.txt");
    }

    #[test]
    fn test_archive_document_missing_source() {
        let workspace = tempfile::tempdir().unwrap();
        let config = ArchiveConfig {
            directory: workspace.path().join("archive"),
            file_prefix: "Payslip".to_string(),
        };
        let err = archive_document(&workspace.path().join("nope.pdf"), date(2024, 1, 4), &config)
            .unwrap_err();
        assert!(matches!(err, ArchiveError::Copy { .. }));
    }
}

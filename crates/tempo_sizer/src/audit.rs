//! The transformation audit log.
//!
//! Every applied swap is recorded in `<workdir>/data/resized_cells.csv`
//! so downstream flows can re-apply the resizings to the folded model.
//! The file is created at loop entry, appended to on every swap in
//! temporal order, and closed exactly once on every terminal state.
//! Instance names are stored unescaped.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Subdirectory of the workdir holding generated data files.
const DATA_SUBDIR: &str = "data";

/// File name of the transformation log.
const AUDIT_FILE_NAME: &str = "resized_cells.csv";

/// Errors that can occur while writing the transformation log.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// An I/O error while creating or writing the log.
    #[error("transformation log I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record was appended after the log was closed.
    #[error("transformation log is already closed")]
    Closed,
}

/// An append-only CSV log of applied cell swaps.
pub struct AuditLog {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    records: usize,
}

impl AuditLog {
    /// Creates the log under `<workdir>/data/`, including parent
    /// directories, and writes the CSV header.
    pub fn create(workdir: &Path) -> Result<Self, AuditError> {
        let dir = workdir.join(DATA_SUBDIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(AUDIT_FILE_NAME);
        let mut writer = BufWriter::new(File::create(&path)?);
        writeln!(writer, "Scope,Instance,From cell,To cell")?;
        Ok(Self {
            writer: Some(writer),
            path,
            records: 0,
        })
    }

    /// Appends one swap record. `instance` must already be unescaped.
    pub fn record(
        &mut self,
        scope: &str,
        instance: &str,
        from_cell: &str,
        to_cell: &str,
    ) -> Result<(), AuditError> {
        let writer = self.writer.as_mut().ok_or(AuditError::Closed)?;
        writeln!(writer, "\"{scope}\",{instance},{from_cell},{to_cell}")?;
        self.records += 1;
        Ok(())
    }

    /// Flushes and closes the log. Closing an already-closed log is a no-op.
    pub fn close(&mut self) -> Result<(), AuditError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Returns `true` once the log has been closed.
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Returns the number of records appended so far.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::create(dir.path()).unwrap();
        log.close().unwrap();
        let content = fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "Scope,Instance,From cell,To cell\n");
    }

    #[test]
    fn records_in_temporal_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::create(dir.path()).unwrap();
        log.record("alu", "u1/add_w8", "add_sp0_w8", "add_sp1_w8")
            .unwrap();
        log.record("alu", "u2/mul_w8", "mul_sp0_w8", "mul_sp1_w8")
            .unwrap();
        log.close().unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "\"alu\",u1/add_w8,add_sp0_w8,add_sp1_w8");
        assert_eq!(lines[2], "\"alu\",u2/mul_w8,mul_sp0_w8,mul_sp1_w8");
        assert_eq!(log.record_count(), 2);
    }

    #[test]
    fn scope_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::create(dir.path()).unwrap();
        log.record("top", "u1", "a_sp0_b", "a_sp1_b").unwrap();
        log.close().unwrap();
        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("\"top\",u1,"));
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::create(dir.path()).unwrap();
        assert!(!log.is_closed());
        log.close().unwrap();
        assert!(log.is_closed());
        log.close().unwrap();
        assert!(log.is_closed());
    }

    #[test]
    fn record_after_close_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::create(dir.path()).unwrap();
        log.close().unwrap();
        let err = log.record("s", "i", "f", "t").unwrap_err();
        assert!(matches!(err, AuditError::Closed));
    }

    #[test]
    fn creates_data_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::create(dir.path()).unwrap();
        assert!(log.path().starts_with(dir.path().join("data")));
        assert!(log.path().ends_with("resized_cells.csv"));
    }

    #[test]
    fn drop_flushes_pending_records() {
        let dir = tempfile::tempdir().unwrap();
        let path;
        {
            let mut log = AuditLog::create(dir.path()).unwrap();
            log.record("s", "i", "f", "t").unwrap();
            path = log.path().to_path_buf();
        }
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}

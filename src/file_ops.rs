//! Reading input text and writing results to files
//!
//! Output files are replaced atomically: the text goes to a temporary file in
//! the target directory, which is flushed, synced and renamed over the target.
//! On Unix the result is readable by the owner only, since it may hold
//! recovered plaintext or key material.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{CrackboxError, ErrorCategory, ErrorKind, Result};

/// Reads a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        CrackboxError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("{} is not valid UTF-8", path.display()),
            e,
        )
    })
}

/// Atomically replaces `path` with `contents`.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| io_error("failed to create tempfile", e))?;
    temp_file
        .write_all(contents.as_bytes())
        .map_err(|e| io_error("failed to write to tempfile", e))?;
    temp_file
        .flush()
        .map_err(|e| io_error("failed to flush tempfile", e))?;
    // Sync before the rename so the target never names a partial file.
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| io_error("failed to sync file prior to rename", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| io_error("failed to set tempfile permissions", e))?;
    }

    temp_file.persist(path).map_err(|e| {
        CrackboxError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn io_error(msg: &str, err: io::Error) -> CrackboxError {
    CrackboxError::with_kind_and_source(ErrorCategory::Internal, ErrorKind::Io, msg, err)
}

fn read_error(path: &Path, err: io::Error) -> CrackboxError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    CrackboxError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        write_text(&path, "KHOOR ZRUOG").unwrap();
        assert_eq!(read_text(&path).unwrap(), "KHOOR ZRUOG");
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        fs::write(&path, "old contents that are longer").unwrap();
        write_text(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // Only the target remains; the tempfile was renamed over it.
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.txt");
        write_text(&path, "ATTACK AT DAWN").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_text(&temp_dir.path().join("nope.txt")).expect_err("missing");
        assert_eq!(err.kind, Some(ErrorKind::Io));
        assert_eq!(err.category, ErrorCategory::User);
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bin.dat");
        fs::write(&path, [0xc3, 0x28]).unwrap();
        let err = read_text(&path).expect_err("invalid utf-8");
        assert_eq!(err.kind, Some(ErrorKind::Io));
    }
}

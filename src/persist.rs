//! Persistence gate: no-op detection plus an exclusively-locked full rewrite.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::errors::TransformError;

/// Compare computed content against the original and write only when they
/// differ.
///
/// Returns `false` without touching the file when `computed` is byte-equal to
/// `original`; this is what makes "set a value to what it already is", "add
/// when present", and "remove when absent" safe no-ops. Refuses to ever write
/// empty content. The write itself replaces the whole file under an exclusive
/// advisory lock; there is no partial-write state.
pub fn save(path: &Path, original: &str, computed: &str) -> Result<bool, TransformError> {
    if computed.trim().is_empty() {
        return Err(TransformError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    if computed == original {
        return Ok(false);
    }

    write_locked(path, computed.as_bytes()).map_err(|source| TransformError::SaveFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

fn write_locked(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    // Lock is released when the handle drops at the end of this function.
    lock_exclusive(&file)?;

    file.set_len(0)?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn lock_exclusive(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &File) -> std::io::Result<()> {
    // No advisory locking on this platform; the write is still a single
    // full-buffer replacement.
    Ok(())
}

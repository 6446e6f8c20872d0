//! Credentials file persistence
//!
//! The bot reads `credentials.json` on startup. The file is written atomically
//! (temp file in the same directory, then rename) with four-space indentation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::credentials::Credentials;
use crate::error::{ProvisionError, ProvisionResult};

/// Result of re-reading the written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch,
}

/// Render credentials as indented JSON.
pub fn to_json(credentials: &Credentials) -> ProvisionResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    credentials.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write credentials to `path`, replacing any existing file.
pub fn write_credentials(path: &Path, credentials: &Credentials) -> ProvisionResult<()> {
    let content = to_json(credentials)?;
    let persistence = |source| ProvisionError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(persistence)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(persistence)?;
    tmp.write_all(content.as_bytes()).map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|e| persistence(e.error))?;
    Ok(())
}

/// Read credentials back from `path`.
pub fn read_credentials(path: &Path) -> ProvisionResult<Credentials> {
    let content = fs::read_to_string(path).map_err(|source| ProvisionError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Compare the file at `path` with `expected` value-for-value.
///
/// A file that no longer parses as credentials counts as a mismatch.
pub fn verify_credentials(path: &Path, expected: &Credentials) -> ProvisionResult<Verification> {
    match read_credentials(path) {
        Ok(saved) if &saved == expected => Ok(Verification::Match),
        Ok(_) | Err(ProvisionError::Encoding(_)) => Ok(Verification::Mismatch),
        Err(e) => Err(e),
    }
}

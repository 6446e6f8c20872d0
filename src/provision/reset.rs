//! Environment reset
//!
//! Removes leftovers of a previous run. Absent paths are skipped, so resetting
//! twice in a row is a no-op the second time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, ProvisionResult};

use super::layout::Layout;

/// Which artifact a removed path was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SampleData,
    Installation,
    Session,
}

impl Artifact {
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::SampleData => "sample data",
            Artifact::Installation => "previous installation",
            Artifact::Session => "previous session file",
        }
    }
}

/// A path that existed and was removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub artifact: Artifact,
    pub path: PathBuf,
}

/// Remove sample data, the previous installation and its session file.
pub fn reset_environment(layout: &Layout) -> ProvisionResult<Vec<Removed>> {
    let targets = [
        (Artifact::SampleData, &layout.sample_data_dir),
        (Artifact::Installation, &layout.install_dir),
        (Artifact::Session, &layout.session_file),
    ];

    let mut removed = Vec::new();
    for (artifact, path) in targets {
        let existed = remove_path(path).map_err(|source| ProvisionError::Reset {
            path: path.clone(),
            source,
        })?;
        if existed {
            removed.push(Removed {
                artifact,
                path: path.clone(),
            });
        }
    }
    Ok(removed)
}

/// Remove a file or directory tree. Returns `false` if nothing was there.
pub fn remove_path(path: &Path) -> io::Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and atomically replacing the memory file.

use std::io::Write;
use std::path::Path;

use goliath_core::GoliathError;
use tracing::debug;

use crate::state::MemoryState;

/// Reads the memory file.
///
/// A missing file is an empty state. A file that exists but does not parse
/// is a [`GoliathError::StoreCorruption`]; it is never replaced by an empty
/// state.
pub fn load(path: &Path) -> Result<MemoryState, GoliathError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no memory file yet, starting empty");
            return Ok(MemoryState::default());
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes).map_err(|e| GoliathError::StoreCorruption {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Writes `state` to a temporary file next to `path`, flushes it to disk and
/// renames it over `path`.
pub fn persist(path: &Path, state: &MemoryState) -> Result<(), GoliathError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let json = serde_json::to_vec_pretty(state).map_err(|e| GoliathError::Storage {
        source: Box::new(e),
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| GoliathError::Storage {
        source: Box::new(e.error),
    })?;

    debug!(
        path = %path.display(),
        turns = state.history.len(),
        facts = state.facts.len(),
        "memory persisted"
    );
    Ok(())
}

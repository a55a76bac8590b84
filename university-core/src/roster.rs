//! Roster files: YAML documents used to seed a registry at startup and to
//! export its contents.
//!
//! ```text
//! students:    [ {id, first_names, last_names, program}, ... ]
//! courses:     [ {code, title, instructor}, ... ]
//! enrollments: [ {student_id, course_code}, ... ]
//! ```

use std::path::Path;

use crate::error::RegistryError;
use crate::types::Roster;

/// Load a roster from `path`.
///
/// Returns `RegistryError::RosterNotFound` if absent,
/// `RegistryError::Parse` (with path + line context) if malformed YAML.
pub fn load_roster_at(path: &Path) -> Result<Roster, RegistryError> {
    if !path.exists() {
        return Err(RegistryError::RosterNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| RegistryError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically save a roster to `path`.
///
/// Write flow: serialize → `<name>.tmp` sibling → `rename`. The `.tmp` file
/// sits next to the target so the rename never crosses filesystems.
pub fn save_roster_at(path: &Path, roster: &Roster) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| RegistryError::Internal(format!("not a file path: {}", path.display())))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let yaml = serde_yaml::to_string(roster)?;
    std::fs::write(&tmp_path, yaml)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

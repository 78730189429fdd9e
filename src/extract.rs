use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    error::{LevelError, Result},
    level::{Level, RawResource},
};

/// Writes every retained resource of `level` below `out_dir`, creating directories as needed.
///
/// Returns the paths written, in the order the resources appear in the level. Resource names may
/// use either `/` or `\` as separators. Empty, `.` and `..` components are dropped so nothing is
/// written outside `out_dir`.
///
/// # Errors
/// [`LevelError::Write`] when a directory can't be created or a file can't be written
pub fn write_resources(level: &Level, out_dir: &Path) -> Result<Vec<PathBuf>> {
    if level.resources.is_empty() {
        warn!(
            "level \"{}\" has no retained resources to write (decoded without retain_payloads?)",
            level.name
        );
    }

    level
        .resources
        .iter()
        .map(|resource| write_resource(resource, out_dir))
        .collect()
}

pub fn write_resource(resource: &RawResource, out_dir: &Path) -> Result<PathBuf> {
    let path = resource_path(out_dir, &resource.file_name());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| LevelError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&path, &resource.data).map_err(|source| LevelError::Write {
        path: path.clone(),
        source,
    })?;

    debug!("wrote {} ({} bytes)", path.display(), resource.data.len());

    Ok(path)
}

/// Joins a resource file name onto `out_dir`.
pub fn resource_path(out_dir: &Path, file_name: &str) -> PathBuf {
    file_name
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .fold(out_dir.to_path_buf(), |path, part| path.join(part))
}

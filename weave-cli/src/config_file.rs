//! Locating the configuration file.

use std::path::{Path, PathBuf};

use weave::{CONFIG_FILE_NAME, Error};

/// Returns `explicit` when given, otherwise the first `weave-config.json` found in `dir`
/// or its parent.
///
/// An explicit path that does not exist is an error; it is never replaced by a discovered
/// one.
pub fn find_config(explicit: Option<&Path>, dir: &Path) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::ConfigNotFound(path.to_path_buf()))
        };
    }

    let candidates = [Some(dir), dir.parent()];
    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::ConfigNotFound(PathBuf::from(CONFIG_FILE_NAME)))
}

//! PersistenceGate: reading and overwriting the config file.
//!
//! The file is both config source and config sink: the resolved mapping is
//! written back to the same path it was read from, so client code loading
//! that file sees the merged result. The write-back overwrites in place with
//! no temp-file/rename step, matching the original tool — a crash mid-write
//! can corrupt the file. Known limitation, kept as-is.

use std::path::Path;

use crate::error::EnvServeError;

/// Read the config file, checking existence first so a missing file is a
/// clean diagnostic rather than a low-level I/O failure.
pub fn load_raw(path: &Path) -> Result<String, EnvServeError> {
    if !path.exists() {
        return Err(EnvServeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| EnvServeError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Overwrite the config file in place with the resolved contents.
pub fn write_back(path: &Path, contents: &str) -> Result<(), EnvServeError> {
    std::fs::write(path, contents).map_err(|e| EnvServeError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

//! Filesystem access via `cap-std`.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::error::{HelloVerifierError, Result};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn file_name(path: &Utf8Path) -> std::io::Result<&str> {
    path.file_name()
        .ok_or_else(|| std::io::Error::other("cannot determine file name for path"))
}

/// Reads `path`, replacing invalid UTF-8 sequences with U+FFFD.
pub(crate) fn read_text_lossy(path: &Utf8Path) -> Result<String> {
    let read = || -> std::io::Result<Vec<u8>> {
        let name = file_name(path)?;
        let dir = Dir::open_ambient_dir(parent_or_dot(path), ambient_authority())?;
        dir.read(name)
    };
    let bytes = read().map_err(|err| HelloVerifierError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes `contents` to `path`, creating missing parent directories.
pub(crate) fn write_creating_parents(path: &Utf8Path, contents: &[u8]) -> Result<()> {
    let write = || -> std::io::Result<()> {
        let name = file_name(path)?;
        let parent = parent_or_dot(path);
        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        dir.write(name, contents)
    };
    write().map_err(|err| HelloVerifierError::io(path, err))
}

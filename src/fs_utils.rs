//! Capability-scoped file helpers shared by the canonical store and client
//! adapters.
//!
//! Every access opens the parent directory as a `cap_std` handle and then
//! works relative to it, so a path can only ever touch its own directory.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;

pub(crate) fn open_ambient_dir(path: &Utf8Path) -> io::Result<Dir> {
    Dir::open_ambient_dir(path, ambient_authority())
}

pub(crate) fn open_parent_dir(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("path '{path}' must include a file name")))?;
    let dir = open_ambient_dir(parent_or_current(path))?;
    Ok((dir, file_name))
}

/// Reads a file, returning `None` when it or its directory does not exist.
pub(crate) fn read_optional(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, file_name) = match open_parent_dir(path) {
        Ok(opened) => opened,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(file_name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Writes `contents`, creating the parent directory first.
pub(crate) fn write_creating_parent(path: &Utf8Path, contents: &str) -> io::Result<()> {
    Dir::create_ambient_dir_all(parent_or_current(path), ambient_authority())?;
    let (dir, file_name) = open_parent_dir(path)?;
    dir.write(file_name, contents)
}

/// Copies `from` to `to`; both parents must already exist.
pub(crate) fn copy_file(from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
    let (source_dir, source_name) = open_parent_dir(from)?;
    let (target_dir, target_name) = open_parent_dir(to)?;
    source_dir.copy(source_name, &target_dir, target_name)?;
    Ok(())
}

/// Returns whether `path` exists; permission errors are surfaced.
pub(crate) fn exists(path: &Utf8Path) -> io::Result<bool> {
    path.try_exists()
}

fn parent_or_current(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

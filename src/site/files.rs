//! Site file enumeration
//!
//! Walks a site root and returns every regular file beneath it, keyed by
//! its path relative to the root. The relative path becomes the object key,
//! so it always uses `/` separators.
//!
//! Per-entry I/O failures are fail-fast: the first entry that cannot be
//! read or stat'ed aborts the walk with [`WebsiteError::Io`] naming it.

use crate::error::{Result, WebsiteError};
use crate::logger;
use crate::site::mime;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// A file discovered under the site root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteFile {
    /// Canonical root joined with the relative path
    pub absolute_path: PathBuf,
    /// Path relative to the root, `/`-separated, no leading separator
    pub relative_path: String,
    /// Content-Type resolved from `relative_path`
    pub content_type: String,
}

impl SiteFile {
    /// Build a `SiteFile` for `path`, which must lie beneath `root`
    pub fn from_root(root: &Path, path: PathBuf) -> Result<Self> {
        let relative_path = relative_key(root, &path)?;
        let content_type = mime::resolve_content_type(&relative_path).to_string();
        Ok(Self {
            absolute_path: path,
            relative_path,
            content_type,
        })
    }
}

/// Enumerate every regular file beneath `root`
///
/// The result is sorted by relative path. An empty directory yields an
/// empty vector. Symlinks resolving to regular files are included;
/// symlinked directories are not descended.
pub fn enumerate(root: impl AsRef<Path>) -> Result<Vec<SiteFile>> {
    let root = root.as_ref();

    let root_abs = match fs::canonicalize(root) {
        Ok(p) => p,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(WebsiteError::NotFound {
                path: root.to_path_buf(),
            });
        }
        Err(e) => return Err(WebsiteError::io(root, e)),
    };

    if !root_abs.is_dir() {
        return Err(WebsiteError::invalid(format!(
            "site root '{}' is not a directory",
            root.display()
        )));
    }

    let mut files = Vec::new();
    walk(&root_abs, &root_abs, &mut files)?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok(files)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<SiteFile>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| WebsiteError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| WebsiteError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| WebsiteError::io(&path, e))?;

        if file_type.is_dir() {
            walk(root, &path, out)?;
        } else if file_type.is_file() {
            out.push(SiteFile::from_root(root, path)?);
        } else if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => out.push(SiteFile::from_root(root, path)?),
                Ok(_) => logger::log_skipped_entry(&path, "symlink to non-file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    logger::log_skipped_entry(&path, "dangling symlink");
                }
                Err(e) if is_symlink_loop(&e) => {
                    logger::log_skipped_entry(&path, "symlink loop");
                }
                Err(e) => return Err(WebsiteError::io(&path, e)),
            }
        } else {
            logger::log_skipped_entry(&path, "not a regular file");
        }
    }

    Ok(())
}

/// ELOOP: the link chain never reaches a target
#[cfg(any(target_os = "linux", target_os = "android"))]
const ELOOP: Option<i32> = Some(40);
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
const ELOOP: Option<i32> = Some(62);
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
const ELOOP: Option<i32> = None;

fn is_symlink_loop(err: &io::Error) -> bool {
    ELOOP.is_some() && err.raw_os_error() == ELOOP
}

/// Strip `root` and exactly one separator, join the rest with `/`
fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        WebsiteError::invalid(format!(
            "'{}' is not under '{}'",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    WebsiteError::invalid(format!(
                        "file name is not valid UTF-8: '{}'",
                        path.display()
                    ))
                })?;
                parts.push(name);
            }
            Component::CurDir => {}
            _ => {
                return Err(WebsiteError::invalid(format!(
                    "unexpected path component in '{}'",
                    rel.display()
                )));
            }
        }
    }

    if parts.is_empty() {
        return Err(WebsiteError::invalid(format!(
            "'{}' is the site root, not a file",
            path.display()
        )));
    }

    Ok(parts.join("/"))
}

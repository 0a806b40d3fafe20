//! Path types used by ncsync.
//! [RelativePath] is the key used to compare local and remote entries,
//! where as camino is used for the file system.
use std::borrow;
use std::fmt;

use camino::Utf8Component;
use serde::{Deserialize, Serialize};

use crate::error::PathError;

pub type FsPath = camino::Utf8Path;
pub type FsPathBuf = camino::Utf8PathBuf;

pub const SEPARATOR: char = '/';
pub const SEPARATOR_STR: &str = "/";

/// A path relative to the synchronization root.
///
/// Components are always separated by `/`. A directory path ends with
/// exactly one `/` and a file path never does, whether the path comes from
/// the local file system or from the remote listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// Build a relative path from a `/` separated string.
    /// Leading and trailing separators of `path` are dropped before the
    /// directory marker is applied.
    pub fn new(path: &str, is_dir: bool) -> RelativePath {
        let path = path.trim_matches(SEPARATOR);
        let mut inner = String::with_capacity(path.len() + 1);
        inner.push_str(path);
        if is_dir {
            inner.push(SEPARATOR);
        }
        RelativePath(inner)
    }

    /// Build the relative path of `path` within `root`.
    /// `path` must be below `root` and must not be `root` itself.
    pub fn from_fs(root: &FsPath, path: &FsPath, is_dir: bool) -> Result<RelativePath, PathError> {
        let rel = path
            .strip_prefix(root)
            .map_err(|_| PathError::Outside(path.to_owned(), root.to_owned()))?;

        let mut comps = Vec::new();
        for comp in rel.components() {
            match comp {
                Utf8Component::Normal(name) => comps.push(name),
                Utf8Component::CurDir => (),
                _ => return Err(PathError::Illegal(path.to_owned(), None)),
            }
        }
        if comps.is_empty() {
            return Err(PathError::Illegal(
                path.to_owned(),
                Some("Expected a path below the root".to_string()),
            ));
        }
        Ok(RelativePath::new(&comps.join(SEPARATOR_STR), is_dir))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_dir(&self) -> bool {
        self.0.ends_with(SEPARATOR)
    }

    /// The path without its directory marker.
    pub fn without_marker(&self) -> &str {
        self.0.strip_suffix(SEPARATOR).unwrap_or(&self.0)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl borrow::Borrow<str> for RelativePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RelativePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RelativePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Strip trailing separators from a user supplied root directory.
/// The file system root itself is kept as is.
pub fn trim_root(dir: &str) -> &str {
    let trimmed = dir.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && !dir.is_empty() {
        SEPARATOR_STR
    } else {
        trimmed
    }
}

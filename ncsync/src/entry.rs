use serde::{Deserialize, Serialize};

use crate::path::{FsPathBuf, RelativePath};

/// Account information as returned by the host, key order preserved.
pub type Info = serde_json::Map<String, serde_json::Value>;

/// An entry of the remote listing.
/// Other fields sent by the host (size, dates, hashes) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub path: String,
    pub is_directory: bool,
}

impl RemoteEntry {
    pub fn file(path: &str) -> Self {
        RemoteEntry {
            path: path.to_string(),
            is_directory: false,
        }
    }

    pub fn directory(path: &str) -> Self {
        RemoteEntry {
            path: path.to_string(),
            is_directory: true,
        }
    }

    pub fn relative_path(&self) -> RelativePath {
        RelativePath::new(&self.path, self.is_directory)
    }
}

/// A local file to be uploaded under `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub name: RelativePath,
    pub source: FsPathBuf,
}

/// What a push did on the remote side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    pub uploaded: Vec<RelativePath>,
    pub deleted: Vec<RelativePath>,
}

use futures::Future;
use ncsync::{path::RelativePath, Info, RemoteEntry, UploadEntry};

pub mod fs;
pub mod neocities;

pub trait List {
    /// Every entry currently stored on the remote host.
    fn list(&self) -> impl Future<Output = ncsync::Result<Vec<RemoteEntry>>> + Send;
}

pub trait Upload {
    /// Uploads the whole batch as one logical call.
    fn upload(&self, entries: &[UploadEntry]) -> impl Future<Output = ncsync::Result<()>> + Send;
}

/// A trait to delete remote files or folders
pub trait Delete {
    /// Deletes exactly the given paths.
    /// Must not be called with an empty slice.
    fn delete(&self, paths: &[RelativePath]) -> impl Future<Output = ncsync::Result<()>> + Send;
}

pub trait AccountInfo {
    fn info(&self) -> impl Future<Output = ncsync::Result<Info>> + Send;
}

/// A trait for a remote directory.
/// Implementors surface every failure as [ncsync::Error::Api].
pub trait RemoteDir: List + Upload + Delete + AccountInfo + Send + Sync + 'static {}

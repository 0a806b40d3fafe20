use std::collections::HashSet;

use futures::channel::oneshot;
use ncsync::{
    config::PatternList,
    config_error, other_error,
    path::{self, FsPath, RelativePath},
    Info, PushReport, UploadEntry,
};

use crate::storage::{self, fs::FileSystem};

/// Mirrors a local directory to a [storage::RemoteDir].
#[derive(Debug)]
pub struct Synchronizer<R> {
    remote: R,
    ignore: PatternList,
}

impl<R> Synchronizer<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            ignore: PatternList::default(),
        }
    }

    /// Local entries matching `ignore` are neither uploaded nor kept
    /// on the remote side.
    pub fn with_ignore(self, ignore: PatternList) -> Self {
        Self { ignore, ..self }
    }
}

impl<R> Synchronizer<R>
where
    R: storage::RemoteDir,
{
    /// Make the remote directory mirror `local_dir`.
    ///
    /// Every local file is uploaded, and every remote entry that has no
    /// local counterpart is deleted. The remote listing is fetched while
    /// the local tree is walked, and the upload starts as soon as the
    /// walk is done. The delete call, if any, runs alongside the upload.
    ///
    /// Nothing is rolled back if one of the calls fails.
    pub async fn push(&self, local_dir: Option<&FsPath>) -> ncsync::Result<PushReport> {
        let local_dir = local_dir
            .ok_or_else(|| config_error!("You must pass a directory to be synchronized."))?;
        let local_dir = FsPath::new(path::trim_root(local_dir.as_str()));
        let local = FileSystem::open(local_dir, self.ignore.clone()).await?;

        log::info!("Pushing {}", local.root());

        let (local_tx, local_rx) = oneshot::channel::<HashSet<RelativePath>>();

        let upload = async {
            let entries = local.entries().await?;
            let batch: Vec<UploadEntry> = entries
                .iter()
                .filter(|entry| entry.is_file())
                .map(|entry| UploadEntry {
                    name: entry.path.clone(),
                    source: entry.fs_path.clone(),
                })
                .collect();
            let local_paths: HashSet<RelativePath> =
                entries.into_iter().map(|entry| entry.path).collect();
            // the receiver is only gone if the listing already failed
            let _ = local_tx.send(local_paths);

            log::debug!("uploading {} files", batch.len());
            self.remote.upload(&batch).await?;
            let uploaded: Vec<RelativePath> = batch.into_iter().map(|entry| entry.name).collect();
            Ok::<_, ncsync::Error>(uploaded)
        };

        let delete = async {
            let remotes = self.remote.list().await?;
            let local_paths = local_rx
                .await
                .map_err(|_| other_error!("local walk ended without result"))?;

            let diff = remote_only(remotes.iter().map(|e| e.relative_path()), &local_paths);
            if diff.is_empty() {
                log::debug!("nothing to delete");
            } else {
                log::debug!("deleting {} remote entries", diff.len());
                self.remote.delete(&diff).await?;
            }
            Ok::<_, ncsync::Error>(diff)
        };

        let (uploaded, deleted) = tokio::try_join!(upload, delete)?;

        log::info!(
            "Pushed {local_dir}: {} uploaded, {} deleted",
            uploaded.len(),
            deleted.len()
        );
        Ok(PushReport { uploaded, deleted })
    }

    /// Remote paths in the order of the listing,
    /// with a trailing separator for directories.
    pub async fn list(&self) -> ncsync::Result<Vec<String>> {
        let entries = self.remote.list().await?;
        Ok(entries
            .iter()
            .map(|entry| entry.relative_path().into_string())
            .collect())
    }

    pub async fn status(&self) -> ncsync::Result<Info> {
        self.remote.info().await
    }
}

/// Paths of `remotes` absent from `locals`, in the order of `remotes`.
pub fn remote_only<I>(remotes: I, locals: &HashSet<RelativePath>) -> Vec<RelativePath>
where
    I: IntoIterator<Item = RelativePath>,
{
    remotes
        .into_iter()
        .filter(|path| !locals.contains(path))
        .collect()
}

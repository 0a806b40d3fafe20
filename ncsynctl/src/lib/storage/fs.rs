use async_stream::try_stream;
use futures::{Stream, TryStreamExt};
use ncsync::{
    config::PatternList,
    io_error,
    path::{FsPath, FsPathBuf, RelativePath},
};
use tokio::fs;

/// An entry found under the synchronization root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub path: RelativePath,
    pub fs_path: FsPathBuf,
}

impl LocalEntry {
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    pub fn is_file(&self) -> bool {
        !self.path.is_dir()
    }
}

#[derive(Debug, Clone)]
pub struct FileSystem {
    root: FsPathBuf,
    ignore: PatternList,
}

impl FileSystem {
    /// Open the local tree rooted at `root`.
    /// Fails with a file system error if `root` can't be accessed,
    /// and with [ncsync::Error::NotADirectory] if it is not a directory.
    pub async fn open(root: &FsPath, ignore: PatternList) -> ncsync::Result<Self> {
        let metadata = fs::metadata(root)
            .await
            .map_err(|err| io_error!("Can't access '{root}': {err}"))?;
        if !metadata.is_dir() {
            return Err(ncsync::Error::NotADirectory(root.to_owned()));
        }
        log::debug!("Opened local tree in {root}");
        Ok(FileSystem {
            root: root.to_owned(),
            ignore,
        })
    }

    pub fn root(&self) -> &FsPath {
        &self.root
    }

    /// Recursively enumerate every file and directory below the root.
    ///
    /// Symlinks are classified by their target. Symlinked directories are
    /// reported but not descended into, and broken symlinks are skipped.
    /// Hidden entries (name starting with `.`) and ignored entries are
    /// skipped together with their content.
    pub fn walk(&self) -> impl Stream<Item = ncsync::Result<LocalEntry>> + Send {
        let root = self.root.clone();
        let ignore = self.ignore.clone();

        try_stream! {
            let mut dirs = vec![root.clone()];
            while let Some(dir) = dirs.pop() {
                log::trace!("listing entries of {dir}");
                let mut read_dir = fs::read_dir(&dir).await?;
                while let Some(direntry) = read_dir.next_entry().await? {
                    let fs_path = FsPathBuf::try_from(direntry.path())?;
                    if is_hidden(&fs_path) {
                        log::debug!("skipping hidden entry {fs_path}");
                        continue;
                    }
                    let file_type = direntry.file_type().await?;

                    let metadata = fs::metadata(&fs_path).await;
                    if let Err(err) = &metadata {
                        if file_type.is_symlink() {
                            log::warn!("skipping broken symlink {fs_path}: {err}");
                            continue;
                        }
                    }
                    let metadata = metadata?;
                    if !metadata.is_dir() && !metadata.is_file() {
                        log::debug!("skipping special file {fs_path}");
                        continue;
                    }

                    let path = RelativePath::from_fs(&root, &fs_path, metadata.is_dir())?;
                    if ignore.matches(&path) {
                        log::debug!("ignoring {path}");
                        continue;
                    }
                    if metadata.is_dir() && !file_type.is_symlink() {
                        dirs.push(fs_path.clone());
                    }
                    yield LocalEntry { path, fs_path };
                }
            }
        }
    }

    pub async fn entries(&self) -> ncsync::Result<Vec<LocalEntry>> {
        self.walk().try_collect().await
    }
}

fn is_hidden(path: &FsPath) -> bool {
    path.file_name().is_some_and(|name| name.starts_with('.'))
}

use ncsync::{path::FsPath, RemoteEntry};
use futures::future::BoxFuture;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Copy, Clone)]
pub enum Entry {
    Dir {
        /// Name of the directory
        name: &'static str,
        /// Entries of the directory
        entries: &'static [Entry],
    },
    File {
        /// Name of the file
        name: &'static str,
        /// Content of the file
        content: &'static str,
    },
}

/// Local side of the "a.txt / sub/b.txt" scenario
#[rustfmt::skip]
pub const SCENARIO_A: &[Entry] = &[
    Entry::File{name: "a.txt", content: "a"},
    Entry::Dir{name: "sub", entries: &[
        Entry::File{name: "b.txt", content: "b"},
    ]},
];

/// [SCENARIO_A] with hidden files and folders
#[rustfmt::skip]
pub const HIDDEN: &[Entry] = &[
    Entry::File{name: "a.txt", content: "a"},
    Entry::File{name: ".env", content: "TOKEN=secret"},
    Entry::Dir{name: ".git", entries: &[
        Entry::File{name: "HEAD", content: "ref: refs/heads/main"},
    ]},
    Entry::Dir{name: "sub", entries: &[
        Entry::File{name: "b.txt", content: "b"},
        Entry::File{name: ".b.txt.swp", content: "swap"},
    ]},
];

#[rustfmt::skip]
pub const SITE: &[Entry] = &[
    Entry::File{name: "index.html", content: "<h1>Hello</h1>"},
    Entry::File{name: "style.css", content: "h1 { color: red; }"},
    Entry::Dir{name: "img", entries: &[
        Entry::File{name: "cat.png", content: "not really a cat"},
        Entry::Dir{name: "icons", entries: &[
            Entry::File{name: "home.svg", content: "<svg/>"},
        ]},
    ]},
    Entry::Dir{name: "empty", entries: &[]},
    Entry::Dir{name: "drafts", entries: &[
        Entry::File{name: "next.html", content: "soon"},
    ]},
];

/// Files of [SITE], as relative paths
pub const SITE_FILES: &[&str] = &[
    "drafts/next.html",
    "img/cat.png",
    "img/icons/home.svg",
    "index.html",
    "style.css",
];

/// A remote listing matching [SITE] with a few extra entries
pub fn site_remote() -> Vec<RemoteEntry> {
    vec![
        RemoteEntry::file("index.html"),
        RemoteEntry::file("old.html"),
        RemoteEntry::directory("img"),
        RemoteEntry::file("img/cat.png"),
        RemoteEntry::file("img/dog.png"),
        RemoteEntry::directory("img/icons"),
        RemoteEntry::directory("empty"),
        RemoteEntry::directory("archive"),
        RemoteEntry::file("archive/2015.html"),
    ]
}

impl Entry {
    pub fn create_fs<'a>(&'a self, path: &'a FsPath) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            match self {
                Entry::Dir { name, entries } => {
                    let path = path.join(name);
                    tokio::fs::create_dir(&path).await.unwrap();
                    for entry in entries.iter() {
                        entry.create_fs(&path).await;
                    }
                }
                Entry::File { name, content } => {
                    let path = path.join(name);
                    let mut f = tokio::fs::File::create(&path).await.unwrap();
                    f.write_all(content.as_bytes()).await.unwrap();
                }
            }
        })
    }
}

pub trait CreateFs {
    async fn create_fs(&self, root: &FsPath);
}

impl CreateFs for &[Entry] {
    async fn create_fs(&self, root: &FsPath) {
        for entry in self.iter() {
            entry.create_fs(root).await;
        }
    }
}

// ABOUTME: Page retrieval seam used by the scrapers
// ABOUTME: Fetch trait with on-disk snapshot and in-memory implementations

use crate::{Result, ScrapeError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Something that returns the body of a page given its url
pub trait Fetch {
    fn get(&self, url: &str) -> Result<String>;
}

/// Serves pages saved under a snapshot directory
///
/// Each url maps to one file, see [`SnapshotFetcher::path_for`].
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    root: PathBuf,
}

impl SnapshotFetcher {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// File name a url is stored under: scheme dropped, the rest
    /// percent-encoded, `.html` appended. Distinct urls get distinct names.
    pub fn file_name(url: &str) -> String {
        let bare = url.split_once("://").map_or(url, |(_, rest)| rest);
        format!("{}.html", urlencoding::encode(bare))
    }

    /// Full path a url is stored under
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(Self::file_name(url))
    }
}

impl Fetch for SnapshotFetcher {
    fn get(&self, url: &str) -> Result<String> {
        let path = self.path_for(url);
        tracing::debug!(url, path = %path.display(), "reading snapshot");
        std::fs::read_to_string(&path).map_err(|e| {
            ScrapeError::Fetch(format!("{url} (snapshot {}): {e}", path.display()))
        })
    }
}

/// Serves pages from memory
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `body` as the page at `url`
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

impl Fetch for MemoryFetcher {
    fn get(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Fetch(format!("no page for {url}")))
    }
}

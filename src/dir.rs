//! Directory Enumerator.
//!
//! [`DirLister`] walks a directory page by page. It keeps the last page the
//! server returned and continues from the cookie of that page's last entry,
//! passing the page's cookie verifier back. Only forward continuation is
//! possible; [`DirLister::restart`] drops the retained page so the next call
//! starts from cookie 0 again.

use tracing::{debug, warn};

use crate::attr::Attributes;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;
use crate::remote::{DirEntry, DirPage, RemoteFs, COOKIEVERF_SIZE};
use crate::session::Session;

/// Entries of one page and whether the server has more.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub entries: Vec<DirEntry>,
    pub more: bool,
}

/// What the attributed listing learns about one entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryDetails {
    pub handle: FileHandle,
    pub attributes: Attributes,
    /// Target text when the entry is a symbolic link.
    pub link_target: Option<String>,
}

#[derive(Debug)]
pub struct DetailedEntry {
    pub entry: DirEntry,
    /// Lookups are per entry; one failing does not spoil the page.
    pub details: Result<EntryDetails>,
}

#[derive(Debug)]
pub struct DetailedListing {
    pub entries: Vec<DetailedEntry>,
    pub more: bool,
}

#[derive(Debug)]
pub struct DirLister {
    dir: FileHandle,
    count: u32,
    page: Option<DirPage>,
    finished: bool,
}

impl DirLister {
    /// Lister for `dir` asking for `count` bytes per page.
    pub fn new(dir: FileHandle, count: u32) -> Self {
        DirLister { dir, count, page: None, finished: false }
    }

    pub fn dir(&self) -> &FileHandle {
        &self.dir
    }

    /// The server signalled the end of the listing.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forgets the retained page; the next page is the first one.
    pub fn restart(&mut self) {
        self.page = None;
        self.finished = false;
    }

    /// Fetches the page after the retained one. Once the listing is finished
    /// this returns no entries without calling the server.
    pub async fn next_page<R: RemoteFs + ?Sized>(&mut self, remote: &mut R) -> Result<Listing> {
        if self.finished {
            return Ok(Listing::default());
        }
        let (cookie, cookieverf) = match &self.page {
            Some(page) => (page.entries.last().map_or(0, |entry| entry.cookie), page.cookieverf),
            None => (0, [0; COOKIEVERF_SIZE]),
        };
        let page = remote.readdir(&self.dir, cookie, cookieverf, self.count).await?;
        debug!("readdir cookie:{} -> {} entries eof:{}", cookie, page.entries.len(), page.eof);

        self.finished = page.eof;
        if page.entries.is_empty() && !page.eof {
            warn!("Server returned an empty directory page without eof after cookie {}", cookie);
            self.finished = true;
        }
        let listing = Listing { entries: page.entries.clone(), more: !self.finished };
        self.page = Some(page);
        Ok(listing)
    }

    /// Like [`next_page`](DirLister::next_page), then looks every entry up,
    /// reading the target of symbolic links.
    pub async fn next_page_detailed<R: RemoteFs + ?Sized>(
        &mut self,
        remote: &mut R,
    ) -> Result<DetailedListing> {
        let listing = self.next_page(remote).await?;
        let mut entries = Vec::with_capacity(listing.entries.len());
        for entry in listing.entries {
            let details = entry_details(remote, &self.dir, &entry.name).await;
            entries.push(DetailedEntry { entry, details });
        }
        Ok(DetailedListing { entries, more: listing.more })
    }
}

async fn entry_details<R: RemoteFs + ?Sized>(
    remote: &mut R,
    dir: &FileHandle,
    name: &str,
) -> Result<EntryDetails> {
    let (handle, attributes) = remote.lookup(dir, name).await?;
    let attributes = match attributes {
        Some(attributes) => attributes,
        None => remote.getattr(&handle).await?,
    };
    let link_target =
        if attributes.is_symlink() { Some(remote.readlink(&handle).await?) } else { None };
    Ok(EntryDetails { handle, attributes, link_target })
}

impl<R: RemoteFs> Session<R> {
    /// Starts listing `path` (symbolic links followed), or the current
    /// directory when no path is given.
    pub async fn list_dir(&mut self, path: Option<&str>) -> Result<DirLister> {
        let dir = match path {
            Some(path) => {
                let resolved = self.resolve(path, true).await?;
                if !resolved.attributes.is_dir() {
                    return Err(NfsError::NotDirectory(path.to_string()));
                }
                resolved.handle
            }
            None => self.handle()?.clone(),
        };
        Ok(DirLister::new(dir, self.config.readdir_count))
    }

    pub async fn next_page(&mut self, lister: &mut DirLister) -> Result<Listing> {
        lister.next_page(&mut self.remote).await
    }

    pub async fn next_page_detailed(&mut self, lister: &mut DirLister) -> Result<DetailedListing> {
        lister.next_page_detailed(&mut self.remote).await
    }

    /// Every entry of the directory, following pages until the last one.
    pub async fn list_all(&mut self, path: Option<&str>) -> Result<Vec<DirEntry>> {
        let mut lister = self.list_dir(path).await?;
        let mut entries = Vec::new();
        loop {
            let listing = self.next_page(&mut lister).await?;
            entries.extend(listing.entries);
            if !listing.more {
                return Ok(entries);
            }
        }
    }
}

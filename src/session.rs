//! Client session state.
//!
//! A [`Session`] owns the configuration, the remote filesystem client, the
//! current working handle and the mount state. Everything a command changes
//! lives here; the resolution, listing, transfer and mutation operations are
//! implemented on it in their own modules.

use tracing::{info, warn};

use crate::attr::Attributes;
use crate::config::ClientConfig;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;
use crate::protocol::nfs::Nfs3Client;
use crate::remote::{Export, FsStat, RemoteFs};

/// Export mounted by the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountPoint {
    /// Export path as passed to MNT, needed again by UMNT.
    pub path: String,
    /// Handle of the export root; absolute paths start here.
    pub root: FileHandle,
}

pub struct Session<R: RemoteFs = Nfs3Client> {
    pub(crate) config: ClientConfig,
    pub(crate) remote: R,
    pub(crate) cwd: Option<FileHandle>,
    pub(crate) mount: Option<MountPoint>,
}

impl Session<Nfs3Client> {
    /// Session talking NFSv3 to `config.host`.
    pub fn new(config: ClientConfig) -> Self {
        let remote = Nfs3Client::new(config.clone());
        Session::with_remote(config, remote)
    }
}

impl<R: RemoteFs> Session<R> {
    pub fn with_remote(config: ClientConfig, remote: R) -> Self {
        Session { config, remote, cwd: None, mount: None }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn mount_point(&self) -> Option<&MountPoint> {
        self.mount.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Applies `set <key> <value>` and hands the new parameters to the remote.
    /// Switching hosts also forgets the mount, whose handles belong to the
    /// old server.
    pub async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut config = self.config.clone();
        config.set(key, value)?;
        if config.host != self.config.host {
            self.cwd = None;
            self.mount = None;
        }
        self.config = config;
        self.remote.configure(&self.config).await
    }

    pub async fn set_host(&mut self, host: &str) -> Result<()> {
        self.set("host", host).await
    }

    pub async fn exports(&mut self) -> Result<Vec<Export>> {
        self.remote.exports().await
    }

    /// Mounts `path`; its root becomes both the mount root and the current
    /// working handle. A previous mount is released first.
    pub async fn mount(&mut self, path: &str) -> Result<&MountPoint> {
        if self.mount.is_some() {
            self.umount().await;
        }
        let root = self.remote.mount(path).await?;
        info!("Mounted {} ({} byte handle)", path, root.len());
        let mut cwd = FileHandle::default();
        cwd.copy_from(&root);
        self.cwd = Some(cwd);
        Ok(&*self.mount.insert(MountPoint { path: path.to_string(), root }))
    }

    /// Sends UMNT for the mounted export, closes both connections and clears
    /// the mount state. An UMNT failure is logged and does not stop the
    /// teardown. Unmounting twice is harmless.
    pub async fn umount(&mut self) {
        if let Some(mount) = self.mount.take() {
            match self.remote.umount(&mount.path).await {
                Ok(()) => info!("Unmounted {}", mount.path),
                Err(e) => warn!("umount {}: {}", mount.path, e),
            }
        }
        self.remote.disconnect().await;
        if let Some(mut cwd) = self.cwd.take() {
            cwd.release();
        }
    }

    /// Current working handle.
    pub fn handle(&self) -> Result<&FileHandle> {
        self.cwd.as_ref().ok_or(NfsError::HandleNotSet)
    }

    /// Replaces the current working handle, mounted or not.
    pub fn set_handle(&mut self, handle: FileHandle) {
        self.cwd = Some(handle);
    }

    /// Changes directory. Without a path the mount root is selected again.
    pub async fn cd(&mut self, path: Option<&str>) -> Result<&FileHandle> {
        let handle = match path {
            None => self.mount.as_ref().map(|m| m.root.clone()).ok_or(NfsError::HandleNotSet)?,
            Some(path) => {
                let resolved = self.resolve(path, true).await?;
                if !resolved.attributes.is_dir() {
                    return Err(NfsError::NotDirectory(path.to_string()));
                }
                resolved.handle
            }
        };
        Ok(&*self.cwd.insert(handle))
    }

    /// Attributes of `path` itself; a final symbolic link is not followed.
    pub async fn stat(&mut self, path: &str) -> Result<Attributes> {
        Ok(self.resolve(path, false).await?.attributes)
    }

    /// File system figures for `path`, or for the current directory.
    pub async fn fsstat(&mut self, path: Option<&str>) -> Result<FsStat> {
        let handle = match path {
            Some(path) => self.resolve(path, true).await?.handle,
            None => self.handle()?.clone(),
        };
        self.remote.fsstat(&handle).await
    }

    /// Drops the mount state and closes the connections.
    pub async fn close(mut self) {
        self.umount().await;
    }
}

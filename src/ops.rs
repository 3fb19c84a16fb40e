//! Mutation Operations.
//!
//! Every operation splits its path operand into the parent directory and the
//! leaf name, resolves the parent without following a final symbolic link,
//! and issues one call on the parent handle.

use crate::attr::SetAttributes;
use crate::config::parse_mode;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;
use crate::path;
use crate::remote::{NodeKind, RemoteFs};
use crate::session::Session;

/// Parses `uid` or `uid:gid`.
pub fn parse_owner(owner: &str) -> Result<(u32, Option<u32>)> {
    let invalid = || NfsError::usage(format!("{}: invalid owner or group", owner));
    let number = |text: &str| text.parse::<u32>().map_err(|_| invalid());
    match owner.split_once(':') {
        Some((uid, gid)) => Ok((number(uid)?, Some(number(gid)?))),
        None => Ok((number(owner)?, None)),
    }
}

impl<R: RemoteFs> Session<R> {
    /// Attributes of objects created by this session.
    pub fn new_object_attributes(&self) -> SetAttributes {
        SetAttributes::new_object(self.config.mode, self.config.uid, self.config.gid)
    }

    /// Handle of the directory `dir`, which must be a directory itself.
    async fn directory(&mut self, dir: &str) -> Result<FileHandle> {
        let resolved = self.resolve(dir, false).await?;
        if !resolved.attributes.is_dir() {
            return Err(NfsError::NotDirectory(dir.to_string()));
        }
        Ok(resolved.handle)
    }

    /// Parent handle and leaf name of `path`.
    async fn parent_of(&mut self, path: &str) -> Result<(FileHandle, String)> {
        let (dir, leaf) = path::split(path);
        let leaf = leaf.ok_or_else(|| NfsError::usage(format!("{}: missing file name", path)))?;
        let leaf = leaf.to_string();
        Ok((self.directory(dir).await?, leaf))
    }

    /// Creates the regular file `path` with the session's mode and owner.
    /// Fails if it already exists.
    pub async fn create(&mut self, path: &str) -> Result<()> {
        let attrs = self.new_object_attributes();
        self.create_with(path, &attrs).await
    }

    pub async fn create_with(&mut self, path: &str, attrs: &SetAttributes) -> Result<()> {
        let (dir, name) = self.parent_of(path).await?;
        self.remote.create(&dir, &name, attrs).await
    }

    pub async fn remove(&mut self, path: &str) -> Result<()> {
        let (dir, name) = self.parent_of(path).await?;
        self.remote.remove(&dir, &name).await
    }

    pub async fn mkdir(&mut self, path: &str) -> Result<()> {
        let attrs = self.new_object_attributes();
        let (dir, name) = self.parent_of(path).await?;
        self.remote.mkdir(&dir, &name, &attrs).await
    }

    pub async fn rmdir(&mut self, path: &str) -> Result<()> {
        let (dir, name) = self.parent_of(path).await?;
        self.remote.rmdir(&dir, &name).await
    }

    /// Moves `from` to `to`. When `to` names a directory with a trailing
    /// slash the entry keeps its name.
    pub async fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let (from_dir, from_name) = self.parent_of(from).await?;
        let (to_dir, to_name) = path::split(to);
        let to_name = to_name.unwrap_or(from_name.as_str()).to_string();
        let to_dir = self.directory(to_dir).await?;
        self.remote.rename(&from_dir, &from_name, &to_dir, &to_name).await
    }

    /// Creates the hard link `linkname` to the existing object `target`.
    pub async fn link(&mut self, target: &str, linkname: &str) -> Result<()> {
        let (dir, name) = self.parent_of(linkname).await?;
        let file = self.resolve(target, false).await?.handle;
        self.remote.link(&file, &dir, &name).await
    }

    /// Creates the symbolic link `linkname` holding the text `target`, which
    /// is not resolved.
    pub async fn symlink(&mut self, target: &str, linkname: &str) -> Result<()> {
        let attrs = self.new_object_attributes();
        let (dir, name) = self.parent_of(linkname).await?;
        self.remote.symlink(&dir, &name, target, &attrs).await
    }

    pub async fn mknod(&mut self, path: &str, kind: NodeKind) -> Result<()> {
        let attrs = self.new_object_attributes();
        let (dir, name) = self.parent_of(path).await?;
        self.remote.mknod(&dir, &name, kind, &attrs).await
    }

    /// Applies `attrs` to `path` itself; a final symbolic link is not followed.
    pub async fn setattr(&mut self, path: &str, attrs: &SetAttributes) -> Result<()> {
        let handle = self.resolve(path, false).await?.handle;
        self.remote.setattr(&handle, attrs).await
    }

    /// Sets the permission bits of `path` from the octal text `mode`.
    pub async fn chmod(&mut self, path: &str, mode: &str) -> Result<()> {
        let mode = parse_mode(mode)?;
        let resolved = self.resolve(path, false).await?;
        let current = &resolved.attributes;
        let attrs = SetAttributes::default()
            .with_mode(mode & 0o777)
            .with_owner(current.uid, Some(current.gid))
            .keep_times();
        self.remote.setattr(&resolved.handle, &attrs).await
    }

    /// Changes the owner of `path`; `owner` is `uid` or `uid:gid`.
    pub async fn chown(&mut self, path: &str, owner: &str) -> Result<()> {
        let (uid, gid) = parse_owner(owner)?;
        let resolved = self.resolve(path, false).await?;
        let attrs = SetAttributes::default()
            .with_mode(resolved.attributes.mode & 0o7777)
            .with_owner(uid, gid)
            .keep_times();
        self.remote.setattr(&resolved.handle, &attrs).await
    }
}

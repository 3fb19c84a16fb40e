//! The remote filesystem capability.
//!
//! [`RemoteFs`] is the one seam between the engine and a protocol version.
//! Every method issues exactly one procedure call on the service it belongs
//! to, connecting first if that service is not connected yet. Handles go in by
//! reference and each implementation builds its call arguments from fresh
//! copies of them.
//!
//! [`crate::Nfs3Client`] implements it over NFSv3 and MOUNTv3.

use std::fmt;

use async_trait::async_trait;

use crate::attr::{Attributes, SetAttributes};
use crate::config::ClientConfig;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;

/// Size of the opaque directory cookie verifier.
pub const COOKIEVERF_SIZE: usize = 8;

/// Durability a write asks for and the server acknowledges.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Stability {
    Unstable,
    DataSync,
    #[default]
    FileSync,
}

/// An exported directory and the groups allowed to mount it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Export {
    pub dir: String,
    pub groups: Vec<String>,
}

/// `"<dir> <group>..."`, or `"<dir> everyone"` when unrestricted.
impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir)?;
        if self.groups.is_empty() {
            return write!(f, " everyone");
        }
        for group in &self.groups {
            write!(f, " {}", group)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// Continuation token naming the position right after this entry.
    pub cookie: u64,
    pub fileid: u64,
}

/// One READDIR reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirPage {
    pub entries: Vec<DirEntry>,
    /// The server has no entries after this page.
    pub eof: bool,
    pub cookieverf: [u8; COOKIEVERF_SIZE],
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadReply {
    pub data: Vec<u8>,
    pub eof: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteReply {
    /// Bytes the server accepted.
    pub count: u32,
    pub committed: Stability,
}

/// FSSTAT reply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FsStat {
    pub total_bytes: u64,
    pub free_bytes: u64,
    /// Free bytes available to the caller's credential.
    pub avail_bytes: u64,
    pub total_files: u64,
    pub free_files: u64,
    pub avail_files: u64,
    /// Seconds the figures stay valid.
    pub invarsec: u32,
}

/// Special file kinds MKNOD can create.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Socket,
    Fifo,
    BlockDevice { major: u32, minor: u32 },
    CharDevice { major: u32, minor: u32 },
}

impl NodeKind {
    /// Parses the shell form `s`, `p`, `b <major> <minor>` or `c <major> <minor>`.
    pub fn parse(kind: &str, major: Option<&str>, minor: Option<&str>) -> Result<NodeKind> {
        let device = |major: Option<&str>, minor: Option<&str>| -> Result<(u32, u32)> {
            match (major, minor) {
                (Some(major), Some(minor)) => Ok((parse_number(major)?, parse_number(minor)?)),
                _ => Err(NfsError::usage(format!("{}: major and minor numbers required", kind))),
            }
        };
        let no_device = |kind: NodeKind| match (major, minor) {
            (None, None) => Ok(kind),
            _ => Err(NfsError::usage(format!("{:?} takes no device numbers", kind))),
        };
        match kind {
            "s" => no_device(NodeKind::Socket),
            "p" => no_device(NodeKind::Fifo),
            "b" => device(major, minor)
                .map(|(major, minor)| NodeKind::BlockDevice { major, minor }),
            "c" => device(major, minor)
                .map(|(major, minor)| NodeKind::CharDevice { major, minor }),
            other => Err(NfsError::usage(format!("{}: unknown node type, use s, p, b or c", other))),
        }
    }
}

fn parse_number(text: &str) -> Result<u32> {
    text.parse::<u32>().map_err(|_| NfsError::usage(format!("{}: not a device number", text)))
}

/// Remote filesystem operations of one protocol version.
#[async_trait]
pub trait RemoteFs: Send {
    /// Takes new session parameters. A changed host drops live connections,
    /// a changed uid or gid replaces the credential of later calls.
    async fn configure(&mut self, config: &ClientConfig) -> Result<()>;

    /// The mount service's export list.
    async fn exports(&mut self) -> Result<Vec<Export>>;

    /// Mounts `path` and returns the export's root handle.
    async fn mount(&mut self, path: &str) -> Result<FileHandle>;

    async fn umount(&mut self, path: &str) -> Result<()>;

    /// Looks `name` up in `dir`; attributes are `None` when the server omitted them.
    async fn lookup(
        &mut self,
        dir: &FileHandle,
        name: &str,
    ) -> Result<(FileHandle, Option<Attributes>)>;

    async fn getattr(&mut self, fh: &FileHandle) -> Result<Attributes>;

    /// Target text of a symbolic link.
    async fn readlink(&mut self, fh: &FileHandle) -> Result<String>;

    /// One page of `dir` starting after `cookie`.
    async fn readdir(
        &mut self,
        dir: &FileHandle,
        cookie: u64,
        cookieverf: [u8; COOKIEVERF_SIZE],
        count: u32,
    ) -> Result<DirPage>;

    async fn read(&mut self, fh: &FileHandle, offset: u64, count: u32) -> Result<ReadReply>;

    async fn write(
        &mut self,
        fh: &FileHandle,
        offset: u64,
        data: &[u8],
        stable: Stability,
    ) -> Result<WriteReply>;

    /// Creates a regular file, failing if `name` exists.
    async fn create(&mut self, dir: &FileHandle, name: &str, attrs: &SetAttributes)
        -> Result<()>;

    async fn mkdir(&mut self, dir: &FileHandle, name: &str, attrs: &SetAttributes) -> Result<()>;

    async fn symlink(
        &mut self,
        dir: &FileHandle,
        name: &str,
        target: &str,
        attrs: &SetAttributes,
    ) -> Result<()>;

    async fn mknod(
        &mut self,
        dir: &FileHandle,
        name: &str,
        kind: NodeKind,
        attrs: &SetAttributes,
    ) -> Result<()>;

    async fn remove(&mut self, dir: &FileHandle, name: &str) -> Result<()>;

    async fn rmdir(&mut self, dir: &FileHandle, name: &str) -> Result<()>;

    async fn rename(
        &mut self,
        from_dir: &FileHandle,
        from_name: &str,
        to_dir: &FileHandle,
        to_name: &str,
    ) -> Result<()>;

    /// Adds the name `name` in `dir` for the existing object `file`.
    async fn link(&mut self, file: &FileHandle, dir: &FileHandle, name: &str) -> Result<()>;

    async fn setattr(&mut self, fh: &FileHandle, attrs: &SetAttributes) -> Result<()>;

    async fn fsstat(&mut self, fh: &FileHandle) -> Result<FsStat>;

    /// Closes every connection; closing what is already closed is a no-op.
    async fn disconnect(&mut self);
}

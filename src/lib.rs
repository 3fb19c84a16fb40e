//! NFS Shell - an interactive NFSv3 client engine in Rust
//!
//! This library talks the NFS version 3 and MOUNT version 3 protocols over
//! ONC-RPC/TCP, letting a program browse, transfer and change files on an NFS
//! export without a kernel mount.
//!
//! ## Main Components
//!
//! - `session`: [`Session`] holds the parameters, the current working handle
//!   and the mount state. Every operation is a method on it.
//!
//! - `resolve`: walks a textual path to a handle, one LOOKUP per component,
//!   dereferencing symbolic links under a bounded hop budget.
//!
//! - `dir`, `transfer`, `ops`: cookie-paginated directory listing,
//!   offset-addressed read and write, and the handle-based mutation procedures.
//!
//! - `remote`: the [`RemoteFs`] capability the engine calls into, implemented
//!   for NFSv3 by [`Nfs3Client`].
//!
//! - `transport`: opening RPC channels, portmapper discovery, privileged
//!   source ports and AUTH_UNIX credentials.
//!
//! - `protocol`: XDR encoding, RPC record marking and the typed call stubs
//!   for NFS, MOUNT and PORTMAP.
//!
//! ## Standards Compliance
//!
//! - RFC 1813: NFS Version 3 Protocol Specification
//! - RFC 5531: RPC: Remote Procedure Call Protocol Specification Version 2
//! - RFC 1832: XDR: External Data Representation Standard
//! - RFC 1833: Binding Protocols for ONC RPC Version 2
//!
//! ## Usage
//!
//! Build a [`Session`] from a [`ClientConfig`] naming the server, mount an
//! export, then resolve, list, read and write paths relative to it. No
//! connection is made until the first operation that needs one.

pub mod attr;
pub mod config;
pub mod dir;
pub mod error;
pub mod handle;
pub mod ops;
pub mod path;
pub mod protocol;
pub mod remote;
pub mod resolve;
pub mod session;
pub mod transfer;
pub mod transport;

pub use attr::{Attributes, FileType, SetAttributes, SetTime};
pub use config::ClientConfig;
pub use dir::{DetailedEntry, DetailedListing, DirLister, EntryDetails, Listing};
pub use error::{NfsError, Result};
pub use handle::FileHandle;
pub use protocol::nfs::Nfs3Client;
pub use protocol::xdr;
pub use remote::{
    DirEntry, DirPage, Export, FsStat, NodeKind, ReadReply, RemoteFs, Stability, WriteReply,
};
pub use resolve::{Resolved, MAX_PATH_DEPTH};
pub use session::{MountPoint, Session};

//! NFS client protocol module.
//!
//! Typed calls of the three RPC programs an NFS client talks to:
//!
//! - `portmap`: The PORTMAP protocol (also known as RPCBIND), used to find
//!   the TCP ports the MOUNT and NFS services listen on.
//!
//! - `mount`: The MOUNT protocol, which lists exports and hands out the root
//!   file handle of a mounted export.
//!
//! - `v3`: The NFS version 3 procedures as specified in RFC 1813.
//!
//! [`Nfs3Client`] combines them behind the [`RemoteFs`](crate::RemoteFs)
//! capability, with one lazily opened TCP connection per service.

mod client;
pub mod mount;
pub mod portmap;
pub mod v3;

pub use client::Nfs3Client;

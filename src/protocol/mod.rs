//! Protocol module implements the client side of the NFS version 3 protocol suite.
//!
//! This module contains three main components:
//!
//! - `xdr`: External Data Representation (XDR) for serialization and deserialization
//!   of data structures according to RFC 1832.
//!
//! - `rpc`: Remote Procedure Call (RPC) record marking and the call/reply client
//!   defined in RFC 5531, with AUTH_UNIX credentials.
//!
//! - `nfs`: typed calls of the NFS version 3 protocol (RFC 1813), the MOUNT protocol
//!   and the PORTMAP protocol, and the [`nfs::Nfs3Client`] built on them.
//!
//! NFS is stateless: objects are named by opaque file handles, never by path, so
//! every path a client is given has to be walked one LOOKUP at a time.

pub mod nfs;
pub mod rpc;
pub mod xdr;

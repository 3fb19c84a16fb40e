//! RPC (Remote Procedure Call) protocol implementation as specified in RFC 5531 (previously RFC 1057).
//!
//! The RPC protocol enables programs to call procedures on remote systems as if
//! they were local calls. It forms the foundation for all NFS operations by
//! providing a standard mechanism for client-server communication.
//!
//! This module implements the calling side of RPC version 2:
//!
//! 1. Message framing for TCP using the Record Marking Standard
//! 2. Transaction identifiers matching replies to calls
//! 3. Authentication (AUTH_UNIX credentials)
//! 4. Reply validation (accepted, denied, accept status)
//! 5. A deadline on every call
//!
//! A channel carries one call at a time: the caller writes a record and waits
//! for the matching reply before the next call is issued.

mod client;
mod wire;

pub use client::{unix_credentials, RpcClient};
pub use wire::{read_record, write_fragment};

/// Largest reply record accepted from a server, across all of its fragments.
pub const MAX_RPC_RECORD_LENGTH: usize = 8 * 1024 * 1024;

//! Error type shared by every engine operation.

use std::io;

use thiserror::Error;

use crate::xdr::mount::mountstat3;
use crate::xdr::nfs3::nfsstat3;

/// Failure of an engine operation.
///
/// Nothing is retried: the first failure of a resolution hop, a call or a
/// connection attempt is returned to the caller as one of these variants.
#[derive(Error, Debug)]
pub enum NfsError {
    /// Address resolution, port discovery, connect, I/O, timeout or an undecodable reply.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// The server refused the RPC call itself (program, version or procedure
    /// unavailable, garbage arguments, credentials rejected).
    #[error("RPC call failed: {0}")]
    Rpc(String),

    /// An NFS procedure returned a status other than `NFS3_OK`.
    #[error("NFS error {status}")]
    Protocol { status: nfsstat3 },

    /// A MOUNT procedure returned a status other than `MNT3_OK`.
    #[error("Mount failed: {status}")]
    Mount { status: mountstat3 },

    /// A non-final path component resolved to something other than a directory.
    #[error("{0}: Not a directory")]
    NotDirectory(String),

    /// Resolution used up its lookup budget.
    #[error("{0}: Too many levels of symbolic links or path too deep")]
    LoopOrTooDeep(String),

    /// No export is mounted and no current handle was set.
    #[error("File handle not set, mount an export or set a handle first")]
    HandleNotSet,

    /// Malformed invocation, detected before any network traffic.
    #[error("{0}")]
    Usage(String),

    /// The server accepted fewer bytes than were sent.
    #[error("{accepted} bytes written but {requested} requested")]
    ShortWrite { accepted: u32, requested: u32 },

    #[error("{0}: Is a directory")]
    IsDirectory(String),

    #[error("{0}: Is a symbolic link")]
    IsSymlink(String),

    #[error("{0}: Not a regular file")]
    NotRegularFile(String),

    /// The server answered without the attributes the operation depends on.
    #[error("{0}: server returned no attributes")]
    MissingAttributes(String),
}

impl NfsError {
    /// Protocol status carried by the error, when it came from an NFS reply.
    pub fn status(&self) -> Option<nfsstat3> {
        match self {
            NfsError::Protocol { status } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn usage(message: impl Into<String>) -> NfsError {
        NfsError::Usage(message.into())
    }
}

impl From<nfsstat3> for NfsError {
    fn from(status: nfsstat3) -> Self {
        NfsError::Protocol { status }
    }
}

impl From<mountstat3> for NfsError {
    fn from(status: mountstat3) -> Self {
        NfsError::Mount { status }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NfsError>;

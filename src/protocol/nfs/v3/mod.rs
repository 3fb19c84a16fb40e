//! NFSv3 (Network File System version 3) procedure calls as specified in RFC 1813.
//!
//! One module per procedure the client issues:
//!
//! 1. NULL - Do nothing (ping the server)
//! 2. GETATTR - Get file attributes
//! 3. SETATTR - Set file attributes
//! 4. LOOKUP - Look up file name
//! 5. READLINK - Read from symbolic link
//! 6. READ - Read from file
//! 7. WRITE - Write to file
//! 8. CREATE - Create a file
//! 9. MKDIR - Create a directory
//! 10. SYMLINK - Create a symbolic link
//! 11. MKNOD - Create a special device
//! 12. REMOVE - Remove a file
//! 13. RMDIR - Remove a directory
//! 14. RENAME - Rename a file or directory
//! 15. LINK - Create a hard link
//! 16. READDIR - Read from directory
//! 17. FSSTAT - Get file system statistics
//!
//! Every result except NULL's starts with an `nfsstat3`. On `NFS3_OK` the
//! `resok` arm follows and is decoded; any other status becomes
//! [`NfsError::Protocol`] and the `resfail` arm is left unread.

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{NfsError, Result};
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::{deserialize, nfs3, Deserialize, Serialize};

mod create;
mod fsstat;
mod getattr;
mod link;
mod lookup;
mod mkdir;
mod mknod;
mod null;
mod read;
mod readdir;
mod readlink;
mod remove;
mod rename;
mod rmdir;
mod setattr;
mod symlink;
mod write;

pub use create::nfsproc3_create;
pub use fsstat::nfsproc3_fsstat;
pub use getattr::nfsproc3_getattr;
pub use link::nfsproc3_link;
pub use lookup::nfsproc3_lookup;
pub use mkdir::nfsproc3_mkdir;
pub use mknod::nfsproc3_mknod;
pub use null::nfsproc3_null;
pub use read::nfsproc3_read;
pub use readdir::nfsproc3_readdir;
pub use readlink::nfsproc3_readlink;
pub use remove::nfsproc3_remove;
pub use rename::nfsproc3_rename;
pub use rmdir::nfsproc3_rmdir;
pub use setattr::nfsproc3_setattr;
pub use symlink::nfsproc3_symlink;
pub use write::nfsproc3_write;

/// Issues `proc` and decodes its status-prefixed result.
async fn call<S, A, R>(client: &mut RpcClient<S>, proc: nfs3::NFSProgram, args: &A) -> Result<R>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
    A: Serialize,
    R: Deserialize + Default,
{
    let mut reply = client.call(proc as u32, args).await?;
    match deserialize::<nfs3::nfsstat3>(&mut reply)? {
        nfs3::nfsstat3::NFS3_OK => Ok(deserialize::<R>(&mut reply)?),
        status => Err(NfsError::Protocol { status }),
    }
}

//! Client side of the `READDIR` procedure (procedure 16) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.16.
//!
//! The `READDIR` procedure returns a variable number of entries of a
//! directory, starting after the entry named by `cookie`.
//!
//! The client sends:
//! - The directory handle
//! - The cookie of the last entry already seen, 0 to start over
//! - The cookie verifier of the previous reply, zero on the first call
//! - A byte count bounding the size of the reply
//!
//! Each entry of the reply carries a file id, a name and the cookie that
//! resumes the listing right after it; `eof` marks the last page.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

/// Reads one page of directory entries.
pub async fn nfsproc3_readdir<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::READDIR3args,
) -> Result<nfs3::dir::READDIR3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_readdir({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_READDIR, args).await
}

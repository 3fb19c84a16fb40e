//! Client side of the `RENAME` procedure (procedure 14) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.14.
//!
//! The `RENAME` procedure moves an entry, possibly between directories of the
//! same file system, replacing an existing destination of compatible type.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_rename<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::RENAME3args,
) -> Result<nfs3::dir::RENAME3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_rename({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_RENAME, args).await
}

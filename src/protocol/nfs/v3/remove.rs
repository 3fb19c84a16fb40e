//! Client side of the `REMOVE` procedure (procedure 12) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.12.
//!
//! The `REMOVE` procedure removes a non-directory entry from a directory.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_remove<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::REMOVE3args,
) -> Result<nfs3::file::REMOVE3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_remove({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_REMOVE, args).await
}

//! Client side of the `RMDIR` procedure (procedure 13) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.13.
//!
//! The `RMDIR` procedure removes an empty subdirectory.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_rmdir<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::RMDIR3args,
) -> Result<nfs3::dir::RMDIR3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_rmdir({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_RMDIR, args).await
}

//! Client side of the `MKDIR` procedure (procedure 9) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.9.
//!
//! The `MKDIR` procedure creates a new subdirectory.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_mkdir<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::MKDIR3args,
) -> Result<nfs3::dir::diropres3ok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_mkdir({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_MKDIR, args).await
}

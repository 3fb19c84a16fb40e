//! Client side of the `READLINK` procedure (procedure 5) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.5.
//!
//! The `READLINK` procedure reads the target text stored in a symbolic link.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_readlink<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::READLINK3args,
) -> Result<nfs3::file::READLINK3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_readlink({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_READLINK, args).await
}

//! Client side of the `SYMLINK` procedure (procedure 10) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.10.
//!
//! The `SYMLINK` procedure creates a symbolic link holding the given target
//! text. The server stores the text as is; it is not resolved.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_symlink<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::SYMLINK3args,
) -> Result<nfs3::dir::diropres3ok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_symlink({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_SYMLINK, args).await
}

//! Client side of the `GETATTR` procedure (procedure 1) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.1.
//!
//! The `GETATTR` procedure retrieves the attributes of a file system object.
//! Resolution falls back to it when a `LOOKUP` reply carries no attributes.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_getattr<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::GETATTR3args,
) -> Result<nfs3::GETATTR3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_getattr({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_GETATTR, args).await
}

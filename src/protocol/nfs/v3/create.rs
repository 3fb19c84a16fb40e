//! Client side of the `CREATE` procedure (procedure 8) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.8.
//!
//! The `CREATE` procedure creates a regular file. Requests are `GUARDED`, so
//! an existing name fails with `NFS3ERR_EXIST` instead of being truncated.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_create<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::CREATE3args,
) -> Result<nfs3::dir::diropres3ok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_create({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_CREATE, args).await
}

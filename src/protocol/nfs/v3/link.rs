//! Client side of the `LINK` procedure (procedure 15) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.15.
//!
//! The `LINK` procedure adds a new name for an existing file. Both the file
//! and the directory receiving the name must be on the same file system.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_link<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::LINK3args,
) -> Result<nfs3::file::LINK3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_link({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_LINK, args).await
}

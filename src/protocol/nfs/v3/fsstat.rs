//! Client side of the `FSSTAT` procedure (procedure 18) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.18.
//!
//! The `FSSTAT` procedure reports dynamic file system figures: total, free
//! and available bytes and file slots.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_fsstat<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::fs::FSSTAT3args,
) -> Result<nfs3::fs::FSSTAT3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_fsstat({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_FSSTAT, args).await
}

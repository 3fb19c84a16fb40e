//! Client side of the `SETATTR` procedure (procedure 2) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.2.
//!
//! The `SETATTR` procedure changes one or more attributes of an object. Each
//! field of the `sattr3` argument is sent only when it should change.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_setattr<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::SETATTR3args,
) -> Result<nfs3::SETATTR3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_setattr({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_SETATTR, args).await
}

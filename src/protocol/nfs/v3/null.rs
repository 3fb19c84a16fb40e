//! Client side of the `NULL` procedure (procedure 0) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.0.
//!
//! `NULL` takes no arguments and returns nothing; it only checks that the
//! server answers on the channel.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_null<S>(client: &mut RpcClient<S>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_null()");
    client.call(nfs3::NFSProgram::NFSPROC3_NULL as u32, &()).await?;
    Ok(())
}

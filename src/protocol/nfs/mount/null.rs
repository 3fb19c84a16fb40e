//! Client side of the NULL procedure (procedure 0) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.1.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::mount;

pub async fn mountproc3_null<S>(client: &mut RpcClient<S>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("mountproc3_null()");
    client.call(mount::MountProgram::MOUNTPROC3_NULL as u32, &()).await?;
    Ok(())
}

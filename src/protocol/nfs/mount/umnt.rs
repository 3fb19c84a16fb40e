//! Client side of the UMNT procedure (procedure 3) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.4.
//!
//! UMNT removes the server's record of a mount. The reply is void.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::mount;

pub async fn mountproc3_umnt<S>(client: &mut RpcClient<S>, path: &str) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("mountproc3_umnt({:?})", path);
    client.call(mount::MountProgram::MOUNTPROC3_UMNT as u32, path.as_bytes()).await?;
    Ok(())
}

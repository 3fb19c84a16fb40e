//! Client side of the EXPORT procedure (procedure 5) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.5.
//!
//! EXPORT returns the server's export list: each exported directory with the
//! names of the client groups allowed to mount it.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::{deserialize, mount};

pub async fn mountproc3_export<S>(client: &mut RpcClient<S>) -> Result<mount::exports>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("mountproc3_export()");
    let mut reply = client.call(mount::MountProgram::MOUNTPROC3_EXPORT as u32, &()).await?;
    let exports = deserialize::<mount::exports>(&mut reply)?;
    debug!("mountproc3_export --> {:?}", exports);
    Ok(exports)
}

//! Client side of the MNT procedure (procedure 1) for MOUNT version 3 protocol
//! as defined in RFC 1813 Appendix I section I.4.2.
//!
//! MNT takes the path of an exported directory. On `MNT3_OK` the reply holds
//! the root file handle of that export and the authentication flavors the
//! server accepts for it.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::{NfsError, Result};
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::{deserialize, mount};

/// Mounts `path`; a status other than `MNT3_OK` becomes [`NfsError::Mount`].
pub async fn mountproc3_mnt<S>(
    client: &mut RpcClient<S>,
    path: &str,
) -> Result<mount::mountres3_ok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("mountproc3_mnt({:?})", path);
    let mut reply =
        client.call(mount::MountProgram::MOUNTPROC3_MNT as u32, path.as_bytes()).await?;
    match deserialize::<mount::mountstat3>(&mut reply)? {
        mount::mountstat3::MNT3_OK => {
            let response = deserialize::<mount::mountres3_ok>(&mut reply)?;
            debug!("mountproc3_mnt --> {:?}", response);
            Ok(response)
        }
        status => Err(NfsError::Mount { status }),
    }
}

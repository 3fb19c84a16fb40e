//! MOUNT protocol calls for NFS version 3 as specified in RFC 1813 Appendix I.
//! https://datatracker.ietf.org/doc/html/rfc1813#appendix-I
//!
//! The mount service hands out the root file handle of an export; every
//! later NFS call starts from a handle derived from it. `MOUNTPROC3_DUMP` and
//! `MOUNTPROC3_UMNTALL` are not issued by this client.

mod export;
mod mnt;
mod null;
mod umnt;

pub use export::mountproc3_export;
pub use mnt::mountproc3_mnt;
pub use null::mountproc3_null;
pub use umnt::mountproc3_umnt;

//! Port mapper (RFC 1833, previously RFC 1057 Appendix A) calls.
//!
//! Only `PMAPPROC_GETPORT` is needed: it locates the TCP ports of the MOUNT
//! and NFS services before their channels are opened.

mod get_port;

pub use get_port::pmapproc_getport;

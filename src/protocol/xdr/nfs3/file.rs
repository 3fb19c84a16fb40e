//! Module contains XDR data structures related to file operations for NFS version 3 protocol
//! as defined in RFC 1813.
//!
//! This module includes data structures for the following operations:
//! - READLINK: Read the target of a symbolic link (procedure 5)
//! - READ: Read data from a file (procedure 6)
//! - WRITE: Write data to a file (procedure 7)
//! - CREATE: Create a regular file (procedure 8)
//! - REMOVE: Remove a file (procedure 12)
//! - LINK: Create a hard link (procedure 15)

#![allow(dead_code)]
#![allow(non_camel_case_types)]

use std::io::{Read, Write};

use num_derive::{FromPrimitive, ToPrimitive};

use super::*;

/// Arguments for the READLINK procedure (procedure 5) as defined in RFC 1813 section 3.3.5
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READLINK3args {
    /// File handle of the symbolic link
    pub symlink: nfs_fh3,
}
DeserializeStruct!(READLINK3args, symlink);
SerializeStruct!(READLINK3args, symlink);

/// Successful response for the READLINK procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READLINK3resok {
    /// Attributes of the symbolic link
    pub symlink_attributes: post_op_attr,
    /// Target text stored in the link
    pub data: nfspath3,
}
DeserializeStruct!(READLINK3resok, symlink_attributes, data);
SerializeStruct!(READLINK3resok, symlink_attributes, data);

/// Arguments for the READ procedure (procedure 6) as defined in RFC 1813 section 3.3.6
/// Used to read data from a regular file
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READ3args {
    /// File handle for the file to be read
    pub file: nfs_fh3,
    /// Position within the file to begin reading
    pub offset: offset3,
    /// Number of bytes of data to read
    pub count: count3,
}
DeserializeStruct!(READ3args, file, offset, count);
SerializeStruct!(READ3args, file, offset, count);

/// Successful response for the READ procedure as defined in RFC 1813 section 3.3.6
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READ3resok {
    /// File attributes after the operation
    pub file_attributes: post_op_attr,
    /// Number of bytes actually read
    pub count: count3,
    /// True if the end of file was reached
    pub eof: bool,
    /// The data read from the file
    pub data: Vec<u8>,
}
DeserializeStruct!(READ3resok, file_attributes, count, eof, data);
SerializeStruct!(READ3resok, file_attributes, count, eof, data);

/// Enumeration specifying how data should be written to storage
/// as defined in RFC 1813 section 3.3.7
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum stable_how {
    /// Data may be buffered before writing to stable storage
    /// The server may return before the data is committed to stable storage
    UNSTABLE = 0,
    /// Data must be committed to stable storage before returning
    /// Only the data for this request is guaranteed to be committed
    DATA_SYNC = 1,
    /// All file system data must be committed to stable storage before returning
    /// This includes the data and all metadata for this request
    #[default]
    FILE_SYNC = 2,
}
SerializeEnum!(stable_how);
DeserializeEnum!(stable_how);

/// Arguments for the WRITE procedure (procedure 7) as defined in RFC 1813 section 3.3.7
/// Used to write data to a regular file
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct WRITE3args {
    /// File handle for the file to write
    pub file: nfs_fh3,
    /// Position within the file to begin writing
    pub offset: offset3,
    /// Number of bytes of data to write
    pub count: count3,
    /// How to commit the data to storage
    pub stable: stable_how,
    /// The data to be written
    pub data: Vec<u8>,
}
DeserializeStruct!(WRITE3args, file, offset, count, stable, data);
SerializeStruct!(WRITE3args, file, offset, count, stable, data);

/// Successful response for the WRITE procedure as defined in RFC 1813 section 3.3.7
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct WRITE3resok {
    /// File attributes before and after the operation
    pub file_wcc: wcc_data,
    /// Number of bytes actually written
    pub count: count3,
    /// How the data was committed to stable storage
    pub committed: stable_how,
    /// Write verifier to detect server restarts
    pub verf: writeverf3,
}
DeserializeStruct!(WRITE3resok, file_wcc, count, committed, verf);
SerializeStruct!(WRITE3resok, file_wcc, count, committed, verf);

/// How a CREATE request treats an existing file, RFC 1813 section 3.3.8
///
/// ```text
/// union createhow3 switch (createmode3 mode) {
///     case UNCHECKED:
///     case GUARDED:   sattr3 obj_attributes;
///     case EXCLUSIVE: createverf3 verf;
/// };
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub enum createhow3 {
    /// Create or truncate an existing file to the given attributes
    UNCHECKED(sattr3),
    /// Fail with `NFS3ERR_EXIST` when the name already exists
    GUARDED(sattr3),
    /// Exclusive creation keyed by a client verifier
    EXCLUSIVE(createverf3),
}

impl Default for createhow3 {
    fn default() -> createhow3 {
        createhow3::GUARDED(sattr3::default())
    }
}

impl Serialize for createhow3 {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        match self {
            createhow3::UNCHECKED(attr) => {
                createmode3::UNCHECKED.serialize(dest)?;
                attr.serialize(dest)
            }
            createhow3::GUARDED(attr) => {
                createmode3::GUARDED.serialize(dest)?;
                attr.serialize(dest)
            }
            createhow3::EXCLUSIVE(verf) => {
                createmode3::EXCLUSIVE.serialize(dest)?;
                verf.serialize(dest)
            }
        }
    }
}

impl Deserialize for createhow3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<createmode3>(src)? {
            createmode3::UNCHECKED => createhow3::UNCHECKED(deserialize(src)?),
            createmode3::GUARDED => createhow3::GUARDED(deserialize(src)?),
            createmode3::EXCLUSIVE => createhow3::EXCLUSIVE(deserialize(src)?),
        };
        Ok(())
    }
}

/// Arguments for the CREATE procedure (procedure 8) as defined in RFC 1813 section 3.3.8
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct CREATE3args {
    /// Directory in which to create the file and its name
    pub dirops: diropargs3,
    /// Creation mode and initial attributes
    pub how: createhow3,
}
DeserializeStruct!(CREATE3args, dirops, how);
SerializeStruct!(CREATE3args, dirops, how);

/// Arguments for the REMOVE procedure (procedure 12) as defined in RFC 1813 section 3.3.12
pub type REMOVE3args = diropargs3;

/// Successful response for the REMOVE procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct REMOVE3resok {
    /// Attributes of the parent directory before and after the removal
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(REMOVE3resok, dir_wcc);
SerializeStruct!(REMOVE3resok, dir_wcc);

/// Arguments for the LINK procedure (procedure 15) as defined in RFC 1813 section 3.3.15
/// Used to create a hard link to a file
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct LINK3args {
    /// File handle for the target file
    pub file: nfs_fh3,
    /// Directory and name for the new link
    pub link: diropargs3,
}
DeserializeStruct!(LINK3args, file, link);
SerializeStruct!(LINK3args, file, link);

/// Successful response for the LINK procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct LINK3resok {
    /// Attributes of the linked file
    pub file_attributes: post_op_attr,
    /// Attributes of the directory that received the new name
    pub linkdir_wcc: wcc_data,
}
DeserializeStruct!(LINK3resok, file_attributes, linkdir_wcc);
SerializeStruct!(LINK3resok, file_attributes, linkdir_wcc);

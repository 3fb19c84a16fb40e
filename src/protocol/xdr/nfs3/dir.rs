//! Module contains XDR data structures related to directories for NFS version 3 protocol
//! as defined in RFC 1813.
//!
//! This module includes data structures for the following directory operations:
//! - MKDIR: Create a directory (procedure 9)
//! - SYMLINK: Create a symbolic link (procedure 10)
//! - MKNOD: Create a special device (procedure 11)
//! - RMDIR: Remove a directory (procedure 13)
//! - RENAME: Rename a directory entry (procedure 14)
//! - READDIR: Read from a directory (procedure 16)
//!
//! CREATE, MKDIR, SYMLINK and MKNOD share one successful result body, [`diropres3ok`].

#![allow(dead_code)]
#![allow(non_camel_case_types)]

use std::io::{Read, Write};

use super::*;

/// Successful result of the object creating procedures
///
/// ```text
/// struct CREATE3resok {
///     post_op_fh3   obj;
///     post_op_attr  obj_attributes;
///     wcc_data      dir_wcc;
/// };
/// ```
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct diropres3ok {
    /// Handle of the new object, when the server returns one
    pub obj: post_op_fh3,
    /// Attributes of the new object
    pub obj_attributes: post_op_attr,
    /// Attributes of the parent directory before and after the call
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(diropres3ok, obj, obj_attributes, dir_wcc);
SerializeStruct!(diropres3ok, obj, obj_attributes, dir_wcc);

/// Arguments for the MKDIR procedure (procedure 9)
/// as defined in RFC 1813 section 3.3.9
/// Used to create a new directory
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct MKDIR3args {
    /// Directory where new directory should be created and its name
    pub dirops: diropargs3,
    /// Initial attributes for the new directory
    pub attributes: sattr3,
}
DeserializeStruct!(MKDIR3args, dirops, attributes);
SerializeStruct!(MKDIR3args, dirops, attributes);

/// Arguments for the SYMLINK procedure (procedure 10)
/// as defined in RFC 1813 section 3.3.10
/// Used to create a symbolic link
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct SYMLINK3args {
    /// Directory where symbolic link should be created and its name
    pub dirops: diropargs3,
    /// Target path and attributes for the symbolic link
    pub symlink: symlinkdata3,
}
DeserializeStruct!(SYMLINK3args, dirops, symlink);
SerializeStruct!(SYMLINK3args, dirops, symlink);

/// Attributes and device numbers of a new character or block device
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default)]
pub struct devicedata3 {
    /// Initial attributes of the device node
    pub dev_attributes: sattr3,
    /// Major and minor device numbers
    pub spec: specdata3,
}
DeserializeStruct!(devicedata3, dev_attributes, spec);
SerializeStruct!(devicedata3, dev_attributes, spec);

/// Type specific part of a MKNOD request, RFC 1813 section 3.3.11
///
/// ```text
/// union mknoddata3 switch (ftype3 type) {
///     case NF3CHR:
///     case NF3BLK:  devicedata3 device;
///     case NF3SOCK:
///     case NF3FIFO: sattr3 pipe_attributes;
///     default:      void;
/// };
/// ```
#[allow(non_camel_case_types)]
#[derive(Clone, Debug)]
pub enum mknoddata3 {
    /// Character special device
    NF3CHR(devicedata3),
    /// Block special device
    NF3BLK(devicedata3),
    /// Socket
    NF3SOCK(sattr3),
    /// Named pipe
    NF3FIFO(sattr3),
    /// Any other file type, which carries no data
    Other(ftype3),
}

impl Default for mknoddata3 {
    fn default() -> mknoddata3 {
        mknoddata3::NF3FIFO(sattr3::default())
    }
}

impl mknoddata3 {
    /// File type this request creates.
    pub fn ftype(&self) -> ftype3 {
        match self {
            mknoddata3::NF3CHR(_) => ftype3::NF3CHR,
            mknoddata3::NF3BLK(_) => ftype3::NF3BLK,
            mknoddata3::NF3SOCK(_) => ftype3::NF3SOCK,
            mknoddata3::NF3FIFO(_) => ftype3::NF3FIFO,
            mknoddata3::Other(ftype) => *ftype,
        }
    }
}

impl Serialize for mknoddata3 {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        self.ftype().serialize(dest)?;
        match self {
            mknoddata3::NF3CHR(device) | mknoddata3::NF3BLK(device) => device.serialize(dest),
            mknoddata3::NF3SOCK(attr) | mknoddata3::NF3FIFO(attr) => attr.serialize(dest),
            mknoddata3::Other(_) => Ok(()),
        }
    }
}

impl Deserialize for mknoddata3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        *self = match deserialize::<ftype3>(src)? {
            ftype3::NF3CHR => mknoddata3::NF3CHR(deserialize(src)?),
            ftype3::NF3BLK => mknoddata3::NF3BLK(deserialize(src)?),
            ftype3::NF3SOCK => mknoddata3::NF3SOCK(deserialize(src)?),
            ftype3::NF3FIFO => mknoddata3::NF3FIFO(deserialize(src)?),
            other => mknoddata3::Other(other),
        };
        Ok(())
    }
}

/// Arguments for the MKNOD procedure (procedure 11)
/// as defined in RFC 1813 section 3.3.11
/// Used to create a special device file, FIFO, or socket
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct MKNOD3args {
    /// Directory where the special file should be created and its name
    pub where_dir: diropargs3,
    /// Type and device information for the special file
    pub what: mknoddata3,
}
DeserializeStruct!(MKNOD3args, where_dir, what);
SerializeStruct!(MKNOD3args, where_dir, what);

/// Arguments for the RMDIR procedure (procedure 13) as defined in RFC 1813 section 3.3.13
pub type RMDIR3args = diropargs3;

/// Successful response for the RMDIR procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct RMDIR3resok {
    /// Attributes of the parent directory before and after the removal
    pub dir_wcc: wcc_data,
}
DeserializeStruct!(RMDIR3resok, dir_wcc);
SerializeStruct!(RMDIR3resok, dir_wcc);

/// Arguments for the RENAME procedure (procedure 14) as defined in RFC 1813 section 3.3.14
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct RENAME3args {
    /// Source directory and name
    pub from: diropargs3,
    /// Destination directory and name
    pub to: diropargs3,
}
DeserializeStruct!(RENAME3args, from, to);
SerializeStruct!(RENAME3args, from, to);

/// Successful response for the RENAME procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct RENAME3resok {
    /// Source directory attributes before and after the call
    pub fromdir_wcc: wcc_data,
    /// Destination directory attributes before and after the call
    pub todir_wcc: wcc_data,
}
DeserializeStruct!(RENAME3resok, fromdir_wcc, todir_wcc);
SerializeStruct!(RENAME3resok, fromdir_wcc, todir_wcc);

/// Directory entry returned by READDIR operation
/// as defined in RFC 1813 section 3.3.16
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct entry3 {
    /// File identifier (inode number)
    pub fileid: fileid3,
    /// Name of the directory entry
    pub name: filename3,
    /// Cookie for the next READDIR operation
    pub cookie: cookie3,
}
DeserializeStruct!(entry3, fileid, name, cookie);
SerializeStruct!(entry3, fileid, name, cookie);

/// Arguments for the READDIR procedure (procedure 16)
/// as defined in RFC 1813 section 3.3.16
/// Used to read entries from a directory. The server returns a variable number of directory entries,
/// up to the specified count limit.
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READDIR3args {
    /// File handle for the directory to be read
    pub dir: nfs_fh3,
    /// Cookie indicating where to start reading directory entries
    /// A cookie value of 0 means start at beginning of directory
    pub cookie: cookie3,
    /// Cookie verifier to detect whether directory has changed
    pub cookieverf: cookieverf3,
    /// Maximum number of bytes of directory information to return
    pub dircount: count3,
}
DeserializeStruct!(READDIR3args, dir, cookie, cookieverf, dircount);
SerializeStruct!(READDIR3args, dir, cookie, cookieverf, dircount);

/// Page of directory entries
///
/// On the wire the entries form an XDR linked list, each element preceded by
/// a `TRUE` discriminant and the list terminated by `FALSE`:
///
/// ```text
/// struct dirlist3 {
///     entry3  *entries;
///     bool    eof;
/// };
/// ```
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct dirlist3 {
    /// Entries in server order
    pub entries: Vec<entry3>,
    /// True when the last entry of the directory is in this page
    pub eof: bool,
}

impl Serialize for dirlist3 {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        for entry in &self.entries {
            true.serialize(dest)?;
            entry.serialize(dest)?;
        }
        false.serialize(dest)?;
        self.eof.serialize(dest)
    }
}

impl Deserialize for dirlist3 {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.entries.clear();
        while deserialize::<bool>(src)? {
            self.entries.push(deserialize::<entry3>(src)?);
        }
        self.eof = deserialize::<bool>(src)?;
        Ok(())
    }
}

/// Successful response for the READDIR procedure
#[allow(non_camel_case_types)]
#[derive(Debug, Default)]
pub struct READDIR3resok {
    /// Attributes of the directory
    pub dir_attributes: post_op_attr,
    /// Verifier to send back with continuation requests
    pub cookieverf: cookieverf3,
    /// Entries and end of listing flag
    pub reply: dirlist3,
}
DeserializeStruct!(READDIR3resok, dir_attributes, cookieverf, reply);
SerializeStruct!(READDIR3resok, dir_attributes, cookieverf, reply);

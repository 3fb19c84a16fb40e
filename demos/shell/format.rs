use nfs_shell::{Attributes, FileType, FsStat};

/// `rwxr-x---` style permission string with setuid, setgid and sticky bits.
fn permissions(mode: u32) -> String {
    let mut text = String::with_capacity(9);
    for (shift, special, set_char) in [(6, 0o4000, 's'), (3, 0o2000, 's'), (0, 0o1000, 't')] {
        let bits = (mode >> shift) & 0o7;
        text.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        text.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        let exec = bits & 0o1 != 0;
        text.push(match (mode & special != 0, exec) {
            (true, true) => set_char,
            (true, false) => set_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    text
}

/// One `ls -l` line. Devices show their numbers in place of the size.
pub fn long_entry(name: &str, attrs: &Attributes, link_target: Option<&str>) -> String {
    let size = match attrs.file_type {
        FileType::BlockDevice | FileType::CharDevice => {
            format!("{:>4}, {:>4}", attrs.rdev.0, attrs.rdev.1)
        }
        _ => attrs.size.to_string(),
    };
    let mut line = format!(
        "{}{} {:>3} {:>5} {:>5} {:>10} {:>11} {}",
        attrs.file_type.type_letter(),
        permissions(attrs.mode),
        attrs.nlink,
        attrs.uid,
        attrs.gid,
        size,
        attrs.mtime.unix_seconds(),
        name
    );
    if let Some(target) = link_target {
        line.push_str(" -> ");
        line.push_str(target);
    }
    line
}

pub fn stat(path: &str, attrs: &Attributes) -> String {
    format!(
        "  File: {path}\n  Type: {:?}  Mode: {:04o} ({}{})\n  Size: {}  Used: {}  Links: {}\n  \
         Uid: {}  Gid: {}  Device: {},{}\n   Fsid: {}  Fileid: {}\nAccess: {}\nModify: {}\nChange: {}",
        attrs.file_type,
        attrs.mode & 0o7777,
        attrs.file_type.type_letter(),
        permissions(attrs.mode),
        attrs.size,
        attrs.used,
        attrs.nlink,
        attrs.uid,
        attrs.gid,
        attrs.rdev.0,
        attrs.rdev.1,
        attrs.fsid,
        attrs.fileid,
        attrs.atime.unix_seconds(),
        attrs.mtime.unix_seconds(),
        attrs.ctime.unix_seconds(),
    )
}

pub fn df(stat: &FsStat) -> String {
    let used = stat.total_bytes.saturating_sub(stat.free_bytes);
    format!(
        "{:>12} {:>12} {:>12} {:>10} {:>10} {:>10}\n{:>12} {:>12} {:>12} {:>10} {:>10} {:>10}",
        "1K-blocks",
        "Used",
        "Available",
        "Inodes",
        "IFree",
        "IAvail",
        stat.total_bytes / 1024,
        used / 1024,
        stat.avail_bytes / 1024,
        stat.total_files,
        stat.free_files,
        stat.avail_files,
    )
}

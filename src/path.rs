//! Path splitting for operations that act on a directory entry.

/// Splits `path` into the directory that holds the entry and the entry name.
///
/// A path without a separator lives in the current directory (`"."`), a path
/// directly under the root keeps `"/"` as parent, and a trailing separator
/// leaves no name at all.
pub fn split(path: &str) -> (&str, Option<&str>) {
    match path.rfind('/') {
        None if path.is_empty() => (".", None),
        None => (".", Some(path)),
        Some(pos) => {
            let leaf = &path[pos + 1..];
            let parent = if pos == 0 { "/" } else { &path[..pos] };
            (parent, if leaf.is_empty() { None } else { Some(leaf) })
        }
    }
}

//! Session parameters.

use std::time::Duration;

use crate::error::{NfsError, Result};
use crate::remote::Stability;

/// Well-known port of the portmapper.
pub const PORTMAP_PORT: u16 = 111;
/// Owner of new objects and of the credential until `set uid`/`set gid`.
pub const NOBODY: u32 = 65534;

/// Parameters of one client session.
///
/// Nothing is read from disk; values start at their defaults and change only
/// through the builder methods or [`ClientConfig::set`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Server name or address; no connection is possible until it is set.
    pub host: Option<String>,
    pub uid: u32,
    pub gid: u32,
    /// Mode of new objects; only permission bits are used.
    pub mode: u32,
    pub portmap_port: u16,
    /// Bound on connecting and on every call.
    pub timeout: Duration,
    /// Try to bind a source port below 1024 first.
    pub privileged_port: bool,
    /// Byte count hint sent with every READDIR.
    pub readdir_count: u32,
    /// Bytes requested per READ when reading a whole file.
    pub read_chunk: u32,
    pub write_stability: Stability,
    /// Machine name in the credential; the local host name when unset.
    pub machine_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: None,
            uid: NOBODY,
            gid: NOBODY,
            mode: 0o755,
            portmap_port: PORTMAP_PORT,
            timeout: Duration::from_secs(60),
            privileged_port: true,
            readdir_count: 8192,
            read_chunk: 8192,
            write_stability: Stability::FileSync,
            machine_name: None,
        }
    }
}

impl ClientConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_uid(mut self, uid: u32) -> Self {
        self.uid = uid;
        self
    }

    pub fn with_gid(mut self, gid: u32) -> Self {
        self.gid = gid;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode & 0o777;
        self
    }

    pub fn with_portmap_port(mut self, port: u16) -> Self {
        self.portmap_port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_privileged_port(mut self, privileged: bool) -> Self {
        self.privileged_port = privileged;
        self
    }

    pub fn with_readdir_count(mut self, count: u32) -> Self {
        self.readdir_count = count;
        self
    }

    pub fn with_read_chunk(mut self, chunk: u32) -> Self {
        self.read_chunk = chunk;
        self
    }

    pub fn with_write_stability(mut self, stability: Stability) -> Self {
        self.write_stability = stability;
        self
    }

    pub fn with_machine_name(mut self, name: impl Into<String>) -> Self {
        self.machine_name = Some(name.into());
        self
    }

    /// Hostname placed in the credential.
    pub fn machine_name(&self) -> String {
        match &self.machine_name {
            Some(name) => name.clone(),
            None => hostname::get()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| String::from("localhost")),
        }
    }

    /// Applies `set <key> <value>` for `host`, `uid`, `gid` (decimal) and `mode`
    /// (octal). Nothing changes when the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => {
                if value.is_empty() {
                    return Err(NfsError::usage("host: empty host name"));
                }
                self.host = Some(value.to_string());
            }
            "uid" => self.uid = parse_id(key, value)?,
            "gid" => self.gid = parse_id(key, value)?,
            "mode" => self.mode = parse_mode(value)? & 0o777,
            other => return Err(NfsError::usage(format!("set: unknown setting {}", other))),
        }
        Ok(())
    }
}

fn parse_id(key: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| NfsError::usage(format!("{}: {}: not a number", key, value)))
}

/// Parses an octal mode of at most four digits.
pub fn parse_mode(text: &str) -> Result<u32> {
    match u32::from_str_radix(text, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(NfsError::usage(format!("{}: not an octal mode", text))),
    }
}

use std::time::Duration;

use nfs_shell::attr::{major, makedev, minor};
use nfs_shell::config::{parse_mode, PORTMAP_PORT};
use nfs_shell::ops::parse_owner;
use nfs_shell::path::split;
use nfs_shell::{ClientConfig, NfsError, NodeKind, SetAttributes, SetTime, Stability};

#[test]
fn split_separates_parent_and_leaf() {
    assert_eq!(split("file"), (".", Some("file")));
    assert_eq!(split("a/b/c"), ("a/b", Some("c")));
    assert_eq!(split("/top"), ("/", Some("top")));
    assert_eq!(split("dir/"), ("dir", None));
    assert_eq!(split("/"), ("/", None));
    assert_eq!(split(""), (".", None));
}

#[test]
fn device_numbers_pack_like_linux() {
    assert_eq!(makedev(8, 1), 0x801);
    assert_eq!(makedev(0, 0x100), 0x10_0000);
    assert_eq!(makedev(0x1000, 0), 0x1000_0000_0000);
    for (maj, min) in [(0, 0), (4, 64), (259, 70000), (u32::MAX, u32::MAX)] {
        let dev = makedev(maj, min);
        assert_eq!((major(dev), minor(dev)), (maj, min));
    }
}

#[test]
fn node_kinds_parse_from_shell_words() {
    assert_eq!(NodeKind::parse("p", None, None).expect("fifo"), NodeKind::Fifo);
    assert_eq!(NodeKind::parse("s", None, None).expect("socket"), NodeKind::Socket);
    assert_eq!(
        NodeKind::parse("c", Some("4"), Some("1")).expect("char device"),
        NodeKind::CharDevice { major: 4, minor: 1 }
    );
    assert_eq!(
        NodeKind::parse("b", Some("8"), Some("0")).expect("block device"),
        NodeKind::BlockDevice { major: 8, minor: 0 }
    );

    let bad = [
        NodeKind::parse("x", None, None),
        NodeKind::parse("c", Some("4"), None),
        NodeKind::parse("b", Some("eight"), Some("0")),
        NodeKind::parse("p", Some("1"), Some("2")),
    ];
    for result in bad {
        assert!(matches!(result, Err(NfsError::Usage(_))), "unexpected: {result:?}");
    }
}

#[test]
fn modes_are_octal_with_at_most_special_bits() {
    assert_eq!(parse_mode("644").expect("644"), 0o644);
    assert_eq!(parse_mode("0755").expect("0755"), 0o755);
    assert_eq!(parse_mode("7777").expect("7777"), 0o7777);
    for text in ["", "8", "abc", "10000", "-1"] {
        assert!(parse_mode(text).is_err(), "{text:?} parsed");
    }
}

#[test]
fn owners_are_uid_with_optional_gid() {
    assert_eq!(parse_owner("0").expect("uid"), (0, None));
    assert_eq!(parse_owner("1000:100").expect("uid:gid"), (1000, Some(100)));
    assert!(parse_owner("").is_err());
    assert!(parse_owner("a:b").is_err());
}

#[test]
fn new_object_attributes_keep_only_permission_bits() {
    let attrs = SetAttributes::new_object(0o4755, 1, 2);
    assert_eq!(attrs.mode, Some(0o755));
    assert_eq!((attrs.uid, attrs.gid, attrs.size), (Some(1), Some(2), None));
    assert_eq!(attrs.atime, SetTime::ServerTime);
}

#[test]
fn config_defaults_and_builders() {
    let config = ClientConfig::default();
    assert_eq!(config.host, None);
    assert_eq!(config.portmap_port, PORTMAP_PORT);
    assert!(config.privileged_port);
    assert_eq!(config.write_stability, Stability::FileSync);

    let config = config
        .with_host("server")
        .with_portmap_port(1111)
        .with_privileged_port(false)
        .with_timeout(Duration::from_secs(3))
        .with_machine_name("box");
    assert_eq!(config.host.as_deref(), Some("server"));
    assert_eq!(config.portmap_port, 1111);
    assert!(!config.privileged_port);
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.machine_name(), "box");
}

#[test]
fn config_set_accepts_known_keys() {
    let mut config = ClientConfig::default();
    config.set("host", "nfs.example").expect("host");
    config.set("uid", "0").expect("uid");
    config.set("gid", "50").expect("gid");
    config.set("mode", "700").expect("mode");
    assert_eq!(config.host.as_deref(), Some("nfs.example"));
    assert_eq!((config.uid, config.gid, config.mode), (0, 50, 0o700));

    assert!(matches!(config.set("gid", "-5"), Err(NfsError::Usage(_))));
    assert_eq!(config.gid, 50);
}

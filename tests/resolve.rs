mod support;

use nfs_shell::xdr::nfs3::nfsstat3;
use nfs_shell::{ClientConfig, FileType, NfsError, Session, MAX_PATH_DEPTH};

use support::{handle_of, mounted, MockFs, ROOT};

/// `a/b/c` with a file `f` in `c`.
fn tree() -> (MockFs, u64, u64, u64, u64) {
    let fs = MockFs::new();
    let a = fs.add_dir(ROOT, "a");
    let b = fs.add_dir(a, "b");
    let c = fs.add_dir(b, "c");
    let f = fs.add_file(c, "f", b"contents");
    (fs, a, b, c, f)
}

#[tokio::test]
async fn walks_one_lookup_per_component() {
    let (fs, _, _, _, f) = tree();
    let mut session = mounted(&fs).await;

    let resolved = session.resolve("a/b/c/f", true).await.expect("resolve");
    assert_eq!(resolved.handle, handle_of(f));
    assert_eq!(resolved.attributes.file_type, FileType::Regular);
    assert_eq!(resolved.attributes.size, 8);
    assert_eq!(fs.lookups(), 4);
}

#[tokio::test]
async fn redundant_slashes_are_ignored() {
    let (fs, _, _, c, _) = tree();
    let mut session = mounted(&fs).await;

    let resolved = session.resolve("a//b///c/", false).await.expect("resolve");
    assert_eq!(resolved.handle, handle_of(c));
}

#[tokio::test]
async fn resolution_is_idempotent() {
    let (fs, _, _, _, f) = tree();
    let mut session = mounted(&fs).await;

    let first = session.resolve("a/b/c/f", false).await.expect("first resolve");
    let second = session.resolve("a/b/c/f", false).await.expect("second resolve");
    assert_eq!(first, second);
    assert_eq!(second.handle, handle_of(f));
}

#[tokio::test]
async fn empty_path_and_slash_name_a_directory_itself() {
    let (fs, _, b, _, _) = tree();
    let mut session = mounted(&fs).await;
    session.cd(Some("a/b")).await.expect("cd");

    assert_eq!(session.resolve("", false).await.expect("empty").handle, handle_of(b));
    assert_eq!(session.resolve("/", false).await.expect("slash").handle, handle_of(ROOT));
    assert!(session.resolve(".", false).await.expect("dot").attributes.is_dir());
}

#[tokio::test]
async fn absolute_paths_restart_at_the_mount_root() {
    let (fs, a, _, _, _) = tree();
    let mut session = mounted(&fs).await;
    session.cd(Some("a/b/c")).await.expect("cd");

    let resolved = session.resolve("/a", false).await.expect("resolve");
    assert_eq!(resolved.handle, handle_of(a));
}

#[tokio::test]
async fn dot_dot_climbs_through_lookup() {
    let (fs, a, _, _, _) = tree();
    let mut session = mounted(&fs).await;
    session.cd(Some("a/b")).await.expect("cd");

    let resolved = session.resolve("..", false).await.expect("resolve");
    assert_eq!(resolved.handle, handle_of(a));
}

#[tokio::test]
async fn final_symlink_follows_only_on_request() {
    let (fs, _, _, _, f) = tree();
    let link = fs.add_symlink(ROOT, "link", "a/b/c/f");
    let mut session = mounted(&fs).await;

    let itself = session.resolve("link", false).await.expect("resolve link");
    assert_eq!(itself.handle, handle_of(link));
    assert_eq!(itself.attributes.file_type, FileType::Symlink);
    assert_eq!(fs.state().readlinks, 0);

    let target = session.resolve("link", true).await.expect("resolve target");
    assert_eq!(target.handle, handle_of(f));
    assert_eq!(fs.state().readlinks, 1);
}

#[tokio::test]
async fn intermediate_symlinks_are_always_followed() {
    let (fs, _, b, _, f) = tree();
    fs.add_symlink(b, "up", "..");
    fs.add_symlink(ROOT, "abs", "/a/b");
    let mut session = mounted(&fs).await;

    let resolved = session.resolve("a/b/up/b/c/f", false).await.expect("relative link");
    assert_eq!(resolved.handle, handle_of(f));

    session.cd(Some("a/b/c")).await.expect("cd");
    let resolved = session.resolve("/abs/c/f", false).await.expect("absolute link");
    assert_eq!(resolved.handle, handle_of(f));
}

#[tokio::test]
async fn absolute_link_target_restarts_at_the_mount_root() {
    let (fs, _, _, c, _) = tree();
    fs.add_symlink(c, "top", "/a");
    let mut session = mounted(&fs).await;

    let resolved = session.resolve("a/b/c/top/b", true).await.expect("resolve");
    assert!(resolved.attributes.is_dir());
    assert_eq!(resolved.handle, fs.find("a/b").map(handle_of).expect("a/b exists"));
}

#[tokio::test]
async fn symlink_loop_runs_out_of_budget() {
    let fs = MockFs::new();
    fs.add_symlink(ROOT, "loop", "loop");
    let mut session = mounted(&fs).await;

    match session.resolve("loop", true).await {
        Err(NfsError::LoopOrTooDeep(path)) => assert_eq!(path, "loop"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), MAX_PATH_DEPTH);
}

#[tokio::test]
async fn mutual_symlinks_run_out_of_budget() {
    let fs = MockFs::new();
    fs.add_symlink(ROOT, "ping", "pong/x");
    fs.add_symlink(ROOT, "pong", "ping/y");
    let mut session = mounted(&fs).await;

    let result = session.resolve("ping", false).await;
    assert!(matches!(result, Err(NfsError::LoopOrTooDeep(_))), "unexpected: {result:?}");
    assert!(fs.lookups() <= MAX_PATH_DEPTH);
}

#[tokio::test]
async fn deep_path_within_budget_resolves() {
    let fs = MockFs::new();
    let mut dir = ROOT;
    for _ in 0..50 {
        dir = fs.add_dir(dir, "d");
    }
    let mut session = mounted(&fs).await;

    let path = vec!["d"; 50].join("/");
    assert_eq!(session.resolve(&path, false).await.expect("resolve").handle, handle_of(dir));
}

/// `depth` directories named `d`, each inside the previous one.
fn dir_chain(fs: &MockFs, depth: usize) -> u64 {
    (0..depth).fold(ROOT, |dir, _| fs.add_dir(dir, "d"))
}

#[tokio::test]
async fn path_of_exactly_the_budget_resolves() {
    let fs = MockFs::new();
    let deepest = dir_chain(&fs, MAX_PATH_DEPTH);
    let mut session = mounted(&fs).await;

    let path = vec!["d"; MAX_PATH_DEPTH].join("/");
    assert_eq!(session.resolve(&path, false).await.expect("resolve").handle, handle_of(deepest));
    assert_eq!(fs.lookups(), MAX_PATH_DEPTH);
}

#[tokio::test]
async fn literal_path_one_past_the_budget_fails() {
    let fs = MockFs::new();
    dir_chain(&fs, MAX_PATH_DEPTH + 1);
    let mut session = mounted(&fs).await;

    let path = vec!["d"; MAX_PATH_DEPTH + 1].join("/");
    match session.resolve(&path, false).await {
        Err(NfsError::LoopOrTooDeep(failed)) => assert_eq!(failed, path),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), MAX_PATH_DEPTH);
}

#[tokio::test]
async fn spliced_components_share_the_budget_with_literal_ones() {
    let fs = MockFs::new();
    let deepest = dir_chain(&fs, MAX_PATH_DEPTH - 1);
    fs.add_file(deepest, "x", b"end");
    let link = fs.add_symlink(deepest, "ln", "x");
    let mut session = mounted(&fs).await;

    let path = format!("{}/ln", vec!["d"; MAX_PATH_DEPTH - 1].join("/"));
    let itself = session.resolve(&path, false).await.expect("link itself fits the budget");
    assert_eq!(itself.handle, handle_of(link));

    fs.state().lookups = 0;
    match session.resolve(&path, true).await {
        Err(NfsError::LoopOrTooDeep(failed)) => assert_eq!(failed, path),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), MAX_PATH_DEPTH);
}

#[tokio::test]
async fn long_chain_of_distinct_symlinks_runs_out_of_budget() {
    let fs = MockFs::new();
    for i in 0..MAX_PATH_DEPTH {
        fs.add_symlink(ROOT, &format!("l{i}"), &format!("l{}", i + 1));
    }
    fs.add_file(ROOT, &format!("l{MAX_PATH_DEPTH}"), b"end");
    let mut session = mounted(&fs).await;

    match session.resolve("l1", true).await {
        Ok(resolved) => assert_eq!(resolved.attributes.file_type, FileType::Regular),
        other => panic!("one link short of the budget should resolve: {other:?}"),
    }

    fs.state().lookups = 0;
    fs.state().readlinks = 0;
    match session.resolve("l0", true).await {
        Err(NfsError::LoopOrTooDeep(failed)) => assert_eq!(failed, "l0"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), MAX_PATH_DEPTH);
    assert_eq!(fs.state().readlinks, MAX_PATH_DEPTH);
}

#[tokio::test]
async fn file_in_the_middle_is_not_a_directory() {
    let (fs, _, _, _, _) = tree();
    let mut session = mounted(&fs).await;

    match session.resolve("a/b/c/f/g", false).await {
        Err(NfsError::NotDirectory(path)) => assert_eq!(path, "a/b/c/f/g"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), 4);
}

#[tokio::test]
async fn missing_component_stops_the_walk() {
    let (fs, _, _, _, _) = tree();
    let mut session = mounted(&fs).await;

    match session.resolve("a/x/c", false).await {
        Err(NfsError::Protocol { status }) => assert_eq!(status, nfsstat3::NFS3ERR_NOENT),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(fs.lookups(), 2);
}

#[tokio::test]
async fn missing_lookup_attributes_fall_back_to_getattr() {
    let (fs, _, _, _, f) = tree();
    fs.state().omit_lookup_attributes = true;
    let mut session = mounted(&fs).await;

    let resolved = session.resolve("a/b/c/f", false).await.expect("resolve");
    assert_eq!(resolved.handle, handle_of(f));
    assert_eq!(resolved.attributes.size, 8);
    assert_eq!(fs.state().getattrs, 4);
}

#[tokio::test]
async fn unset_handle_fails_without_calls() {
    let (fs, _, _, _, _) = tree();
    let mut session = Session::with_remote(ClientConfig::default(), fs.clone());

    assert!(matches!(session.resolve("a", false).await, Err(NfsError::HandleNotSet)));
    assert_eq!(fs.state().calls(), 0);
}

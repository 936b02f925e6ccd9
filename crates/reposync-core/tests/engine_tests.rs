//! End-to-end tests for the sync engine over real temporary trees.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use reposync_core::{
    CandidateEntry, CopyOutcome, Copier, Direction, Error, FileCopier, PathPair, ScanOutcome,
    Scanner, Settings, SyncEngine, SyncOptions, Verifier, VerifyOutcome,
};
use reposync_fs::{ExclusionSet, RelPath};
use reposync_meta::Registry;
use reposync_test_utils::{SyncRoots, TestTree};
use rstest::rstest;

struct Fixture {
    roots: SyncRoots,
    settings: Settings,
}

impl Fixture {
    /// One repository `alpha` at `components/alpha`, both sides present.
    fn new() -> Self {
        let roots = SyncRoots::new();
        let settings = Settings {
            build_root: roots.build_root(),
            workspace_root: roots.workspace_root(),
            ..Settings::default()
        };
        roots.build_tree("components/alpha");
        roots.workspace_tree("alpha");
        Self { roots, settings }
    }

    fn registry(&self) -> Registry {
        let mut registry = Registry::new();
        registry.register("alpha", "components/alpha").unwrap();
        registry
    }

    fn engine(&self) -> SyncEngine {
        SyncEngine::new(&self.settings, self.registry()).unwrap()
    }

    fn workspace(&self) -> TestTree {
        self.roots.workspace_tree("alpha")
    }

    fn build(&self) -> TestTree {
        self.roots.build_tree("components/alpha")
    }
}

fn paths(items: &[&str]) -> Vec<RelPath> {
    items.iter().map(|p| RelPath::new(p)).collect()
}

#[test]
fn new_file_is_copied_to_destination() {
    let fixture = Fixture::new();
    fixture.workspace().write("a.txt", "hello\n");

    let report = fixture.engine().sync(Direction::To, "alpha").unwrap();

    assert_eq!(report.verified_changes, paths(&["a.txt"]));
    assert!(report.copied);
    assert_eq!(fixture.build().read_string("a.txt"), "hello\n");
}

#[test]
fn sync_from_copies_build_edits_back() {
    let fixture = Fixture::new();
    fixture.build().write("src/main.c", "int main(void) { return 0; }\n");

    let report = fixture.engine().sync_from("1").unwrap();

    assert_eq!(report.direction, Direction::From);
    assert_eq!(report.verified_changes, paths(&["src/main.c"]));
    fixture.workspace().assert_file_contains("src/main.c", "return 0");
}

#[test]
fn second_pass_finds_nothing() {
    let fixture = Fixture::new();
    let workspace = fixture.workspace();
    workspace.write("a.txt", "hello\n");
    workspace.write("nested/deeper/b.txt", "b\n");
    workspace.write("nested/c.bin", b"\x00\xff");
    let engine = fixture.engine();

    let first = engine.sync_to("alpha").unwrap();
    assert_eq!(first.verified_changes.len(), 3);

    let second = engine.sync_to("alpha").unwrap();
    assert_eq!(second.candidates_found, 0);
    assert!(second.verified_changes.is_empty());
    assert!(!second.copied);
}

#[test]
fn empty_source_directory_is_created_once() {
    let fixture = Fixture::new();
    fixture.workspace().mkdir("empty/nested");
    let engine = fixture.engine();

    let first = engine.sync_to("alpha").unwrap();
    assert_eq!(first.candidates_found, 2);
    assert!(first.verified_changes.is_empty());
    assert_eq!(first.created_dirs, paths(&["empty", "empty/nested"]));
    assert!(!first.copied);
    assert!(!first.is_unchanged());
    assert!(fixture.build().path("empty/nested").is_dir());

    let second = engine.sync_to("alpha").unwrap();
    assert_eq!(second.candidates_found, 0);
    assert!(second.created_dirs.is_empty());
}

#[test]
fn dry_run_does_not_create_directories() {
    let fixture = Fixture::new();
    fixture.workspace().mkdir("empty");

    let report = fixture
        .engine()
        .with_options(SyncOptions { dry_run: true })
        .sync_to("alpha")
        .unwrap();

    assert_eq!(report.candidates_found, 1);
    assert!(report.created_dirs.is_empty());
    assert!(!fixture.build().path("empty").exists());
}

#[cfg(unix)]
#[test]
fn backslash_name_and_nested_path_sync_independently() {
    let fixture = Fixture::new();
    let workspace = fixture.workspace();
    workspace.write("a\\b.txt", "BACKSLASH\n");
    workspace.write("a/b.txt", "NESTED\n");
    fixture.build().write("a\\b.txt", "old\n");

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert!(report.failed.is_empty());
    assert_eq!(report.copied_paths.len(), 2);
    assert_eq!(fixture.build().read_string("a\\b.txt"), "BACKSLASH\n");
    assert_eq!(fixture.build().read_string("a/b.txt"), "NESTED\n");
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_file_name_is_copied_under_its_own_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fixture = Fixture::new();
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    std::fs::write(fixture.workspace().root().join(name), "latin-1 name\n").unwrap();

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert_eq!(report.copied_paths.len(), 1);
    assert_eq!(
        std::fs::read_to_string(fixture.build().root().join(name)).unwrap(),
        "latin-1 name\n"
    );
    assert_eq!(
        fixture.engine().sync_to("alpha").unwrap().candidates_found,
        0
    );
}

#[test]
fn line_ending_only_difference_is_not_copied() {
    let fixture = Fixture::new();
    fixture.workspace().write("notes.txt", "line one\r\nline two\r\n");
    fixture.build().write("notes.txt", "line one\nline two\n");

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert_eq!(report.candidates_found, 1);
    assert!(report.verified_changes.is_empty());
    assert!(!report.copied);
    assert_eq!(fixture.build().read_string("notes.txt"), "line one\nline two\n");
}

#[test]
fn excluded_directories_never_take_part() {
    let fixture = Fixture::new();
    let workspace = fixture.workspace();
    workspace.write(".git/HEAD", "ref: refs/heads/feature\n");
    workspace.write("lib/.vscode/settings.json", "{\"a\": 1}");
    workspace.write("lib/code.c", "/* code */\n");
    fixture.build().write(".git/HEAD", "ref: refs/heads/main\n");

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert_eq!(report.verified_changes, paths(&["lib/code.c"]));
    assert_eq!(
        fixture.build().read_string(".git/HEAD"),
        "ref: refs/heads/main\n"
    );
    fixture.build().assert_file_not_exists("lib/.vscode/settings.json");
}

#[test]
fn custom_exclusions_apply_to_scan_and_copy() {
    let mut fixture = Fixture::new();
    fixture.settings.exclude = vec!["out*".into()];
    fixture.workspace().write("out-arm/app.elf", "elf");
    fixture.workspace().write(".git/HEAD", "now included");

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert_eq!(report.verified_changes, paths(&[".git/HEAD"]));
    fixture.build().assert_file_not_exists("out-arm/app.elf");
}

#[rstest]
#[case("2", "beta")]
#[case("beta", "beta")]
#[case("3", "gamma")]
fn selector_tokens_resolve(#[case] token: &str, #[case] expected: &str) {
    let roots = SyncRoots::new();
    let settings = Settings {
        build_root: roots.build_root(),
        workspace_root: roots.workspace_root(),
        ..Settings::default()
    };
    let mut registry = Registry::new();
    for name in ["alpha", "beta", "gamma"] {
        registry.register(name, format!("components/{name}")).unwrap();
        roots.build_tree(&format!("components/{name}"));
        roots.workspace_tree(name);
    }

    let report = SyncEngine::new(&settings, registry)
        .unwrap()
        .sync_to(token)
        .unwrap();
    assert_eq!(report.repository, expected);
}

#[rstest]
#[case("4")]
#[case("delta")]
#[case("0")]
fn unknown_tokens_fail_before_any_io(#[case] token: &str) {
    // Roots that do not exist: a scan would fail with ScanFailed instead.
    let settings = Settings {
        build_root: "/nonexistent/reposync/build".into(),
        workspace_root: "/nonexistent/reposync/workspace".into(),
        ..Settings::default()
    };
    let mut registry = Registry::new();
    for name in ["alpha", "beta", "gamma"] {
        registry.register(name, name).unwrap();
    }

    let err = SyncEngine::new(&settings, registry)
        .unwrap()
        .sync_to(token)
        .unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { token: ref t } if t == token));
}

#[derive(Clone, Default)]
struct Calls {
    verify: Arc<AtomicUsize>,
    copy: Arc<AtomicUsize>,
}

struct FixedScanner(Vec<CandidateEntry>);

impl Scanner for FixedScanner {
    fn scan(
        &self,
        _pair: &PathPair,
        _exclusions: &ExclusionSet,
    ) -> reposync_core::Result<ScanOutcome> {
        Ok(ScanOutcome {
            candidates: self.0.clone(),
            destination_only: Vec::new(),
        })
    }
}

struct CountingVerifier {
    calls: Calls,
    confirm: bool,
}

impl Verifier for CountingVerifier {
    fn verify(&self, candidates: &[CandidateEntry], _pair: &PathPair) -> VerifyOutcome {
        self.calls.verify.fetch_add(1, Ordering::SeqCst);
        VerifyOutcome {
            changes: if self.confirm {
                candidates.iter().map(|c| c.path.clone()).collect()
            } else {
                Vec::new()
            },
            warnings: Vec::new(),
        }
    }
}

struct CountingCopier(Calls);

impl Copier for CountingCopier {
    fn copy(
        &self,
        changes: &[RelPath],
        _pair: &PathPair,
        _exclusions: &ExclusionSet,
    ) -> CopyOutcome {
        self.0.copy.fetch_add(1, Ordering::SeqCst);
        CopyOutcome {
            copied: changes.to_vec(),
            ..CopyOutcome::default()
        }
    }

    fn create_dirs(
        &self,
        dirs: &[RelPath],
        _pair: &PathPair,
        _exclusions: &ExclusionSet,
    ) -> CopyOutcome {
        self.0.copy.fetch_add(1, Ordering::SeqCst);
        CopyOutcome {
            created_dirs: dirs.to_vec(),
            ..CopyOutcome::default()
        }
    }
}

fn candidate(path: &str) -> CandidateEntry {
    CandidateEntry {
        path: RelPath::new(path),
        kind: reposync_core::EntryKind::File,
        reason: reposync_core::CandidateReason::Missing,
    }
}

#[test]
fn empty_scan_skips_verify_and_copy() {
    let fixture = Fixture::new();
    let calls = Calls::default();
    let engine = fixture
        .engine()
        .with_scanner(FixedScanner(Vec::new()))
        .with_verifier(CountingVerifier {
            calls: calls.clone(),
            confirm: true,
        })
        .with_copier(CountingCopier(calls.clone()));

    let report = engine.sync_to("alpha").unwrap();

    assert_eq!(report.candidates_found, 0);
    assert_eq!(calls.verify.load(Ordering::SeqCst), 0);
    assert_eq!(calls.copy.load(Ordering::SeqCst), 0);
}

#[test]
fn empty_verification_skips_copy() {
    let fixture = Fixture::new();
    let calls = Calls::default();
    let engine = fixture
        .engine()
        .with_scanner(FixedScanner(vec![candidate("a.txt")]))
        .with_verifier(CountingVerifier {
            calls: calls.clone(),
            confirm: false,
        })
        .with_copier(CountingCopier(calls.clone()));

    let report = engine.sync_to("alpha").unwrap();

    assert_eq!(report.candidates_found, 1);
    assert_eq!(calls.verify.load(Ordering::SeqCst), 1);
    assert_eq!(calls.copy.load(Ordering::SeqCst), 0);
}

#[test]
fn dry_run_verifies_but_writes_nothing() {
    let fixture = Fixture::new();
    fixture.workspace().write("a.txt", "hello\n");
    let calls = Calls::default();
    let engine = fixture
        .engine()
        .with_options(SyncOptions { dry_run: true })
        .with_copier(CountingCopier(calls.clone()));

    let report = engine.sync_to("alpha").unwrap();

    assert!(report.dry_run);
    assert!(!report.copied);
    assert_eq!(report.verified_changes, paths(&["a.txt"]));
    assert_eq!(calls.copy.load(Ordering::SeqCst), 0);
    fixture.build().assert_file_not_exists("a.txt");
}

#[test]
fn failed_copy_does_not_stop_the_others() {
    let fixture = Fixture::new();
    let workspace = fixture.workspace();
    workspace.write("a.txt", "first\n");
    workspace.write("b/inner.txt", "second\n");
    workspace.write("c.txt", "third\n");
    // A file where the destination needs a directory blocks the second copy.
    fixture.build().write("b", "not a directory");

    let err = fixture.engine().sync_to("alpha").unwrap_err();

    let Error::CopyPartialFailure { report } = err else {
        panic!("expected CopyPartialFailure, got {err:?}");
    };
    assert_eq!(report.verified_changes, paths(&["a.txt", "b/inner.txt", "c.txt"]));
    assert_eq!(report.copied_paths, paths(&["a.txt", "c.txt"]));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, RelPath::new("b/inner.txt"));
    assert!(report.copied);
    assert!(!report.is_success());
    assert_eq!(fixture.build().read_string("a.txt"), "first\n");
    assert_eq!(fixture.build().read_string("c.txt"), "third\n");
}

#[test]
fn destination_only_files_are_reported_and_kept() {
    let fixture = Fixture::new();
    fixture.build().write("generated/out.o", "obj");
    fixture.build().write("stale.txt", "old");

    let report = fixture.engine().sync_to("alpha").unwrap();

    assert!(report.verified_changes.is_empty());
    assert_eq!(report.destination_only, paths(&["generated", "stale.txt"]));
    fixture.build().assert_file_exists("stale.txt");
    fixture.build().assert_file_exists("generated/out.o");
}

#[test]
fn missing_workspace_checkout_fails_the_scan() {
    let roots = SyncRoots::new();
    let settings = Settings {
        build_root: roots.build_root(),
        workspace_root: roots.workspace_root(),
        ..Settings::default()
    };
    roots.build_tree("components/alpha");
    let mut registry = Registry::new();
    registry.register("alpha", "components/alpha").unwrap();

    let err = SyncEngine::new(&settings, registry)
        .unwrap()
        .sync_to("alpha")
        .unwrap_err();
    assert!(matches!(err, Error::ScanFailed { .. }));
}

#[test]
fn file_copier_counts_bytes() {
    let fixture = Fixture::new();
    fixture.workspace().write("x.txt", "x");
    let report = fixture
        .engine()
        .with_copier(FileCopier::new())
        .sync_to("alpha")
        .unwrap();
    assert_eq!(report.bytes_copied, 1);
}

#[test]
fn report_json_shape() {
    let fixture = Fixture::new();
    fixture.workspace().write("a.txt", "hello\n");
    fixture.build().write("only-here.txt", "kept");

    let report = fixture.engine().sync_to("alpha").unwrap();

    insta::assert_json_snapshot!("a_txt_report", report, {
        ".source" => "[source]",
        ".destination" => "[destination]",
        ".started_at" => "[started_at]",
        ".elapsed" => "[elapsed]",
    });
}

//! Hash de workspace y reanudación.

use asm_core::workspace::{workspace_hash, RunHandle};

fn files(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn hash_is_deterministic_and_sensitive() {
    let a = workspace_hash(&files(&["r1.fq", "r2.fq"]), "--threads 4 -k 14");
    assert_eq!(a, workspace_hash(&files(&["r1.fq", "r2.fq"]), "--threads 4 -k 14"));
    assert_ne!(a, workspace_hash(&files(&["r2.fq", "r1.fq"]), "--threads 4 -k 14"));
    assert_ne!(a, workspace_hash(&files(&["r1.fq", "r3.fq"]), "--threads 4 -k 14"));
    assert_ne!(a, workspace_hash(&files(&["r1.fq", "r2.fq"]), "--threads 4 -k 15"));
}

#[test]
fn identical_invocation_resumes_same_workspace() {
    let base = tempfile::tempdir().unwrap();
    let inputs = files(&["r1.fq", "out.fa"]);
    let first = RunHandle::open(base.path(), &inputs, "--zdrop 200", false).unwrap();
    assert!(!first.resumed);
    assert!(first.workspace.is_absolute());
    std::fs::write(first.workspace.join("stage1.done"), "ok").unwrap();

    let second = RunHandle::open(base.path(), &inputs, "--zdrop 200", false).unwrap();
    assert!(second.resumed);
    assert_eq!(second.workspace, first.workspace);
    // salidas parciales intactas
    assert!(second.workspace.join("stage1.done").exists());

    let changed = RunHandle::open(base.path(), &inputs, "--zdrop 100", false).unwrap();
    assert_ne!(changed.workspace, first.workspace);
}

#[test]
fn reuse_latest_ignores_arguments() {
    let base = tempfile::tempdir().unwrap();
    let first = RunHandle::open(base.path(), &files(&["a.fq", "out.fa"]), "-k 14", false).unwrap();
    let again = RunHandle::open(base.path(), &files(&["other.fq", "x.fa"]), "-k 99", true).unwrap();
    assert!(again.from_latest);
    assert_eq!(again.hash, first.hash);
    assert_eq!(again.workspace, first.workspace);
}

#[test]
fn manifest_written_once() {
    let base = tempfile::tempdir().unwrap();
    let inputs = files(&["a.fq", "out.fa"]);
    let first = RunHandle::open(base.path(), &inputs, "-k 14", false).unwrap();
    let m1 = first.read_manifest().expect("manifest");
    assert_eq!(m1.hash, first.hash);
    assert_eq!(m1.inputs, inputs);
    let second = RunHandle::open(base.path(), &inputs, "-k 14", false).unwrap();
    assert_eq!(second.read_manifest().unwrap().created_at, m1.created_at);
}

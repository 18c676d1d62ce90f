//! Integration tests for the ccgraph binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn ccgraph() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ccgraph"))
}

fn run(args: &[&std::ffi::OsStr]) -> Output {
    ccgraph().args(args).output().expect("Failed to execute ccgraph")
}

#[test]
fn test_cli_help() {
    let output = ccgraph().arg("--help").output().expect("Failed to execute ccgraph");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("cscope database"));
    assert!(stdout.contains("--graph"));
    assert!(stdout.contains("--all-functions"));
}

#[test]
fn test_missing_database_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("cscope.out");

    let output = run(&[database.as_os_str()]);

    assert!(!output.status.success());
    assert!(!dir.path().join(".callcallgraph.json").exists());
    assert!(!dir.path().join("callgraph.dot").exists());
}

/// A stand-in for cscope that answers a handful of line-oriented queries.
/// Arguments arrive as `-d -l -L -<mode> <pattern>`.
#[cfg(unix)]
fn fake_cscope(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-cscope");
    std::fs::write(
        &script,
        r#"#!/bin/sh
case "$4$5" in
  -1main) echo "app/main.c main 3 int main(void)" ;;
  -1helper) echo "util/helper.c helper 1 void helper(void)" ;;
  -1log) echo "log.h log 2 void log(void);" ;;
  -2main)
    echo "app/main.c helper 4 helper();"
    echo "app/main.c log 5 log();"
    ;;
  -2helper) ;;
  *) ;;
esac
exit 0
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("cscope.out");
    std::fs::write(&database, b"").unwrap();
    let script = fake_cscope(dir.path());
    (dir, database, script)
}

#[cfg(unix)]
#[test]
fn test_call_graph_from_root() {
    let (dir, database, script) = workspace();

    let output = run(&[
        database.as_os_str(),
        "--cscope".as_ref(),
        script.as_os_str(),
        "--graph".as_ref(),
        "call".as_ref(),
        "--root".as_ref(),
        "main".as_ref(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let dot = std::fs::read_to_string(dir.path().join("callgraph.dot")).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("main"));
    assert!(dot.contains("helper"));
    // log is only declared in a header, so it never becomes a node
    assert!(!dot.contains("log"));
    assert!(dot.contains("->"));

    assert!(dir.path().join(".callcallgraph.json").exists());
    assert!(!dir.path().join("filegraph.dot").exists());
}

#[cfg(unix)]
#[test]
fn test_file_and_folder_graphs_into_output_dir() {
    let (dir, database, script) = workspace();
    let out = dir.path().join("graphs");

    let output = run(&[
        database.as_os_str(),
        "--cscope".as_ref(),
        script.as_os_str(),
        "-g".as_ref(),
        "file".as_ref(),
        "-g".as_ref(),
        "folder".as_ref(),
        "--root".as_ref(),
        "main".as_ref(),
        "-o".as_ref(),
        out.as_os_str(),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let files = std::fs::read_to_string(out.join("filegraph.dot")).unwrap();
    assert!(files.contains("main.c"));
    assert!(files.contains("helper.c"));
    assert!(files.contains("4:helper"));

    let folders = std::fs::read_to_string(out.join("foldergraph.dot")).unwrap();
    assert!(folders.contains(r#"label = "app""#));
    assert!(folders.contains(r#"label = "util""#));
    assert!(folders.contains("main.c:helper"));

    assert!(!out.join("callgraph.dot").exists());
}

#[cfg(unix)]
#[test]
fn test_unresolvable_root_writes_nothing() {
    let (dir, database, script) = workspace();

    let output = run(&[
        database.as_os_str(),
        "--cscope".as_ref(),
        script.as_os_str(),
        "--root".as_ref(),
        "nowhere".as_ref(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nowhere"));
    for projection in ["callgraph.dot", "filegraph.dot", "foldergraph.dot"] {
        assert!(!dir.path().join(projection).exists());
    }
}

#[cfg(unix)]
#[test]
fn test_failing_indexer_writes_nothing() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let database = dir.path().join("cscope.out");
    std::fs::write(&database, b"").unwrap();
    let script = dir.path().join("broken-cscope");
    std::fs::write(&script, "#!/bin/sh\necho 'cscope: cannot read database' >&2\nexit 2\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = run(&[
        database.as_os_str(),
        "--cscope".as_ref(),
        script.as_os_str(),
        "--root".as_ref(),
        "main".as_ref(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read database"));
    for projection in ["callgraph.dot", "filegraph.dot", "foldergraph.dot"] {
        assert!(!dir.path().join(projection).exists());
    }
}

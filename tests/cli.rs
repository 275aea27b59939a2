use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const DOC: &str = "# Notes\n\n```go {.wrap}\nfunc a() {}\nfunc b() {}\nfunc c() {}\n```\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents.as_bytes()).unwrap();
    path
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn hllines_inplace_highlight_prints_fence_line() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", DOC);

    let bin = env!("CARGO_BIN_EXE_hllines");
    let out = Command::new(bin)
        .arg(&file)
        .arg("highlight")
        .arg("4-5")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "3  ```go {.wrap,hl_lines=[\"1-2\"]}\n");
    assert_eq!(
        read_file(&file),
        "# Notes\n\n```go {.wrap,hl_lines=[\"1-2\"]}\nfunc a() {}\nfunc b() {}\nfunc c() {}\n```\n"
    );
}

#[test]
fn hllines_toggle_twice_restores_empty_attribute() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", DOC);
    let bin = env!("CARGO_BIN_EXE_hllines");

    for _ in 0..2 {
        let out = Command::new(bin)
            .arg(&file)
            .arg("toggle")
            .arg("6")
            .output()
            .unwrap();
        assert!(out.status.success());
    }

    assert!(read_file(&file).contains("```go {.wrap,hl_lines=[]}\n"));
}

#[test]
fn hllines_dry_run_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", DOC);

    let bin = env!("CARGO_BIN_EXE_hllines");
    let out = Command::new(bin)
        .arg("--dry-run")
        .arg(&file)
        .arg("highlight")
        .arg("4")
        .arg("6:6")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "3  ```go {.wrap,hl_lines=[\"1\",\"3\"]}\n");
    assert_eq!(read_file(&file), DOC);
}

#[test]
fn hllines_rejects_selection_outside_code_block() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", DOC);

    let bin = env!("CARGO_BIN_EXE_hllines");
    let out = Command::new(bin)
        .arg(&file)
        .arg("highlight")
        .arg("1-4")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("not inside a single fenced code block"));
    assert_eq!(read_file(&file), DOC);
}

#[test]
fn hllines_rejects_selection_past_end_of_unterminated_block() {
    let bin = env!("CARGO_BIN_EXE_hllines");

    let mut child = Command::new(bin)
        .arg("--stdin")
        .arg("-")
        .arg("highlight")
        .arg("2-4000000000")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(b"```rust\nfn main() {}\n").unwrap();
    }

    let out = child.wait_with_output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("not inside a single fenced code block"));
}

#[test]
fn hllines_rejects_bad_selection_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", DOC);

    let bin = env!("CARGO_BIN_EXE_hllines");
    let out = Command::new(bin)
        .arg(&file)
        .arg("highlight")
        .arg("four")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert_eq!(read_file(&file), DOC);
}

#[test]
fn hllines_rejects_binary_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("f.bin");
    fs::write(&file, b"```\0\nx\n```\n").unwrap();

    let bin = env!("CARGO_BIN_EXE_hllines");
    let out = Command::new(bin)
        .arg(&file)
        .arg("highlight")
        .arg("2")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn hllines_stdin_mode_prints_full_document() {
    let bin = env!("CARGO_BIN_EXE_hllines");

    let mut child = Command::new(bin)
        .arg("--stdin")
        .arg("-")
        .arg("unhighlight")
        .arg("3")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin
            .write_all(b"```py {HL_LINES=[1, 2], linenos=table}\na\nb\n```\n")
            .unwrap();
    }

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        stdout,
        "```py {hl_lines=[\"1\"], linenos=table}\na\nb\n```\n"
    );
}

#[test]
fn hlview_marks_highlighted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(
        &dir,
        "doc.md",
        "text\n```go {hl_lines=[\"2-3\"]}\na\nb\nc\n```\n",
    );

    let bin = env!("CARGO_BIN_EXE_hlview");
    let out = Command::new(bin)
        .current_dir(dir.path())
        .arg(&file)
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected = [
        "  1  text",
        "  2  ```go {hl_lines=[\"2-3\"]}",
        "  3  a",
        "> 4  b",
        "> 5  c",
        "  6  ```",
    ]
    .join("\n")
        + "\n";
    assert_eq!(stdout, expected);

    // Range 4..5
    let out = Command::new(bin)
        .current_dir(dir.path())
        .arg(&file)
        .arg("4")
        .arg("5")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "> 4  b\n> 5  c\n");
}

#[test]
fn hlview_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", "```sh {hl_lines=1}\nls\n```\n");
    write_file(&dir, ".hllines.toml", "marker = \"##\"\nline_numbers = false\n");

    let bin = env!("CARGO_BIN_EXE_hlview");
    let out = Command::new(bin)
        .current_dir(dir.path())
        .arg(&file)
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "   ```sh {hl_lines=1}\n## ls\n   ```\n");
}

#[test]
fn hlview_rejects_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(&dir, "doc.md", "x\n");

    let bin = env!("CARGO_BIN_EXE_hlview");
    let out = Command::new(bin)
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

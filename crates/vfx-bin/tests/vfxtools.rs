use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const RENDER_DOCUMENT: &str = "[Version]
version = 1

[DrawState]
vertex = 3
topology = VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST

[VertexShader]
void main() {}
";

fn write_document<C: AsRef<[u8]>>(
    dir: &tempfile::TempDir,
    file_name: &str,
    content: C,
) -> std::path::PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn incorrect_extension() {
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["check", "incorrect_extension.rs"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "the file extension must be .vfx or .pipe but it is .rs",
    ));
}

#[test]
fn missing_extension() {
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["print", "no_extension"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "the file extension must be .vfx or .pipe but it is missing",
    ));
}

#[test]
fn invalid_macro_definition() {
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["check", "-D", "=3", "a.vfx"]);
    cmd.assert().failure().stderr(predicate::str::contains(
        "must have the form NAME=VALUE or NAME",
    ));
}

#[test]
fn check_valid_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(&dir, "valid.vfx", RENDER_DOCUMENT);
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.arg("check").arg(&path);
    cmd.assert().success();
}

#[test]
fn check_invalid_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(&dir, "invalid.vfx", "[DrawState]\nvertex = x\n");
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.arg("check").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("is not a number"))
        .stderr(predicate::str::contains("Check failure: 1 error(s)"));
}

#[test]
fn check_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing.pipe");
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.arg("check").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn print_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(&dir, "print.vfx", RENDER_DOCUMENT);
    let output = Command::cargo_bin("vfxtools")
        .unwrap()
        .arg("print")
        .arg(&path)
        .output()
        .unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(output.status.success(), "failed to print: {}", stderr);
    let stdout = String::from_utf8(output.stdout).unwrap();
    similar_asserts::assert_eq!(
        stdout,
        "[Version]\nversion = 1\n\n[DrawState]\nvertex = 3\ntopology = 3\n\n[VertexShader]\nvoid main() {}\n"
    );
}

#[test]
fn print_keeps_non_utf8_shader_bytes() {
    let dir = tempfile::TempDir::new().unwrap();
    let content: &[u8] = b"[VertexShader]\n// caf\xe9\nvoid main() {}\n";
    let path = write_document(&dir, "latin1.vfx", content);
    let output = Command::cargo_bin("vfxtools")
        .unwrap()
        .arg("print")
        .arg(&path)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(output.status.success(), "failed to print: {}", stderr);
    similar_asserts::assert_eq!(output.stdout, content.to_vec());
}

#[test]
fn check_reports_non_utf8_key_value_line() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "latin1.vfx",
        b"[VertexShader]\n// caf\xe9\n[DrawState]\nvs = caf\xe9\n",
    );
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.arg("check").arg(&path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(":4: the line is not valid UTF-8"))
        .stderr(predicate::str::contains("Check failure: 1 error(s)"));
}

#[test]
fn print_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(&dir, "print.vfx", RENDER_DOCUMENT);
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["print", "--json"]).arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"vertex\": 3"))
        .stdout(predicate::str::contains("\"topology\": 3"));
}

#[test]
fn print_with_macros() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "macros.vfx",
        "[DrawState]\nvertex = NUM_VERTICES\ninstance = #INSTANCES\n",
    );
    let output = Command::cargo_bin("vfxtools")
        .unwrap()
        .args(["print", "-D", "NUM_VERTICES=6", "--define", "#INSTANCES"])
        .arg(&path)
        .output()
        .unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(output.status.success(), "failed to print: {}", stderr);
    let stdout = String::from_utf8(output.stdout).unwrap();
    similar_asserts::assert_eq!(stdout, "[DrawState]\ninstance = 1\nvertex = 6\n");
}

#[test]
fn enums_with_prefix() {
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["enums", "VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST = 3"));
}

#[test]
fn enums_unknown_prefix() {
    let mut cmd = Command::cargo_bin("vfxtools").unwrap();
    cmd.args(["enums", "NOT_AN_ENUM_"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no enum names start with `NOT_AN_ENUM_`"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
    dir
}

#[test]
fn formats_stdin() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).write_stdin("foo   1 ,2\n\n\nbar");

    cmd.assert().success().stdout("foo 1, 2\nbar\n");
}

#[test]
fn prints_formatted_file() {
    let dir = workspace(&[("build.gradle", "apply   'java'\n")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("build.gradle");

    cmd.assert().success().stdout("apply 'java'\n");
}

#[test]
fn check_reports_unformatted_files() {
    let dir = workspace(&[("a.groovy", "foo  1\n"), ("b.groovy", "bar 2\n")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("--check").arg(".");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("a.groovy"))
        .stderr(predicate::str::contains("b.groovy").not());
}

#[test]
fn check_passes_on_formatted_files() {
    let dir = workspace(&[("Main.groovy", "println 'hi'\n")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("--check").arg("Main.groovy");

    cmd.assert().success();
}

#[test]
fn write_rewrites_in_place() {
    let dir = workspace(&[("src/Main.groovy", "println   'hi' ;  exit 0")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("--write").arg("src");

    cmd.assert().success();
    let contents = fs::read_to_string(dir.path().join("src/Main.groovy")).unwrap();
    assert_eq!(contents, "println 'hi'\nexit 0\n");
}

#[test]
fn write_leaves_files_it_cannot_print_untouched() {
    let source = "foo  1\ndef x = 1\nbar(2)\n";
    let dir = workspace(&[("partial.groovy", source), ("plain.groovy", "baz   3")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("--write").arg(".");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("not writing"))
        .stderr(predicate::str::contains("partial.groovy"));
    let partial = fs::read_to_string(dir.path().join("partial.groovy")).unwrap();
    assert_eq!(partial, source);
    let plain = fs::read_to_string(dir.path().join("plain.groovy")).unwrap();
    assert_eq!(plain, "baz 3\n");
}

#[test]
fn directory_walk_skips_other_extensions() {
    let dir = workspace(&[("notes.txt", "not   groovy ((("), ("ok.gradle", "ok 1\n")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("--check").arg(".");

    cmd.assert().success();
}

#[test]
fn syntax_error_exits_with_2() {
    let dir = workspace(&[("broken.groovy", "ok 1\nfoo(")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).arg("broken.groovy");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Syntax error at 2:5"))
        .stderr(predicate::str::contains(">>"));
}

#[test]
fn token_stage_prints_json() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path())
        .args(["--stage", "tokens"])
        .write_stdin("foo 1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"Identifier\""))
        .stdout(predicate::str::contains("\"kind\": \"IntegerLiteral\""));
}

#[test]
fn cst_stage_prints_treeviz() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path())
        .args(["--stage", "cst"])
        .write_stdin("foo 1");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ CompilationUnit"));
}

#[test]
fn cst_json_stage_prints_tree_as_json() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path())
        .args(["--stage", "cst-json"])
        .write_stdin("foo 1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"CompilationUnit\""))
        .stdout(predicate::str::contains("\"kind\": \"CommandExpression\""));
}

#[test]
fn check_only_applies_to_format_stage() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path())
        .args(["--stage", "doc", "--check"])
        .write_stdin("foo");

    cmd.assert().code(2);
}

#[test]
fn invalid_config_is_reported() {
    let dir = workspace(&[("groovy-fmt.toml", "[format]\nprint_width = \"wide\"\n")]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path()).write_stdin("foo");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = workspace(&[]);
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.current_dir(dir.path())
        .args(["--config", "absent.toml"])
        .write_stdin("foo");

    cmd.assert().code(2);
}

#[test]
fn unknown_stage_is_rejected() {
    let mut cmd = cargo_bin_cmd!("groovy-fmt");
    cmd.args(["--stage", "ast"]).write_stdin("foo");

    cmd.assert().failure();
}

// Drives the binary's non-interactive paths: argument validation, word list
// loading and `--list`. None of these need a TTY.

use assert_cmd::Command;

fn kobun() -> Command {
    let mut cmd = Command::cargo_bin("kobun").unwrap();
    // keep config, history and logs out of the real home directory
    let home = tempfile::tempdir().unwrap().into_path();
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"));
    cmd
}

#[test]
fn inverted_range_is_rejected_before_anything_runs() {
    let output = kobun()
        .args(["--range-start", "1", "--range-end", "0", "--list"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not exceed"), "stderr: {stderr}");
}

#[test]
fn question_count_out_of_bounds_is_rejected() {
    let output = kobun().args(["-q", "51", "--list"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("between 1 and 50"));
}

#[test]
fn list_prints_bundled_range() {
    let output = kobun()
        .args(["--range-start", "2", "--range-end", "3", "--list"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout
        .lines()
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| *id == "2" || *id == "3"));
}

#[test]
fn list_reads_custom_word_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");
    std::fs::write(
        &path,
        "No.,古文単語,意味\n7,あはれなり,しみじみとした趣\n8,をかし,趣がある\n",
    )
    .unwrap();

    let output = kobun()
        .args(["--list", "--range-start", "1", "--range-end", "100", "-f"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.starts_with("7\t"));
}

#[test]
fn headerless_file_keeps_its_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");
    std::fs::write(&path, "あはれ,しみじみとした趣\nをかし,趣がある\n").unwrap();

    let output = kobun()
        .args(["--list", "--chunk", "1", "--no-header", "-f"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("1\tあはれ\tしみじみとした趣"));
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn missing_word_file_is_an_error() {
    let output = kobun()
        .args(["--list", "-f", "/definitely/not/here.csv"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("here.csv"));
}

#[test]
fn empty_range_lists_nothing() {
    let output = kobun()
        .args(["--range-start", "900", "--range-end", "950", "--list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no words"));
}

#[test]
fn non_tty_stdin_is_refused() {
    let output = kobun().write_stdin("").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("stdin must be a tty"));
}

/// End-to-end tests: run the `jsoncorpus` binary against temp directories.
use std::path::Path;
use std::process::Command;

/// Run jsoncorpus with args and return (exit_code, stdout, stderr).
fn jsoncorpus(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsoncorpus"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run jsoncorpus");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("temp path is not UTF-8")
}

/// Pull the number after `label` out of `check` output.
fn field(stdout: &str, label: &str) -> usize {
    stdout
        .lines()
        .find_map(|l| l.strip_prefix(label))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("no {label:?} in output:\n{stdout}"))
}

// ===========================================================================
// generate
// ===========================================================================

/// Writes 100k files; run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn generate_full_corpus() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("generated");

    let (code, stdout, stderr) = jsoncorpus(&["generate", "--out", path_str(&out), "--seed", "1"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(
        stdout.trim(),
        format!("Generated 100000 JSON files in {}", out.display())
    );

    let files = std::fs::read_dir(&out).unwrap().count();
    assert_eq!(files, 100_000);
    assert!(out.join("text_00000.json").is_file());
    assert!(out.join("text_99999.json").is_file());

    let (code, stdout, stderr) = jsoncorpus(&["check", path_str(&out)]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(field(&stdout, "files:"), 100_000);
    let syntax = field(&stdout, "syntax:");
    let missing = field(&stdout, "missing text:");
    let malformed = syntax + missing;
    // 1% of 100k is 1000; binomial sd is ~31.
    assert!((800..1200).contains(&malformed), "malformed {malformed}");
    assert!(syntax > 350 && missing > 350, "uneven split {syntax}/{missing}");
    assert_eq!(field(&stdout, "valid:") + malformed, 100_000);
}

#[test]
#[ignore]
fn generate_seeded_is_reproducible() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for dir in [a.path(), b.path()] {
        let (code, _, stderr) = jsoncorpus(&["generate", "-o", path_str(dir), "--seed", "42"]);
        assert_eq!(code, 0, "stderr: {stderr}");
    }
    for name in ["text_00000.json", "text_01234.json", "text_99999.json"] {
        assert_eq!(
            std::fs::read(a.path().join(name)).unwrap(),
            std::fs::read(b.path().join(name)).unwrap(),
            "{name} differs"
        );
    }
}

#[test]
#[ignore]
fn generate_unseeded_runs_differ() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    for dir in [a.path(), b.path()] {
        let (code, _, stderr) = jsoncorpus(&["generate", "--out", path_str(dir)]);
        assert_eq!(code, 0, "stderr: {stderr}");
    }
    let differs = (0..50).any(|i| {
        let name = format!("text_{i:05}.json");
        std::fs::read(a.path().join(&name)).unwrap()
            != std::fs::read(b.path().join(&name)).unwrap()
    });
    assert!(differs, "two unseeded runs wrote identical files");
}

#[test]
fn generate_into_file_path_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("occupied");
    std::fs::write(&blocker, "not a dir").unwrap();

    let (code, stdout, stderr) = jsoncorpus(&["generate", "--out", path_str(&blocker)]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("occupied"), "stderr: {stderr}");
}

// ===========================================================================
// check
// ===========================================================================

fn handwritten_corpus(d: &Path) {
    std::fs::write(
        d.join("text_00000.json"),
        r#"{"text": "The cat saw the dog. The dog ran!"}"#,
    )
    .unwrap();
    std::fs::write(d.join("text_00001.json"), r#"{ "text": "broken json without closing brace" "#)
        .unwrap();
    std::fs::write(d.join("text_00002.json"), r#"{"title": "no text field here"}"#).unwrap();
}

#[test]
fn check_handwritten_corpus() {
    let tmp = tempfile::tempdir().unwrap();
    let d = tmp.path();
    handwritten_corpus(d);

    let (code, stdout, stderr) = jsoncorpus(&["check", "--list", "--top", "2", path_str(d)]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(field(&stdout, "files:"), 3);
    assert_eq!(field(&stdout, "valid:"), 1);
    assert_eq!(field(&stdout, "syntax:"), 1);
    assert_eq!(field(&stdout, "missing text:"), 1);
    assert_eq!(field(&stdout, "words:"), 8);
    assert_eq!(field(&stdout, "sentences:"), 2);
    assert_eq!(field(&stdout, "unique words:"), 5);

    assert!(stdout.contains("top 2 words:"), "{stdout}");
    assert!(stdout.contains("the                   | 3\ndog                   | 2\n"), "{stdout}");
    assert!(!stdout.contains("without stop words"));
    assert!(stdout.contains("3      | 8\n"), "{stdout}");

    assert!(stdout.contains("text_00001.json"));
    assert!(stdout.contains("text_00002.json"));
    assert!(!stdout.contains("text_00000.json"));
}

#[test]
fn check_with_stop_words() {
    let tmp = tempfile::tempdir().unwrap();
    let corpus = tmp.path().join("corpus");
    std::fs::create_dir(&corpus).unwrap();
    handwritten_corpus(&corpus);
    let stops = tmp.path().join("stops.json");
    std::fs::write(&stops, r#"["THE", {"stop": "dog"}]"#).unwrap();

    let (code, stdout, stderr) = jsoncorpus(&[
        "check",
        "--top",
        "1",
        "--stops",
        path_str(&stops),
        path_str(&corpus),
    ]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let (_, filtered) = stdout
        .split_once("top 1 words (without stop words):")
        .unwrap_or_else(|| panic!("no stop-word table:\n{stdout}"));
    assert!(filtered.contains("cat                   | 1"), "{stdout}");
    assert!(!filtered.contains("the                   |"), "{stdout}");
}

#[test]
fn check_missing_stops_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    handwritten_corpus(tmp.path());
    let missing = tmp.path().join("nope.json");
    let (code, _, stderr) =
        jsoncorpus(&["check", "--stops", path_str(&missing), path_str(tmp.path())]);
    assert_eq!(code, 1);
    assert!(stderr.contains("failed to read stop words"), "stderr: {stderr}");
}

#[test]
fn check_missing_dir_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("absent");
    let (code, _, stderr) = jsoncorpus(&["check", path_str(&missing)]);
    assert_eq!(code, 1);
    assert!(stderr.contains("failed to read directory"), "stderr: {stderr}");
}

// ===========================================================================
// CLI surface
// ===========================================================================

#[test]
fn no_subcommand_is_usage_error() {
    let (code, _, stderr) = jsoncorpus(&[]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn unknown_flag_is_usage_error() {
    let (code, _, _) = jsoncorpus(&["generate", "--count", "5"]);
    assert_eq!(code, 2);
}

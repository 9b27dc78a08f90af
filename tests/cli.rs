//! End-to-end tests of the `scripture-reader` binary against the fixture site.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn fixture_site() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn run(site: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scripture-reader"))
        .arg("--site")
        .arg(site)
        .args(args)
        .output()
        .expect("failed to run scripture-reader")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn books_in_manifest_order() {
    let out = run(&fixture_site(), &["books"]);
    assert!(out.status.success());
    let lines: Vec<String> = stdout(&out).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "001 Genesis (2 chapters)",
            "002 Exodus (40 chapters)",
            "003 Psalms (150 chapters)",
            "004 Obadiah (1 chapter)",
        ]
    );
}

#[test]
fn chapters_of_single_chapter_book_are_disabled() {
    let out = run(&fixture_site(), &["chapters", "Obadiah"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Obadiah (disabled)\n    1\n");
}

#[test]
fn read_applies_display_flags() {
    let out = run(
        &fixture_site(),
        &["read", "Psalms", "23", "--divine-name", "Yahweh", "--pronouns"],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Psalm 23\n"));
    assert!(text.contains("1 The Yahweh is my shepherd; I shall not want."));
    assert!(text.contains("2 He maketh me to lie down in green pastures: He leadeth me"));
}

#[test]
fn no_pronouns_overrides_config() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data/Psalms");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::copy(
        fixture_site().join("data/chapters.json"),
        tmp.path().join("data/chapters.json"),
    )
    .unwrap();
    std::fs::copy(fixture_site().join("data/Psalms/23.json"), data.join("23.json")).unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "[display]\npronoun_emphasis = true\n",
    )
    .unwrap();

    let out = run(tmp.path(), &["read", "Psalms", "23"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("2 He maketh me to lie down in green pastures: He leadeth me"));

    let out = run(tmp.path(), &["read", "Psalms", "23", "--no-pronouns"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("2 he maketh me to lie down in green pastures: he leadeth me"));

    let out = run(tmp.path(), &["read", "Psalms", "23", "--no-pronouns", "--pronouns"]);
    assert!(stdout(&out).contains("2 He maketh me"));
}

#[test]
fn read_missing_chapter_prints_failure_notice() {
    let out = run(&fixture_site(), &["read", "Exodus", "1"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Failed to load chapter. Please try again.\n");
}

#[test]
fn read_unknown_book_fails() {
    let out = run(&fixture_site(), &["read", "Hezekiah"]);
    assert!(!out.status.success());
}

#[test]
fn render_writes_html_page() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("obadiah.html");
    let out = run(
        &fixture_site(),
        &["render", "Obadiah", "--latina", "--output", file.to_str().unwrap()],
    );
    assert!(out.status.success());

    let html = std::fs::read_to_string(&file).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h3>Obadiah</h3>"));
    assert!(html.contains(r#"<select id="chapter" disabled>"#));
    assert!(html.contains(r#"src="images/vibe.png""#));
}

#[test]
fn check_fixture_site() {
    let out = run(&fixture_site(), &["check"]);
    assert!(!out.status.success(), "fixture site lacks most chapters");

    let out = run(&fixture_site(), &["check", "--allow-missing"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("4 of 193 chapter documents checked"));
}

#[test]
fn missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["books"]);
    assert!(!out.status.success());
}

#[test]
fn gen_config_prints_stock_file() {
    let out = run(&fixture_site(), &["gen-config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("divine_name = \"LORD\""));
}

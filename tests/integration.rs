use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn campus_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("campus-search");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let seed_dir = root.join("seed");
    fs::create_dir_all(&seed_dir).unwrap();
    fs::write(
        seed_dir.join("programs.json"),
        r#"[
  {
    "_id": "p1",
    "slug": "bsc-cse",
    "title": "B.Sc. in Computer Science & Engineering (CSE)",
    "shortName": "CSE",
    "description": "A four-year program covering algorithms, systems and software engineering.",
    "highlights": ["ACM student chapter", "Robotics lab"],
    "details": { "duration": "4 Years" }
  },
  {
    "_id": "p2",
    "slug": "bba",
    "title": "Bachelor of Business Administration",
    "shortName": "BBA",
    "description": "Management, finance and marketing.",
    "details": { "duration": "4 Years" }
  }
]"#,
    )
    .unwrap();
    fs::write(
        seed_dir.join("news.json"),
        r#"[
  { "slug": "cse-fest-2024", "title": "CSE Fest 2024", "excerpt": "Hackathon, robotics and programming contests." },
  { "slug": "convocation", "title": "Tenth Convocation", "excerpt": "Over 2,000 graduates received degrees." }
]"#,
    )
    .unwrap();
    fs::write(
        seed_dir.join("admissions.json"),
        r#"{
  "_id": "admissions-page",
  "faqs": [
    { "id": "seats", "question": "How many CSE seats are available?", "answer": "120 seats per intake." }
  ]
}"#,
    )
    .unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/campus.sqlite"

[server]
bind = "127.0.0.1:0"

[search]
default_limit = 10
"#,
        root.display()
    );

    let config_path = config_dir.join("campus.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_campus(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = campus_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run campus-search at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn seed_dir(config_path: &Path) -> String {
    config_path
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("seed")
        .display()
        .to_string()
}

fn seeded_env() -> (TempDir, PathBuf) {
    let (tmp, config_path) = setup_test_env();
    let (stdout, stderr, success) = run_campus(&config_path, &["import", "--dir", &seed_dir(&config_path)]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    (tmp, config_path)
}

#[test]
fn test_init_creates_database() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_campus(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, first) = run_campus(&config_path, &["init"]);
    assert!(first, "First init failed");
    let (_, _, second) = run_campus(&config_path, &["init"]);
    assert!(second, "Second init failed (not idempotent)");
}

#[test]
fn test_import_dir() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_campus(&config_path, &["import", "--dir", &seed_dir(&config_path)]);
    assert!(success, "import failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("files: 3"));
    assert!(stdout.contains("upserted documents: 5"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_import_single_file_idempotent() {
    let (_tmp, config_path) = setup_test_env();
    let file = format!("{}/programs.json", seed_dir(&config_path));

    let (_, _, first) = run_campus(&config_path, &["import", "programs", &file]);
    assert!(first);
    let (_, _, second) = run_campus(&config_path, &["import", "programs", &file]);
    assert!(second);

    let (stdout, _, success) = run_campus(&config_path, &["sources"]);
    assert!(success);
    let programs_line = stdout.lines().find(|l| l.starts_with("program")).unwrap();
    assert!(programs_line.trim_end().ends_with(" 2"), "line: {}", programs_line);
}

#[test]
fn test_import_invalid_json_fails() {
    let (tmp, config_path) = setup_test_env();
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();

    let (_, stderr, success) = run_campus(&config_path, &["import", "news", bad.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Invalid JSON"));
}

#[test]
fn test_sources_lists_registry() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, stderr, success) = run_campus(&config_path, &["sources"]);
    assert!(success, "sources failed: {}", stderr);
    for collection in ["programs", "news", "faculty", "notices", "admissions", "studentLife", "careers"] {
        assert!(stdout.contains(collection), "missing {}", collection);
    }
    assert!(stdout.contains("single:admissions-page/faqs"));
}

#[test]
fn test_search_ranks_program_first() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, stderr, success) = run_campus(&config_path, &["search", "cse"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    let first = stdout.lines().next().unwrap();
    assert!(first.starts_with("1. [125] program"), "first line: {}", first);
    assert!(stdout.contains("path: /programs/bsc-cse"));
    assert!(stdout.contains("path: /admissions#faq-seats"));
}

#[test]
fn test_search_json_limit_and_total() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, stderr, success) = run_campus(&config_path, &["search", "cse", "--limit", "2", "--json"]);
    assert!(success, "search failed: {}", stderr);
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    // program, news, faq
    assert_eq!(body["total"], 3);
    assert_eq!(body["query"], "cse");
}

#[test]
fn test_search_deterministic() {
    let (_tmp, config_path) = seeded_env();

    let (first, _, _) = run_campus(&config_path, &["search", "robotics"]);
    let (second, _, _) = run_campus(&config_path, &["search", "robotics"]);
    assert_eq!(first, second);
}

#[test]
fn test_search_short_query() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, _, success) = run_campus(&config_path, &["search", "a"]);
    assert!(success);
    assert!(stdout.contains("Query must be at least 2 characters"));
}

#[test]
fn test_search_no_results() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, _, success) = run_campus(&config_path, &["search", "xyzzyplugh"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_matches_nested_field() {
    let (_tmp, config_path) = seeded_env();

    let (stdout, _, success) = run_campus(&config_path, &["search", "4 years", "--json"]);
    assert!(success);
    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["total"], 2);
    for result in body["results"].as_array().unwrap() {
        assert_eq!(result["type"], "program");
        assert_eq!(result["score"], 10);
    }
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_campus(&tmp.path().join("nope.toml"), &["init"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tiles_json(args: &[&str]) -> serde_json::Value {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("tiles").arg(fixture_path("tiles.csv")).args(args);
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn slugs(entry: &serde_json::Value, key: &str) -> Vec<String> {
    entry[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["slug"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn tiles_lists_lane_in_display_order() {
    let json = tiles_json(&["--lane", "creative"]);
    let entries = json["entries"].as_array().unwrap();
    let top: Vec<&str> = entries
        .iter()
        .map(|e| e["tile"]["slug"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["studio", "zine"]);
    assert_eq!(slugs(&entries[0], "children"), vec!["identity", "poster"]);
}

#[test]
fn tiles_search_keeps_parent_as_anchor() {
    let json = tiles_json(&["--lane", "creative", "--search", "SCREEN-PRINTED"]);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["tile"]["slug"], "studio");
    assert_eq!(entries[0]["matched"], false);
    assert_eq!(slugs(&entries[0], "children"), vec!["poster"]);
}

#[test]
fn tiles_tag_filter() {
    let json = tiles_json(&["--lane", "creative", "--tag", "writing"]);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["tile"]["slug"], "zine");
}

#[test]
fn tags_respects_max_tags_override() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("tags")
        .arg(fixture_path("tiles.csv"))
        .args(["--lane", "creative"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("design\nprint\nwriting\n"));

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("tags")
        .arg(fixture_path("tiles.csv"))
        .args(["--lane", "creative", "--max-tags", "1"]);
    cmd.assert().success().stdout(predicate::eq("design\nprint\n"));
}

#[test]
fn config_file_is_layered() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[markdown]\nbase_heading_level = 1").unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("render")
        .arg(fixture_path("body.md"))
        .arg("--config")
        .arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<h1>Launch</h1>"));
}

#[test]
fn render_strips_unsafe_links() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("render").arg(fixture_path("body.md"));
    cmd.assert().success().stdout(
        predicate::str::contains("<h2>Launch</h2>")
            .and(predicate::str::contains(
                r#"<a href="https://example.com/post" target="_blank" rel="noopener">write-up</a>"#,
            ))
            .and(predicate::str::contains("or run it."))
            .and(predicate::str::contains("javascript").not())
            .and(predicate::str::contains(
                "<ul><li>fast</li><li><strong>safe</strong></li></ul>",
            )),
    );
}

#[test]
fn experiences_require_all_selected_tags() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("experiences")
        .arg(fixture_path("experiences.json"))
        .args(["--lane", "business", "--tag", "Skill::Rust", "--tag", "Domain::Fintech"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let hits = json.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["slug"], "platform");
    assert_eq!(hits[0]["detail_level"], "H");
}

#[test]
fn experience_tags_are_grouped() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("experience-tags")
        .arg(fixture_path("experiences.json"))
        .args(["--lane", "business"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("Domain::Fintech\nSkill::Rust\n"));
}

#[test]
fn unknown_experience_slug_fails() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("experience")
        .arg(fixture_path("experiences.json"))
        .args(["--slug", "missing"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no experience with slug 'missing'"));
}

#[test]
fn missing_input_file_fails() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("tiles")
        .arg(fixture_path("absent.csv"))
        .args(["--lane", "creative"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn invalid_json_feed_fails() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{ \"experiences\": [").unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("experiences")
        .arg(file.path())
        .args(["--lane", "business"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

use assert_cmd::Command;

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("sample.txt");
    std::fs::write(&path, "5\n0 1\n1 2\n3 4\n").unwrap();
    path
}

#[test]
fn stats_reports_graph_structure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["stats", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"vertices\":5"));
    assert!(stdout.contains("\"edges\":3"));
    assert!(stdout.contains("\"connected_components\":2"));
    assert!(stdout.contains("\"degree_distribution\":[0,4,1,0,0]"));
}

#[test]
fn convert_round_trips_through_another_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let converted = dir.path().join("sample.gexf");

    Command::cargo_bin("bionet-cli")
        .unwrap()
        .args([
            "convert",
            "--out",
            converted.to_str().unwrap(),
            path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["stats", converted.to_str().unwrap()])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"vertices\":5"));
    assert!(stdout.contains("\"edges\":3"));
}

#[test]
fn layout_emits_positions_for_every_vertex() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["layout", "--seed", "7", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("layout output is JSON");
    assert_eq!(parsed["positions"].as_array().unwrap().len(), 5);
    assert!(parsed["width"].as_f64().unwrap() > 0.0);
}

#[test]
fn render_prints_svg_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["render", "--seed", "7", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<svg"));
    assert!(stdout.contains("<circle"));
    assert!(stdout.contains("<line"));
}

#[test]
fn unknown_flags_exit_with_usage() {
    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["stats", "--bogus"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_input_is_an_error() {
    let output = Command::cargo_bin("bionet-cli")
        .unwrap()
        .args(["stats"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

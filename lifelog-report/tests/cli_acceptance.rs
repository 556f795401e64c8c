use chrono::NaiveDate;
use lifelog_core::{Database, EventStore, JsonSnapshotStore, MoodRecord, Snapshot};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        for dir in [&home, &xdg_data, &xdg_config, &xdg_state] {
            fs::create_dir_all(dir).expect("failed to create test directory");
        }

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("lifelog/data.db")
    }

    fn write_config(&self, content: &str) {
        let path = self.xdg_config.join("lifelog/config.toml");
        fs::create_dir_all(path.parent().expect("missing config parent"))
            .expect("failed to create config dir");
        fs::write(path, content).expect("failed to write config");
    }
}

fn fixture_path() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/snapshot.json")
        .to_string_lossy()
        .into_owned()
}

fn run_report(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("lifelog-report"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute lifelog-report: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "lifelog-report {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn run_json(env: &CliTestEnv, args: &[&str]) -> serde_json::Value {
    let output = run_report(env, args);
    assert_success(args, &output);
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn habits_json_from_snapshot_file() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();

    let report = run_json(
        &env,
        &["--snapshot", &fixture, "--date", "2024-03-10", "--export", "json", "habits"],
    );

    assert_eq!(report["domain"], "habits");
    assert_eq!(report["active_count"], 3);
    assert_eq!(report["window"]["start_date"], "2024-03-04");
    assert_eq!(report["window"]["end_date"], "2024-03-10");
    assert_eq!(report["top"][0]["entity_id"], "walk");
    assert_eq!(report["top"][0]["percentage"], 100.0);
    assert_eq!(report["bottom"][0]["entity_id"], "floss");
    assert_eq!(report["bottom"][0]["percentage"], 0.0);
    assert_eq!(report["perfect_days"], 0);
}

#[test]
fn month_period_widens_window() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();

    let report = run_json(
        &env,
        &[
            "--snapshot", &fixture, "--date", "2024-03-10", "--period", "month", "--export",
            "json", "routines",
        ],
    );

    assert_eq!(report["period"], "month");
    assert_eq!(report["window"]["start_date"], "2024-02-10");
    assert_eq!(report["window"]["ordered_dates"].as_array().map(Vec::len), Some(30));
}

#[test]
fn terminal_and_markdown_output_render() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();

    let args = ["--snapshot", fixture.as_str(), "--date", "2024-03-10", "all"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Morning walk"), "stdout:\n{stdout}");
    assert!(stdout.contains("INSIGHTS"), "stdout:\n{stdout}");

    let args = ["--snapshot", fixture.as_str(), "--date", "2024-03-10", "--export", "md", "mood"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Mood Report"), "stdout:\n{stdout}");
    assert!(stdout.contains("**calm** - 7"), "stdout:\n{stdout}");
}

#[test]
fn zero_rated_days_appear_in_mood_distribution() {
    let env = CliTestEnv::new();
    let path = env.home.join("zero-mood.json");
    let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).expect("valid date");
    let snapshot = Snapshot {
        moods: vec![
            MoodRecord::new(day(8), Some(0)),
            MoodRecord::new(day(9), Some(0)),
            MoodRecord::new(day(10), Some(3)),
        ],
        ..Default::default()
    };
    JsonSnapshotStore::save(&path, &snapshot).expect("failed to write snapshot");
    let snapshot_arg = path.to_string_lossy().into_owned();

    let args = ["--snapshot", snapshot_arg.as_str(), "--date", "2024-03-10", "mood"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rated days: 3"), "stdout:\n{stdout}");
    assert!(
        stdout.lines().any(|l| l.trim_start().starts_with("0 ##") && l.ends_with(" 2")),
        "rating 0 row missing:\n{stdout}"
    );

    let args = [
        "--snapshot", snapshot_arg.as_str(), "--date", "2024-03-10", "--export", "md", "mood",
    ];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("| 0 | 2 |"), "stdout:\n{stdout}");
    assert!(stdout.contains("| 3 | 1 |"), "stdout:\n{stdout}");
}

#[test]
fn unknown_period_and_export_fail() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();

    let output = run_report(&env, &["--snapshot", &fixture, "--period", "year", "habits"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("year"), "stderr:\n{stderr}");

    let output = run_report(&env, &["--snapshot", &fixture, "--export", "pdf", "habits"]);
    assert!(!output.status.success());

    let output = run_report(&env, &["--snapshot", &fixture, "--date", "10/03/2024", "mood"]);
    assert!(!output.status.success());
}

#[test]
fn config_default_period_is_used() {
    let env = CliTestEnv::new();
    env.write_config("[reports]\ndefault_period = \"month\"\n");
    let fixture = fixture_path();

    let report = run_json(
        &env,
        &["--snapshot", &fixture, "--date", "2024-03-10", "--export", "json", "mood"],
    );
    assert_eq!(report["period"], "month");

    env.write_config("[reports]\ndefault_period = \"fortnight\"\n");
    let output = run_report(&env, &["--snapshot", &fixture, "mood"]);
    assert!(!output.status.success());
}

#[test]
fn import_then_report_from_database() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();

    let args = ["import", fixture.as_str()];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Imported"), "stdout:\n{stdout}");

    let db_path = env.db_path();
    assert!(db_path.exists(), "database should exist at {}", db_path.display());

    let db = Database::open(&db_path).expect("failed to open db");
    db.migrate().expect("failed to migrate db");
    let counts = db.counts().expect("failed to count");
    assert_eq!(counts.habits, 4);
    assert_eq!(counts.routines, 1);
    assert_eq!(counts.moods, 7);
    assert_eq!(db.load_snapshot().expect("load").habits[0].id, "walk");
    drop(db);

    let report = run_json(&env, &["--date", "2024-03-10", "--export", "json", "all"]);
    assert_eq!(report["habits"]["active_count"], 3);
    assert_eq!(report["routines"]["perfect_days"], 7);
    assert_eq!(report["mood"]["days_logged"], 7);
    assert!(report["combined"]["insights"]
        .as_array()
        .is_some_and(|insights| !insights.is_empty()));
}

#[test]
fn empty_database_yields_fallback_insight() {
    let env = CliTestEnv::new();

    let report = run_json(&env, &["--date", "2024-03-10", "--export", "json", "insights"]);
    let insights = report["insights"].as_array().expect("insights array");
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0]["rule"], "fallback");
    assert_eq!(insights[0]["title"], "Keep tracking");
}

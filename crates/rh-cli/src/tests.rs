use super::*;

use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rh_api::{launch, LaunchOptions};
use rh_test_client::{
    drain_transitions, exclusive_cell_access, reset_demo_state, DEMO_CLIENT,
    DEMO_CLIENT_LEGACY_NAME, DEMO_CLIENT_NAME,
};

use crate::params::{build_overrides, load_params_file, parse_param_flag};
use crate::session_ops::{candidates_or_default, default_registry, inspect_report};
use crate::shell_line::{run_line_session, LineShell};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("rehost-rs-{}-{}", name, nanos))
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

#[test]
fn parse_param_flag_splits_on_the_first_equals() {
    let (name, value) = parse_param_flag("demo=true").expect("valid flag should parse");
    assert_eq!(name, "demo");
    assert_eq!(value, "true");

    let (name, value) = parse_param_flag("server=host=1").expect("valid flag should parse");
    assert_eq!(name, "server");
    assert_eq!(value, "host=1");
}

#[test]
fn parse_param_flag_rejects_malformed_input() {
    let error = parse_param_flag("no-equals").expect_err("missing separator should fail");
    assert_eq!(error.code, "CLI_PARAM_INVALID");
    let error = parse_param_flag("=value").expect_err("empty name should fail");
    assert_eq!(error.code, "CLI_PARAM_INVALID");
}

#[test]
fn build_overrides_returns_none_without_any_input() {
    let overrides = build_overrides(&[], None).expect("empty input should pass");
    assert!(overrides.is_none());
}

#[test]
fn build_overrides_lets_flags_win_over_the_file() {
    let file = temp_path("params.json");
    write_file(&file, "{\"demo\":\"false\",\"haspaid\":\"false\"}");

    let flags = vec!["demo=true".to_string()];
    let overrides = build_overrides(&flags, Some(file.to_string_lossy().as_ref()))
        .expect("merge should pass")
        .expect("table should be present");
    assert_eq!(overrides.get("demo").map(String::as_str), Some("true"));
    assert_eq!(overrides.get("haspaid").map(String::as_str), Some("false"));
}

#[test]
fn load_params_file_maps_read_and_parse_failures() {
    let missing = temp_path("missing.json");
    let error = load_params_file(missing.to_string_lossy().as_ref())
        .expect_err("missing file should fail");
    assert_eq!(error.code, "CLI_PARAMS_READ");

    let broken = temp_path("broken.json");
    write_file(&broken, "{");
    let error = load_params_file(broken.to_string_lossy().as_ref())
        .expect_err("broken json should fail");
    assert_eq!(error.code, "CLI_PARAMS_INVALID");
}

#[test]
fn candidates_default_to_the_demo_client_names() {
    assert_eq!(
        candidates_or_default(Vec::new()),
        [DEMO_CLIENT_NAME, DEMO_CLIENT_LEGACY_NAME]
    );
    assert_eq!(
        candidates_or_default(vec!["x.y.Z".to_string()]),
        ["x.y.Z"]
    );
}

#[test]
fn cli_parses_the_zero_argument_legacy_variant() {
    let cli = Cli::try_parse_from(["rehost-launcher"]).expect("zero args should parse");
    assert!(cli.command.is_none());
}

#[test]
fn cli_parses_launch_flags() {
    let cli = Cli::try_parse_from([
        "rehost-launcher",
        "launch",
        "--title",
        "Legacy Client 1.2",
        "--root-dir",
        "/srv/game",
        "--client",
        "a.b.C",
        "--param",
        "demo=true",
        "--headless",
    ])
    .expect("launch flags should parse");
    let Some(Mode::Launch(args)) = cli.command else {
        panic!("expected the launch mode");
    };
    assert_eq!(args.title.as_deref(), Some("Legacy Client 1.2"));
    assert_eq!(args.root_dir.as_deref(), Some("/srv/game"));
    assert_eq!(args.clients, ["a.b.C"]);
    assert_eq!(args.params, ["demo=true"]);
    assert!(args.headless);
}

#[test]
fn inspect_report_lists_the_cell_table() {
    let _guard = exclusive_cell_access();
    reset_demo_state();

    let lines = inspect_report(&DEMO_CLIENT).expect("report should build");
    assert_eq!(lines[0], "RESULT:OK");
    assert_eq!(lines[1], format!("CLIENT:{}", DEMO_CLIENT_NAME));
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("CELL_JSON:"));
    assert!(lines[2].contains("\"name\":\"game_root\""));
    assert!(lines[2].contains("\"visibility\":\"private\""));
    assert!(lines[2].contains("\"storage\":\"static\""));
    assert!(lines[2].contains("\"cellType\":\"directory\""));
    assert!(lines[2].contains("\"patched\":false"));
}

#[test]
fn line_session_drives_the_embedded_client() {
    let _guard = exclusive_cell_access();
    reset_demo_state();

    let registry = default_registry().expect("registry");
    let mut shell = LineShell::new();
    let mut options = LaunchOptions::new(candidates_or_default(Vec::new()));
    options.root_dir = Some(PathBuf::from("/srv/cli-root"));
    let mut overrides = BTreeMap::new();
    overrides.insert("demo".to_string(), "true".to_string());
    options.overrides = Some(overrides);
    let mut session = launch(&registry, &mut shell, options).expect("launch should pass");
    assert!(shell.is_mounted());

    let script = ":status\n:resize 640 360\n:param demo\n:param zzz\n:hide\n:oops\n:quit\n";
    let mut reader = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    let code = run_line_session(&mut session, &shell, &mut reader, &mut output)
        .expect("line session should pass");
    assert_eq!(code, 0);
    assert!(session.is_shut_down());

    let output = String::from_utf8(output).expect("utf8 output");
    assert!(output.contains("window 'Legacy Client' at 854x480"));
    assert!(output.contains("client: rehost.demo.DemoClient"));
    assert!(output.contains("root: /srv/cli-root"));
    assert!(output.contains("resized to 640x360"));
    assert!(output.contains("PARAM:demo=true"));
    assert!(output.contains("PARAM:zzz=<absent>"));
    assert!(output.contains("visible: false"));
    assert!(output.contains("unknown command: :oops"));
    assert!(output.contains("bye"));

    let transitions = drain_transitions();
    assert_eq!(
        transitions,
        [
            "construct",
            "set_host",
            "init",
            "start",
            "set_visible true",
            "resize 640x360",
            "set_visible false",
            "stop",
            "destroy"
        ]
    );
}

#[test]
fn line_session_treats_end_of_input_as_a_close_request() {
    let _guard = exclusive_cell_access();
    reset_demo_state();

    let registry = default_registry().expect("registry");
    let mut shell = LineShell::new();
    let mut options = LaunchOptions::new(candidates_or_default(Vec::new()));
    options.root_dir = Some(PathBuf::from("/srv/eof-root"));
    let mut session = launch(&registry, &mut shell, options).expect("launch should pass");

    let mut reader = Cursor::new(Vec::new());
    let mut output = Vec::new();
    let code = run_line_session(&mut session, &shell, &mut reader, &mut output)
        .expect("eof should close cleanly");
    assert_eq!(code, 0);
    assert!(session.is_shut_down());
    let transitions = drain_transitions();
    assert_eq!(transitions.last().map(String::as_str), Some("destroy"));
}

#[test]
fn run_cli_maps_resolution_failures_to_exit_code_two() {
    let _guard = exclusive_cell_access();
    reset_demo_state();

    let cli = Cli::try_parse_from([
        "rehost-launcher",
        "inspect",
        "--client",
        "gone.game.Client",
    ])
    .expect("inspect flags should parse");
    assert_eq!(run_cli(cli), 2);
}

#[test]
fn run_inspect_resolves_the_default_candidates() {
    let _guard = exclusive_cell_access();
    reset_demo_state();

    let cli = Cli::try_parse_from(["rehost-launcher", "inspect"]).expect("parse");
    assert_eq!(run_cli(cli), 0);
}

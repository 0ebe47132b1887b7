//! Config -> script -> snapshot flow, through the library and the binary

use std::fs;
use std::process::Command;

use launchpad_cli::*;
use launchpad_core::{parse_units, Response, SaleStatus, DECIMALS};

const LIFECYCLE: &str = r#"{ "steps": [
    { "caller": "creator", "value": "0.01", "call": { "create": { "name": "DAPP Uni", "ticker": "DAPP" } } },
    { "caller": "buyer", "value": "1", "call": { "buy": { "sale_id": 0, "units": "10000" } } },
    { "caller": "anyone", "call": { "get_cost": { "sold": "10000" } } },
    { "caller": "buyer", "value": "2", "call": { "buy": { "sale_id": 0, "units": "10000" } } },
    { "caller": "creator", "call": { "deposit": { "sale_id": 0 } } },
    { "caller": "creator", "call": { "deposit": { "sale_id": 0 } } },
    { "caller": "deployer", "call": { "withdraw": { "amount": "3.01" } } }
] }"#;

fn units(text: &str) -> u128 {
    parse_units(text, DECIMALS).unwrap()
}

#[test]
fn test_script_lifecycle_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("launchpad.toml");
    let state_path = dir.path().join("state.json");

    create_example_config(&config_path).unwrap();
    let config = LaunchpadConfig::load(&config_path).unwrap();
    let actors = config.actors().unwrap();

    let script: Script = serde_json::from_str(LIFECYCLE).unwrap();
    let calls = script.compile(&actors).unwrap();
    let mut registry = config.build_registry().unwrap();

    let report = run_calls(&mut registry, &calls, false);
    assert_eq!(report.outcomes.len(), 7);
    assert_eq!(report.failures(), 1);
    assert_eq!(report.outcomes[2].result, Some(Response::Amount(units("0.0002"))));
    assert!(report.outcomes[5].error.as_deref().unwrap().contains("finalized"));

    save_state(&state_path, &registry).unwrap();
    let restored = load_state(&state_path).unwrap();

    let sale = restored.get_sale(0).unwrap();
    assert_eq!(sale.status, SaleStatus::Finalized);
    assert_eq!(sale.raised, units("3"));
    assert_eq!(restored.balance_of(0, &actors.alias("creator").unwrap()).unwrap(), units("980000"));
    assert_eq!(restored.balance_of(0, &actors.alias("buyer").unwrap()).unwrap(), units("20000"));
    assert_eq!(restored.vault().balance(), 0);
}

#[test]
fn test_fail_fast_stops_at_first_rejection() {
    let config = LaunchpadConfig::default();
    let script: Script = serde_json::from_str(
        r#"{ "steps": [
            { "caller": "creator", "value": "0.02", "call": { "create": { "name": "Wrong Fee", "ticker": "WF" } } },
            { "caller": "creator", "value": "0.01", "call": { "create": { "name": "Right Fee", "ticker": "RF" } } }
        ] }"#,
    )
    .unwrap();
    let calls = script.compile(&config.actors().unwrap()).unwrap();
    let mut registry = config.build_registry().unwrap();

    let report = run_calls(&mut registry, &calls, true);
    assert_eq!(report.outcomes.len(), 1);
    assert!(report.halt_error().is_some());
    assert_eq!(registry.total_sales(), 0);
}

#[test]
fn test_binary_run_and_inspect() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("launchpad.toml");
    let script_path = dir.path().join("script.json");
    let state_path = dir.path().join("state.json");
    create_example_config(&config_path).unwrap();
    fs::write(&script_path, LIFECYCLE).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_launchpad"))
        .args(["--log-level", "error", "run", "--config"])
        .arg(&config_path)
        .arg("--script")
        .arg(&script_path)
        .arg("--state")
        .arg(&state_path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0]["op"], "create");
    assert!(lines[5].get("error").is_some());
    assert!(state_path.exists());

    let output = Command::new(env!("CARGO_BIN_EXE_launchpad"))
        .args(["--log-level", "error", "inspect", "--state"])
        .arg(&state_path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_sales"], 1);
    assert_eq!(summary["sales"][0]["status"], "finalized");
}

#[test]
fn test_binary_quote() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("launchpad.toml");
    create_example_config(&config_path).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_launchpad"))
        .args(["--log-level", "error", "quote", "--config"])
        .arg(&config_path)
        .args(["--sold", "10000", "--units", "10000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let line: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(line["unit_price"], "0.0002");
    assert_eq!(line["total_cost"], "2.0");
}

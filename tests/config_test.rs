// Test configuration loading and saving
//
// Uses temporary config files; FLEETCTL_* environment variables are not set
// by these tests.

use anyhow::Result;
use fleetctl::api::Environment;
use fleetctl::config::{load_config, save_config, Config};
use fleetctl::daemon::Daemon;
use std::fs;
use std::time::Duration;

#[test]
fn test_missing_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = load_config(Some(&dir.path().join("absent.toml")))?;

    assert_eq!(config, Config::default());
    assert_eq!(config.api_root().as_str(), "http://localhost:3000/api/v1");
    Ok(())
}

#[test]
fn test_load_fleet_from_toml() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        environment = "production"
        hostname = "fleet.example.com"
        notice_life_ms = 5000
        session_token = "s%3Aabc"

        [[daemons]]
        mac = "AA:BB:CC:DD:EE:01"
        hostname = "ws1"
        user = "alice"

        [[daemons]]
        mac = "AA:BB:CC:DD:EE:02"
        ip = "10.0.0.2"
        "#,
    )?;

    let config = load_config(Some(&path))?;
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.api_root().as_str(), "http://fleet.example.com:3000/api/v1");
    assert_eq!(config.session_token.as_deref(), Some("s%3Aabc"));
    assert_eq!(config.dispatch_settings().notice_life, Duration::from_secs(5));
    assert_eq!(config.session_cookie, "connect.sid");

    assert_eq!(config.daemons.len(), 2);
    assert_eq!(
        config.daemons[0],
        Daemon::new("AA:BB:CC:DD:EE:01")
            .with_user("alice")
            .with_hostname("ws1")
    );
    assert_eq!(config.daemons[1].ip.as_deref(), Some("10.0.0.2"));
    assert_eq!(config.find_daemon("ws1").unwrap().mac, "AA:BB:CC:DD:EE:01");
    Ok(())
}

#[test]
fn test_development_environment_targets_localhost() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "environment = \"development\"\nhostname = \"fleet.example.com\"\n",
    )?;

    let config = load_config(Some(&path))?;
    assert_eq!(config.api_root().as_str(), "http://localhost:3000/api/v1");
    Ok(())
}

#[test]
fn test_invalid_file_is_an_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = \"not a port\"\n")?;

    assert!(load_config(Some(&path)).is_err());
    Ok(())
}

#[test]
fn test_save_then_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/config.toml");

    let config = Config {
        hostname: "fleet.example.com".to_string(),
        notify_unrecognized: true,
        daemons: vec![Daemon::new("AA:BB:CC:DD:EE:FF").with_hostname("ws1")],
        ..Config::default()
    };
    save_config(&config, &path)?;

    assert_eq!(load_config(Some(&path))?, config);
    Ok(())
}

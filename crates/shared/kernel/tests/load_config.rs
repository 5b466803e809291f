use cfm_domain::config::ApiConfig;
use cfm_kernel::config::load_config;
use serial_test::serial;
use std::fs;

#[test]
#[serial]
fn loads_file_based_settings() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9100

[converter]
command = "/opt/cfmtoolbox"
timeout_seconds = 7
"#,
    )
    .expect("write config file");

    let cfg: ApiConfig = load_config(Some(path.with_extension(""))).expect("config load");
    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.converter.command, std::path::PathBuf::from("/opt/cfmtoolbox"));
    assert_eq!(cfg.converter.timeout_seconds, 7);
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let result: Result<ApiConfig, _> = load_config(Some("definitely/not/here"));
    assert!(result.is_err());
}

use quickserve::config::{CONFIG_PATH_VAR, Config};
use std::collections::HashMap;
use std::io::Write;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::from_lookup(lookup(&[("PORT", "3000"), ("LOG_LEVEL", "debug")])).unwrap();

    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn test_config_invalid_port() {
    assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
    assert!(Config::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml("port: 9000\nlog_level: warn\n").unwrap();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn test_config_yaml_partial_uses_defaults() {
    let cfg = Config::from_yaml("log_level: trace\n").unwrap();

    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.log_level, "trace");
}

#[test]
fn test_config_file_then_env() {
    let path = std::env::temp_dir().join(format!("quickserve-test-{}.yaml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"port: 9100\nlog_level: error\n").unwrap();
    drop(file);

    let path_str = path.to_str().unwrap();
    let cfg = Config::from_lookup(lookup(&[(CONFIG_PATH_VAR, path_str), ("PORT", "9200")])).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 9200);
    assert_eq!(cfg.log_level, "error");
}

#[test]
fn test_config_missing_file() {
    let result = Config::from_lookup(lookup(&[(CONFIG_PATH_VAR, "/nonexistent/quickserve.yaml")]));

    assert!(result.is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.port, cfg2.port);
}

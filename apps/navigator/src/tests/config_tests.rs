use super::{load_settings_with, parse_flag, parse_timeout_secs, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(tag: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("navigator_config_test_{tag}_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_with(&env::temp_dir().join("navigator_absent.toml"), vars(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.service_url, "http://localhost:8000");
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file",
        "service_url = \"http://nav.internal:9000\"\nrequest_timeout_secs = 3\nfetch_map_on_start = false\n",
    );

    let settings = load_settings_with(&path, vars(&[]));

    assert_eq!(settings.service_url, "http://nav.internal:9000");
    assert_eq!(settings.request_timeout_secs, 3);
    assert!(!settings.fetch_map_on_start);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_config("env", "service_url = \"http://from-file:1\"\n");

    let settings = load_settings_with(
        &path,
        vars(&[
            ("NAVIGATOR_SERVICE_URL", "http://from-env:2"),
            ("APP__SERVICE_URL", "http://from-app-env:3"),
            ("APP__REQUEST_TIMEOUT_SECS", "25"),
            ("APP__FETCH_MAP_ON_START", "off"),
        ]),
    );

    assert_eq!(settings.service_url, "http://from-app-env:3");
    assert_eq!(settings.request_timeout_secs, 25);
    assert!(!settings.fetch_map_on_start);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn invalid_values_are_ignored() {
    let path = temp_config("invalid", "request_timeout_secs = \"soon\"\n");

    let settings = load_settings_with(
        &path,
        vars(&[
            ("APP__REQUEST_TIMEOUT_SECS", "-1"),
            ("APP__FETCH_MAP_ON_START", "maybe"),
        ]),
    );

    assert_eq!(settings, Settings::default());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn bad_file_value_keeps_the_valid_ones() {
    let path = temp_config(
        "mixed",
        "service_url = \"http://nav.internal:9000\"\nrequest_timeout_secs = \"soon\"\nfetch_map_on_start = 3\n",
    );

    let settings = load_settings_with(&path, vars(&[]));

    assert_eq!(settings.service_url, "http://nav.internal:9000");
    assert_eq!(settings.request_timeout_secs, 10);
    assert!(settings.fetch_map_on_start);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn string_values_in_file_are_accepted() {
    let path = temp_config(
        "strings",
        "service_url = \"http://nav.internal:9000\"\nrequest_timeout_secs = \"5\"\nfetch_map_on_start = \"no\"\n",
    );

    let settings = load_settings_with(&path, vars(&[]));

    assert_eq!(settings.service_url, "http://nav.internal:9000");
    assert_eq!(settings.request_timeout_secs, 5);
    assert!(!settings.fetch_map_on_start);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn zero_timeout_is_rejected_everywhere() {
    let path = temp_config("zero", "request_timeout_secs = 0\n");

    let settings = load_settings_with(&path, vars(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));

    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(parse_timeout_secs("0"), None);
    assert_eq!(parse_timeout_secs(" 7 "), Some(7));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn flags_accept_common_spellings() {
    assert_eq!(parse_flag(" TRUE "), Some(true));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag(""), None);
}

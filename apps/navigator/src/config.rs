use std::{fs, path::Path};

use toml::{Table, Value};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub request_timeout_secs: u64,
    pub fetch_map_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8000".into(),
            request_timeout_secs: 10,
            fetch_map_on_start: true,
        }
    }
}

pub fn load_settings(config_path: &Path) -> Settings {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

fn load_settings_with(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<Table>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, &file_cfg),
            Err(err) => warn!(
                path = %config_path.display(),
                "ignoring unreadable settings file: {err}"
            ),
        }
    }

    if let Some(v) = env("NAVIGATOR_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match parse_timeout_secs(&v) {
            Some(parsed) => settings.request_timeout_secs = parsed,
            None => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = env("APP__FETCH_MAP_ON_START") {
        match parse_flag(&v) {
            Some(parsed) => settings.fetch_map_on_start = parsed,
            None => warn!(value = %v, "ignoring invalid APP__FETCH_MAP_ON_START"),
        }
    }

    settings
}

/// Each key is applied on its own so one bad value does not discard the rest of the file.
fn apply_file_settings(settings: &mut Settings, file_cfg: &Table) {
    if let Some(v) = file_cfg.get("service_url") {
        match v {
            Value::String(url) => settings.service_url = url.clone(),
            other => warn!(value = %other, "ignoring invalid service_url in settings file"),
        }
    }

    if let Some(v) = file_cfg.get("request_timeout_secs") {
        let parsed = match v {
            Value::Integer(secs) => u64::try_from(*secs).ok().filter(|secs| *secs > 0),
            Value::String(raw) => parse_timeout_secs(raw),
            _ => None,
        };
        match parsed {
            Some(secs) => settings.request_timeout_secs = secs,
            None => warn!(value = %v, "ignoring invalid request_timeout_secs in settings file"),
        }
    }

    if let Some(v) = file_cfg.get("fetch_map_on_start") {
        let parsed = match v {
            Value::Boolean(flag) => Some(*flag),
            Value::String(raw) => parse_flag(raw),
            _ => None,
        };
        match parsed {
            Some(flag) => settings.fetch_map_on_start = flag,
            None => warn!(value = %v, "ignoring invalid fetch_map_on_start in settings file"),
        }
    }
}

/// A zero timeout would fail every request immediately, so it counts as invalid.
pub fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

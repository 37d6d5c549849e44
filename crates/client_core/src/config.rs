use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_CONFIG_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Collection endpoint; items live at `<api_url>/<id>`.
    pub api_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> anyhow::Result<Self> {
        if let Some(raw) = api_url {
            self.api_url = normalize_api_url(&raw)?;
        }
        Ok(self)
    }
}

/// Defaults, then the optional config file, then the environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
                .with_context(|| format!("parsing client config {}", path.display()))?;
            apply_overrides(&mut settings, |key| file_cfg.get(key).cloned());
        }
        // an explicitly requested file must exist, the default one is optional
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err).with_context(|| format!("reading client config {}", path.display()))
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings.api_url = normalize_api_url(&settings.api_url)?;
    Ok(settings)
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("api_url") {
        settings.api_url = v;
    }
    if let Some(secs) = lookup("request_timeout_secs").and_then(|v| parse_timeout_secs(&v)) {
        settings.request_timeout_secs = secs;
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("USERS_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(secs) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| parse_timeout_secs(&v)) {
        settings.request_timeout_secs = secs;
    }
}

// zero would make every request time out immediately
fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

pub fn normalize_api_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ClientSettings::default().api_url);
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid users API url {trimmed:?}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "users API url must be http or https, got scheme {:?}",
            parsed.scheme()
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

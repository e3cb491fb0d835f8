//! Profile configuration for maasly consumers.
//!
//! TOML profiles naming a region controller, the API version to decode
//! for, and TLS and timeout settings, translated into [`ClientSettings`]
//! ready to build a [`MaasClient`] and an [`ActionInvoker`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use maasly_api::{MaasClient, TlsMode, TransportConfig};
use maasly_core::{ActionInvoker, Version, VersionParseError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("no profile selected and no default_profile configured")]
    NoProfile,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("client setup failed: {0}")]
    Client(#[from] maasly_api::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named explicitly.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named region controller profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, falling back to `default_profile`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .ok_or(ConfigError::NoProfile)?;
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// API version payloads are decoded for, `major.minor[.patch]`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default)]
    pub insecure: bool,

    /// Seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_api_version() -> String {
    "2.0".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named region controller.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Region controller URL (e.g., "http://maas.example:5240/MAAS/").
    pub url: String,

    /// Override the API version.
    pub api_version: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "maasly", "maasly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("maasly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, layered as defaults → file → `MAASLY_*` env.
///
/// Nested keys use `__` in env names, e.g. `MAASLY_DEFAULTS__TIMEOUT`.
/// A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MAASLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Client settings ─────────────────────────────────────────────────

/// Everything needed to talk to one region controller.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Always ends with `/`.
    pub base_url: Url,
    pub version: Version,
    pub transport: TransportConfig,
}

impl ClientSettings {
    pub fn client(&self) -> Result<MaasClient, ConfigError> {
        Ok(MaasClient::new(self.base_url.clone(), &self.transport)?)
    }

    pub fn invoker(&self) -> Result<ActionInvoker<MaasClient>, ConfigError> {
        Ok(ActionInvoker::new(self.client()?, self.version))
    }
}

/// Resolve a profile against the global defaults.
pub fn profile_to_client_settings(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientSettings, ConfigError> {
    let mut base_url: Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("expected http or https, got '{}'", base_url.scheme()),
        });
    }
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    let raw_version = profile
        .api_version
        .as_deref()
        .unwrap_or(&defaults.api_version);
    let version: Version =
        raw_version
            .parse()
            .map_err(|e: VersionParseError| ConfigError::Validation {
                field: "api_version".into(),
                reason: e.to_string(),
            })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ClientSettings {
        base_url,
        version,
        transport: TransportConfig { tls, timeout },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(url: &str) -> Profile {
        Profile {
            url: url.into(),
            api_version: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    #[test]
    fn defaults_apply_when_profile_is_silent() {
        let settings =
            profile_to_client_settings(&profile("http://maas:5240/MAAS"), &Defaults::default())
                .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://maas:5240/MAAS/");
        assert_eq!(settings.version, Version::new(2, 0, 0));
        assert_eq!(settings.transport.tls, TlsMode::System);
        assert_eq!(settings.transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn profile_overrides_defaults() {
        let p = Profile {
            api_version: Some("2.1".into()),
            ca_cert: Some(PathBuf::from("/etc/maas/ca.pem")),
            timeout: Some(5),
            ..profile("https://maas.example/MAAS/")
        };
        let settings = profile_to_client_settings(&p, &Defaults::default()).unwrap();
        assert_eq!(settings.version, Version::new(2, 1, 0));
        assert_eq!(
            settings.transport.tls,
            TlsMode::CustomCa(PathBuf::from("/etc/maas/ca.pem"))
        );
        assert_eq!(settings.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let p = Profile {
            ca_cert: Some(PathBuf::from("/etc/maas/ca.pem")),
            insecure: Some(true),
            ..profile("https://maas.example/MAAS/")
        };
        let settings = profile_to_client_settings(&p, &Defaults::default()).unwrap();
        assert_eq!(settings.transport.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn validation_names_the_field() {
        let err = profile_to_client_settings(&profile("not a url"), &Defaults::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid url: "), "got: {err}");

        let err = profile_to_client_settings(&profile("ftp://maas/"), &Defaults::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid url: expected http or https, got 'ftp'");

        let p = Profile {
            api_version: Some("two".into()),
            ..profile("http://maas/MAAS/")
        };
        let err = profile_to_client_settings(&p, &Defaults::default()).unwrap_err();
        assert!(err.to_string().starts_with("invalid api_version: "), "got: {err}");
    }

    #[test]
    fn profile_lookup_falls_back_to_default() {
        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), profile("http://maas/MAAS/"));

        let (name, _) = config.profile(None).unwrap();
        assert_eq!(name, "default");

        let err = config.profile(Some("lab")).unwrap_err();
        assert_eq!(err.to_string(), "no profile named 'lab'");

        config.default_profile = None;
        assert!(matches!(config.profile(None), Err(ConfigError::NoProfile)));
    }
}

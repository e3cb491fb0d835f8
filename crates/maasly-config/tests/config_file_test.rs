#![allow(clippy::unwrap_used)]
// Loading and saving config files on disk.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use maasly_config::{
    Config, Profile, load_config_from, profile_to_client_settings, save_config_to,
};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.default_profile.as_deref(), Some("default"));
    assert_eq!(config.defaults.api_version, "2.0");
    assert_eq!(config.defaults.timeout, 30);
    assert!(config.profiles.is_empty());
}

#[test]
fn test_file_profiles_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_profile = "lab"

[defaults]
timeout = 10

[profiles.lab]
url = "http://10.0.0.2:5240/MAAS/"
api_version = "2.0"
insecure = true
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    let (name, profile) = config.profile(None).unwrap();
    assert_eq!(name, "lab");
    assert_eq!(profile.insecure, Some(true));

    let settings = profile_to_client_settings(profile, &config.defaults).unwrap();
    assert_eq!(settings.base_url.as_str(), "http://10.0.0.2:5240/MAAS/");
    assert_eq!(settings.transport.timeout.as_secs(), 10);
    assert!(settings.invoker().is_ok());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[profiles.lab]\nurl = 42\n").unwrap();
    assert!(load_config_from(&path).is_err());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            url: "https://maas.example/MAAS/".into(),
            api_version: None,
            ca_cert: Some(PathBuf::from("/etc/maas/ca.pem")),
            insecure: None,
            timeout: Some(60),
        },
    );
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let (_, profile) = loaded.profile(None).unwrap();
    assert_eq!(profile.url, "https://maas.example/MAAS/");
    assert_eq!(profile.ca_cert, Some(PathBuf::from("/etc/maas/ca.pem")));
    assert_eq!(profile.timeout, Some(60));
    assert_eq!(profile.api_version, None);
}

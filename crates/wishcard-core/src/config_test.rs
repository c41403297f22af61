use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "WISHCARD_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.list_path, Path::new("./data/saved-products.json"));
    assert!(cfg.sites_path.is_none());
    assert_eq!(cfg.fallback_title, "Untitled product");
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("WISHCARD_ENV", "production");
    map.insert("WISHCARD_LOG_LEVEL", "debug");
    map.insert("WISHCARD_LIST_PATH", "/tmp/cards.json");
    map.insert("WISHCARD_SITES_PATH", "./config/sites.yaml");
    map.insert("WISHCARD_FALLBACK_TITLE", "  상품  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.list_path, Path::new("/tmp/cards.json"));
    assert_eq!(cfg.sites_path.as_deref(), Some(Path::new("./config/sites.yaml")));
    assert_eq!(cfg.fallback_title, "상품");
}

#[test]
fn build_app_config_ignores_blank_sites_path() {
    let mut map = HashMap::new();
    map.insert("WISHCARD_SITES_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.sites_path.is_none());
}

#[test]
fn build_app_config_fails_with_blank_fallback_title() {
    let mut map = HashMap::new();
    map.insert("WISHCARD_FALLBACK_TITLE", " ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WISHCARD_FALLBACK_TITLE"),
        "expected InvalidEnvVar(WISHCARD_FALLBACK_TITLE), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("WISHCARD_ENV", "prod");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WISHCARD_ENV"),
        "expected InvalidEnvVar(WISHCARD_ENV), got: {result:?}"
    );
}

#[test]
fn config_errors_render_the_offending_input() {
    let err = ConfigError::InvalidEnvVar {
        var: "WISHCARD_ENV".to_string(),
        reason: "unknown environment 'prod'".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid value for WISHCARD_ENV: unknown environment 'prod'"
    );

    let err = ConfigError::Validation("duplicate site key 'musinsa'".to_string());
    assert_eq!(
        err.to_string(),
        "sites validation failed: duplicate site key 'musinsa'"
    );
}

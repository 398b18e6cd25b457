//! Settings loaded from the environment
//!
//! Environment variables are process-global, so these tests run serially.

use daily_yoga_skill::config::{PersistenceBackend, Settings};
use serial_test::serial;

const VARS: &[&str] = &[
    "DAILY_YOGA__PERSISTENCE__BUCKET",
    "DAILY_YOGA__PERSISTENCE__TABLE_NAME",
    "DAILY_YOGA__SERVER__PORT",
    "DAILY_YOGA__I18N__SUPPORTED_LOCALES",
    "DAILY_YOGA__LOGGING__LEVEL",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let settings = Settings::new().expect("Failed to load settings");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.i18n.default_locale, "en-US");
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.persistence.backend(), None);
    assert!(settings.validate().is_err());
}

#[test]
#[serial]
fn test_table_name_from_environment() {
    clear_env();
    std::env::set_var("DAILY_YOGA__PERSISTENCE__TABLE_NAME", "daily_yoga_users");
    std::env::set_var("DAILY_YOGA__SERVER__PORT", "8080");
    std::env::set_var("DAILY_YOGA__LOGGING__LEVEL", "debug");

    let settings = Settings::new().expect("Failed to load settings");
    clear_env();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(
        settings.persistence.backend(),
        Some(PersistenceBackend::Postgres {
            table_name: "daily_yoga_users".to_string()
        })
    );
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_bucket_overrides_table_name() {
    clear_env();
    std::env::set_var("DAILY_YOGA__PERSISTENCE__TABLE_NAME", "daily_yoga_users");
    std::env::set_var("DAILY_YOGA__PERSISTENCE__BUCKET", "hosted-bucket");

    let settings = Settings::new().expect("Failed to load settings");
    clear_env();

    assert_eq!(
        settings.persistence.backend(),
        Some(PersistenceBackend::Redis {
            bucket: "hosted-bucket".to_string()
        })
    );
}

#[test]
#[serial]
fn test_supported_locales_list() {
    clear_env();
    std::env::set_var("DAILY_YOGA__I18N__SUPPORTED_LOCALES", "en-US,en-GB,en-IN");

    let settings = Settings::new().expect("Failed to load settings");
    clear_env();

    assert_eq!(
        settings.i18n.supported_locales,
        vec!["en-US".to_string(), "en-GB".to_string(), "en-IN".to_string()]
    );
}

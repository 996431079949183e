use super::*;

use shared::domain::ChannelName;

fn settings_from_env(vars: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).cloned());
    settings
}

#[test]
fn no_credentials_means_logging_only() {
    let settings = settings_from_env(&[]);
    let delivery = settings.delivery_config().expect("config");
    assert!(delivery.active_channels().is_empty());
    assert_eq!(settings.environment, RuntimeEnvironment::Production);
}

#[test]
fn email_credential_alone_activates_email() {
    let settings = settings_from_env(&[
        ("EMAIL_PASSWORD", "secret"),
        ("CONTACT_EMAIL", "me@site.dev"),
    ]);
    let delivery = settings.delivery_config().expect("config");
    assert_eq!(delivery.active_channels(), vec![ChannelName::Email]);
    assert_eq!(delivery.email.expect("email").address, "me@site.dev");
}

#[test]
fn sms_requires_account_token_and_number() {
    let partial = settings_from_env(&[("TWILIO_ACCOUNT_SID", "AC1"), ("TWILIO_AUTH_TOKEN", "t")]);
    assert!(partial
        .delivery_config()
        .expect("config")
        .active_channels()
        .is_empty());

    let full = settings_from_env(&[
        ("TWILIO_ACCOUNT_SID", "AC1"),
        ("TWILIO_AUTH_TOKEN", "t"),
        ("TWILIO_PHONE_NUMBER", "+15550001"),
    ]);
    let delivery = full.delivery_config().expect("config");
    assert_eq!(delivery.active_channels(), vec![ChannelName::Sms]);
    assert_eq!(delivery.sms.expect("sms").from_number, "+15550001");
}

#[test]
fn blank_values_count_as_unset() {
    let settings = settings_from_env(&[("EMAIL_API_KEY", "   "), ("PORT", "")]);
    assert!(settings.email_api_key.is_none());
    assert_eq!(settings.server_bind, "0.0.0.0:3000");
}

#[test]
fn port_overrides_only_the_port() {
    let settings = settings_from_env(&[("SERVER_BIND", "127.0.0.1:8080"), ("PORT", "4000")]);
    assert_eq!(settings.server_bind, "127.0.0.1:4000");

    let invalid = settings_from_env(&[("PORT", "not-a-port")]);
    assert_eq!(invalid.server_bind, "0.0.0.0:3000");
}

#[test]
fn app_env_wins_over_node_env() {
    let settings = settings_from_env(&[("NODE_ENV", "production"), ("APP_ENV", "development")]);
    assert_eq!(settings.environment, RuntimeEnvironment::Development);
    assert!(settings.environment.exposes_error_detail());

    let fallback = settings_from_env(&[("NODE_ENV", "development")]);
    assert_eq!(fallback.environment, RuntimeEnvironment::Development);
}

#[test]
fn file_settings_are_overridden_by_env() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_addr = "127.0.0.1:9000"
static_root = "./public"
contact_email = "file@site.dev"
environment = "development"
"#,
    );
    assert_eq!(settings.server_bind, "127.0.0.1:9000");
    assert_eq!(settings.static_root, PathBuf::from("./public"));
    assert_eq!(settings.environment, RuntimeEnvironment::Development);

    apply_env(&mut settings, |key| {
        (key == "CONTACT_EMAIL").then(|| "env@site.dev".to_string())
    });
    assert_eq!(settings.contact_email, "env@site.dev");
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "bind_addr = [not valid");
    assert_eq!(settings.server_bind, "0.0.0.0:3000");
}

#[test]
fn invalid_provider_base_is_a_startup_error() {
    let mut settings = settings_from_env(&[("EMAIL_API_KEY", "k")]);
    settings.email_api_base = "not a url".into();
    let err = settings.delivery_config().expect_err("should fail");
    assert!(err.to_string().contains("email_api_base"));
}

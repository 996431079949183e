use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use anyhow::Context;
use delivery::{
    email::SENDGRID_API_BASE_URL, sms::TWILIO_API_BASE_URL, DeliveryChannelConfig, EmailConfig,
    SmsConfig,
};
use tracing::warn;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnvironment {
    Development,
    #[default]
    Production,
}

impl RuntimeEnvironment {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => RuntimeEnvironment::Development,
            _ => RuntimeEnvironment::Production,
        }
    }

    pub fn exposes_error_detail(self) -> bool {
        self == RuntimeEnvironment::Development
    }
}

pub struct Settings {
    pub server_bind: String,
    pub static_root: PathBuf,
    pub environment: RuntimeEnvironment,
    pub email_api_key: Option<String>,
    pub contact_email: String,
    pub email_api_base: String,
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub contact_sms_to: String,
    pub sms_api_base: String,
    pub provider_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:3000".into(),
            static_root: PathBuf::from("."),
            environment: RuntimeEnvironment::default(),
            email_api_key: None,
            contact_email: "owner@example.com".into(),
            email_api_base: SENDGRID_API_BASE_URL.into(),
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_phone_number: None,
            contact_sms_to: "+15555550100".into(),
            sms_api_base: TWILIO_API_BASE_URL.into(),
            provider_timeout_secs: 10,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(%error, "ignoring unreadable server.toml");
            return;
        }
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("static_root") {
        settings.static_root = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("environment") {
        settings.environment = RuntimeEnvironment::parse(v);
    }
    if let Some(v) = file_cfg.get("contact_email") {
        settings.contact_email = v.clone();
    }
    if let Some(v) = file_cfg.get("contact_sms_to") {
        settings.contact_sms_to = v.clone();
    }
    if let Some(v) = file_cfg.get("email_api_base") {
        settings.email_api_base = v.clone();
    }
    if let Some(v) = file_cfg.get("sms_api_base") {
        settings.sms_api_base = v.clone();
    }
}

/// Later keys in each list take precedence. Blank values count as unset.
pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let get = |keys: &[&str]| -> Option<String> {
        keys.iter()
            .filter_map(|key| lookup(*key))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .last()
    };

    if let Some(v) = get(&["SERVER_BIND", "APP__BIND_ADDR"]) {
        settings.server_bind = v;
    }
    if let Some(port) = get(&["PORT"]) {
        match port.parse::<u16>() {
            Ok(port) => settings.server_bind = with_port(&settings.server_bind, port),
            Err(error) => warn!(%port, %error, "ignoring invalid PORT"),
        }
    }
    if let Some(v) = get(&["STATIC_ROOT", "APP__STATIC_ROOT"]) {
        settings.static_root = PathBuf::from(v);
    }
    if let Some(v) = get(&["NODE_ENV", "APP_ENV", "APP__ENVIRONMENT"]) {
        settings.environment = RuntimeEnvironment::parse(&v);
    }

    if let Some(v) = get(&["EMAIL_PASSWORD", "EMAIL_API_KEY"]) {
        settings.email_api_key = Some(v);
    }
    if let Some(v) = get(&["CONTACT_EMAIL"]) {
        settings.contact_email = v;
    }
    if let Some(v) = get(&["EMAIL_API_BASE"]) {
        settings.email_api_base = v;
    }

    if let Some(v) = get(&["TWILIO_ACCOUNT_SID"]) {
        settings.twilio_account_sid = Some(v);
    }
    if let Some(v) = get(&["TWILIO_AUTH_TOKEN"]) {
        settings.twilio_auth_token = Some(v);
    }
    if let Some(v) = get(&["TWILIO_PHONE_NUMBER"]) {
        settings.twilio_phone_number = Some(v);
    }
    if let Some(v) = get(&["CONTACT_SMS_TO"]) {
        settings.contact_sms_to = v;
    }
    if let Some(v) = get(&["SMS_API_BASE"]) {
        settings.sms_api_base = v;
    }

    if let Some(v) = get(&["PROVIDER_TIMEOUT_SECS"]) {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.provider_timeout_secs = parsed,
            _ => warn!(value = %v, "ignoring invalid PROVIDER_TIMEOUT_SECS"),
        }
    }
}

fn with_port(bind: &str, port: u16) -> String {
    let host = bind
        .rsplit_once(':')
        .map(|(host, _)| host)
        .filter(|host| !host.is_empty())
        .unwrap_or("0.0.0.0");
    format!("{host}:{port}")
}

impl Settings {
    pub fn delivery_config(&self) -> anyhow::Result<DeliveryChannelConfig> {
        let email = match &self.email_api_key {
            Some(api_key) => Some(EmailConfig {
                api_key: api_key.clone(),
                address: self.contact_email.clone(),
                api_base: parse_base(&self.email_api_base, "email_api_base")?,
            }),
            None => None,
        };

        let sms = match (
            &self.twilio_account_sid,
            &self.twilio_auth_token,
            &self.twilio_phone_number,
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(SmsConfig {
                account_sid: account_sid.clone(),
                auth_token: auth_token.clone(),
                from_number: from_number.clone(),
                to_number: self.contact_sms_to.clone(),
                api_base: parse_base(&self.sms_api_base, "sms_api_base")?,
            }),
            (None, None, None) => None,
            (sid, token, number) => {
                warn!(
                    account_sid = sid.is_some(),
                    auth_token = token.is_some(),
                    phone_number = number.is_some(),
                    "incomplete Twilio settings; SMS channel disabled"
                );
                None
            }
        };

        Ok(DeliveryChannelConfig {
            email,
            sms,
            timeout: Duration::from_secs(self.provider_timeout_secs),
        })
    }
}

fn parse_base(raw: &str, name: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid {name} '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

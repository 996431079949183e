use super::*;
use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Form, Json, Router,
};
use chrono::TimeZone;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct CapturedRequest {
    authorization: Option<String>,
    path_sid: Option<String>,
    form: HashMap<String, String>,
    json: Option<serde_json::Value>,
}

#[derive(Clone)]
struct StubState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
}

fn submission() -> ContactSubmission {
    ContactSubmission {
        name: "A".into(),
        email: "a@x.com".into(),
        phone: "1".into(),
        subject: "Hi".into(),
        message: "test".into(),
    }
}

async fn stub_provider(status: StatusCode) -> (url::Url, Arc<Mutex<Vec<CapturedRequest>>>) {
    async fn mail(
        State(state): State<StubState>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        state.captured.lock().await.push(CapturedRequest {
            authorization: header(&headers),
            path_sid: None,
            form: HashMap::new(),
            json: Some(body),
        });
        state.status
    }

    async fn messages(
        State(state): State<StubState>,
        Path(sid): Path<String>,
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> StatusCode {
        state.captured.lock().await.push(CapturedRequest {
            authorization: header(&headers),
            path_sid: Some(sid),
            form,
            json: None,
        });
        state.status
    }

    fn header(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        captured: captured.clone(),
        status,
    };
    let app = Router::new()
        .route("/mail/send", post(mail))
        .route("/Accounts/:sid/Messages.json", post(messages))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    let base = url::Url::parse(&format!("http://{addr}")).expect("url");
    (base, captured)
}

#[test]
fn email_carries_every_field_and_prefixed_subject() {
    let received_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
    let message = render_email(&submission(), "me@site.dev", "me@site.dev", received_at);

    assert_eq!(message.subject, "New Contact Form Submission: Hi");
    assert_eq!(message.from, "me@site.dev");
    assert_eq!(message.to, "me@site.dev");
    assert_eq!(
        message.body,
        "Name: A\nEmail: a@x.com\nPhone: 1\nSubject: Hi\nMessage: test\nReceived: 2026-10-19T08:30:00Z\n"
    );
}

#[test]
fn sms_summarizes_sender_and_subject() {
    let message = render_sms(&submission(), "+15550001", "+15550002");
    assert_eq!(
        message.body,
        "New contact form submission from A (a@x.com). Subject: Hi"
    );
    assert_eq!(message.from, "+15550001");
    assert_eq!(message.to, "+15550002");
}

#[test]
fn logging_only_config_builds_no_channels() {
    let config = DeliveryChannelConfig::logging_only();
    assert!(config.active_channels().is_empty());
    assert!(config.build_channels().expect("channels").is_empty());
}

#[test]
fn config_debug_output_redacts_secrets() {
    let config = DeliveryChannelConfig {
        email: Some(EmailConfig {
            api_key: "SG.secret".into(),
            address: "me@site.dev".into(),
            api_base: url::Url::parse(email::SENDGRID_API_BASE_URL).expect("url"),
        }),
        sms: Some(SmsConfig {
            account_sid: "AC123".into(),
            auth_token: "tok-secret".into(),
            from_number: "+15550001".into(),
            to_number: "+15550002".into(),
            api_base: url::Url::parse(sms::TWILIO_API_BASE_URL).expect("url"),
        }),
        timeout: config::DEFAULT_PROVIDER_TIMEOUT,
    };
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("SG.secret"));
    assert!(!rendered.contains("tok-secret"));
    assert_eq!(
        config.active_channels(),
        vec![ChannelName::Email, ChannelName::Sms]
    );
}

#[tokio::test]
async fn sendgrid_client_posts_bearer_json() {
    let (base, captured) = stub_provider(StatusCode::ACCEPTED).await;
    let client = SendGridClient::new(reqwest::Client::new(), base, "SG.key");
    let message = EmailMessage {
        from: "me@site.dev".into(),
        to: "me@site.dev".into(),
        subject: "New Contact Form Submission: Hi".into(),
        body: "Name: A".into(),
    };

    client.send_email(&message).await.expect("send");

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer SG.key"));
    let json = captured[0].json.as_ref().expect("json body");
    assert_eq!(json["subject"], "New Contact Form Submission: Hi");
    assert_eq!(json["personalizations"][0]["to"][0]["email"], "me@site.dev");
    assert_eq!(json["content"][0]["type"], "text/plain");
}

#[tokio::test]
async fn twilio_client_posts_form_under_account_path() {
    let (base, captured) = stub_provider(StatusCode::CREATED).await;
    let client = TwilioClient::new(reqwest::Client::new(), base, "AC123", "token");
    let message = render_sms(&submission(), "+15550001", "+15550002");

    client.send_sms(&message).await.expect("send");

    let captured = captured.lock().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].path_sid.as_deref(), Some("AC123"));
    let auth = captured[0].authorization.as_deref().expect("auth header");
    assert!(auth.starts_with("Basic "));
    assert_eq!(captured[0].form.get("From").map(String::as_str), Some("+15550001"));
    assert_eq!(captured[0].form.get("To").map(String::as_str), Some("+15550002"));
    assert_eq!(
        captured[0].form.get("Body").map(String::as_str),
        Some(message.body.as_str())
    );
}

#[tokio::test]
async fn non_success_provider_status_is_a_channel_error() {
    let (base, _captured) = stub_provider(StatusCode::UNAUTHORIZED).await;
    let channel = EmailChannel::new(
        Arc::new(SendGridClient::new(reqwest::Client::new(), base, "bad")),
        "me@site.dev",
        "me@site.dev",
    );

    let err = channel.deliver(&submission()).await.expect_err("should fail");
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn unreachable_provider_is_a_channel_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let base = url::Url::parse(&format!("http://{addr}")).expect("url");
    let channel = SmsChannel::new(
        Arc::new(TwilioClient::new(reqwest::Client::new(), base, "AC1", "t")),
        "+15550001",
        "+15550002",
    );
    assert_eq!(channel.name(), ChannelName::Sms);
    assert!(channel.deliver(&submission()).await.is_err());
}

#![allow(dead_code)]

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use scaler_client::{Scaler, ScalerConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const API_KEY: &str = "sk_test_0123456789";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn token_expiring_in(seconds: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "api-key", "exp": Utc::now().timestamp() + seconds }),
        &EncodingKey::from_secret(b"service-secret"),
    )
    .unwrap()
}

pub fn config_for(server: &MockServer) -> ScalerConfig {
    ScalerConfig {
        refresh_url: format!("{}/auth/api-key-token", server.uri()),
        sign_url: format!("{}/sign", server.uri()),
    }
}

pub async fn start() -> (MockServer, Scaler) {
    init_tracing();
    let server = MockServer::start().await;
    let scaler = Scaler::with_config(API_KEY, config_for(&server));
    (server, scaler)
}

/// Mounts a refresh endpoint handing out a token valid for an hour.
pub async fn mount_refresh(server: &MockServer, token: &str, delay: Duration, times: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/api-key-token"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "accessToken": token }))
                .set_delay(delay),
        )
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_sign(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/sign"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": format!("{}/submit/abc", server.uri()) })),
        )
        .expect(times)
        .mount(server)
        .await;
}

pub fn envelope(server: &MockServer, outputs: Vec<Value>) -> Value {
    json!({
        "sourceImage": { "pixelSize": { "width": 4032, "height": 3024 }, "byteSize": 2_500_000 },
        "destinationImages": outputs,
        "deleteUrl": format!("{}/del", server.uri()),
        "timeStats": { "transformMs": 120 }
    })
}

pub fn output(server: &MockServer, side: u32, download: Option<&str>, file_id: Option<&str>) -> Value {
    let mut value = json!({
        "fit": { "width": side, "height": side },
        "pixelSize": { "width": side, "height": side * 3 / 4 }
    });
    if let Some(dl) = download {
        value["downloadUrl"] = json!(format!("{}{}", server.uri(), dl));
    }
    if let Some(id) = file_id {
        value["fileId"] = json!(id);
    }
    value
}

pub async fn mount_submit(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/submit/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_download(server: &MockServer, at: &str, bytes: &[u8], delay: Duration) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(bytes.to_vec())
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub async fn requests_matching(server: &MockServer, verb: &str, at: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.to_string() == verb && r.url.path() == at)
        .collect()
}

/// Polls until the detached cleanup call shows up, or gives up after a second.
pub async fn wait_for_request(server: &MockServer, verb: &str, at: &str) -> Option<Request> {
    for _ in 0..50 {
        if let Some(request) = requests_matching(server, verb, at).await.into_iter().next() {
            return Some(request);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    None
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ggi::auth::{AuthError, AuthService, Credential, CredentialStore, GitHubDeviceAuth, Sleeper};
use ggi::config::{ProfileStore, UserProfile};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const DEVICE_CODE_PATH: &str = "/login/device/code";
pub const ACCESS_TOKEN_PATH: &str = "/login/oauth/access_token";
pub const USER_PATH: &str = "/user";

#[derive(Default)]
pub struct InMemoryCredentialStore {
    token: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, token: &str) {
        *self.token.lock().expect("store lock poisoned") = Some(token.to_string());
    }

    pub fn get(&self) -> Option<String> {
        self.token.lock().expect("store lock poisoned").clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn exists(&self) -> Result<bool, AuthError> {
        Ok(self.get().is_some())
    }

    fn read(&self) -> Result<Credential, AuthError> {
        self.get().map(Credential::new).ok_or(AuthError::NotLoggedIn)
    }

    fn write(&self, credential: &Credential) -> Result<(), AuthError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.token.lock().expect("store lock poisoned") = Some(credential.expose().to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    profile: Mutex<UserProfile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> UserProfile {
        self.profile.lock().expect("profile lock poisoned").clone()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self) -> ggi::error::Result<UserProfile> {
        Ok(self.get())
    }

    fn save(&self, profile: &UserProfile) -> ggi::error::Result<()> {
        *self.profile.lock().expect("profile lock poisoned") = profile.clone();
        Ok(())
    }
}

/// Sleeper that records every requested pause and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleeper lock poisoned").clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .expect("sleeper lock poisoned")
            .push(duration);
    }
}

pub fn secs(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|s| Duration::from_secs(*s)).collect()
}

/// Base URL of a local port nothing listens on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn github_auth(server: &MockServer) -> GitHubDeviceAuth {
    GitHubDeviceAuth::with_base_urls(&server.uri(), &server.uri())
}

pub struct Harness {
    pub credentials: Arc<InMemoryCredentialStore>,
    pub profiles: Arc<InMemoryProfileStore>,
    pub sleeper: Arc<RecordingSleeper>,
    pub service: AuthService,
}

pub fn harness(server: &MockServer) -> Harness {
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let profiles = Arc::new(InMemoryProfileStore::new());
    let sleeper = Arc::new(RecordingSleeper::new());
    let service = AuthService::new(github_auth(server), credentials.clone(), profiles.clone())
        .with_sleeper(sleeper.clone());
    Harness {
        credentials,
        profiles,
        sleeper,
        service,
    }
}

pub async fn mount_device_code(server: &MockServer, device_code: &str, interval: u64) {
    Mock::given(method("POST"))
        .and(path(DEVICE_CODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": device_code,
            "user_code": "ABCD-1234",
            "verification_uri": "https://example/activate",
            "expires_in": 900,
            "interval": interval
        })))
        .mount(server)
        .await;
}

/// Mount token-endpoint responses that are served once each, in order.
pub async fn mount_token_sequence(server: &MockServer, bodies: &[serde_json::Value]) {
    for body in bodies {
        Mock::given(method("POST"))
            .and(path(ACCESS_TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

pub async fn mount_user(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": login,
            "id": 1
        })))
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}

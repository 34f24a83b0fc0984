#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use institution_admin::api::{ApiClient, HttpRequest, HttpResponse, Transport, TransportError};
use institution_admin::recovery::{AuthRecovery, Navigator};
use institution_admin::session::{
    MemorySessionStore, SessionAccessor, SessionStore, INSTITUTION_CODE_KEY, LOGIN_ID_KEY, TOKEN_KEY,
    USER_TYPE_KEY,
};

pub const BASE_URL: &str = "https://backend.test/api";
pub const LOGIN_ENTRY: &str = "login.html";

/// Token signed with a throwaway secret, expiring `ttl_secs` from now (negative for the past).
pub fn mint_token(ttl_secs: i64) -> String {
    let claims = json!({
        "id": "inst-1",
        "userType": "institution",
        "exp": Utc::now().timestamp() + ttl_secs,
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
        .expect("failed to mint token")
}

pub fn json_response(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: serde_json::to_vec(&body).expect("failed to encode body"),
    })
}

pub fn raw_response(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: body.as_bytes().to_vec(),
    })
}

/// Records every request and answers from a queue; `{"success": true}` once the queue is empty.
#[derive(Default)]
pub struct SpyTransport {
    calls: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl SpyTransport {
    pub fn respond(&self, response: Result<HttpResponse, TransportError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json_response(200, json!({ "success": true })))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    notices: Mutex<Vec<String>>,
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn redirect(&self, target: &str) {
        self.redirects.lock().unwrap().push(target.to_string());
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub transport: Arc<SpyTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub store: Arc<MemorySessionStore>,
}

impl Harness {
    pub fn with_store(store: MemorySessionStore) -> Self {
        Self::with_transport(store, BASE_URL)
    }

    pub fn with_transport(store: MemorySessionStore, base_url: &str) -> Self {
        let transport = Arc::new(SpyTransport::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let store = Arc::new(store);
        let client = build(base_url, transport.clone(), navigator.clone(), store.clone());
        Self { client, transport, navigator, store }
    }

    /// Nothing stored.
    pub fn anonymous() -> Self {
        Self::with_store(MemorySessionStore::new())
    }

    /// Institution session holding a token valid for an hour.
    pub fn institution() -> Self {
        Self::with_store(institution_store(&mint_token(3600)))
    }

    /// Staff session holding a token valid for an hour.
    pub fn staff() -> Self {
        Self::with_store(MemorySessionStore::with_entries([
            (TOKEN_KEY, mint_token(3600)),
            (USER_TYPE_KEY, "staff".to_string()),
            (LOGIN_ID_KEY, "9876543210".to_string()),
        ]))
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    pub fn session_cleared(&self) -> bool {
        [TOKEN_KEY, USER_TYPE_KEY, INSTITUTION_CODE_KEY, LOGIN_ID_KEY]
            .iter()
            .all(|key| self.store.get(key).is_none())
    }
}

pub fn institution_store(token: &str) -> MemorySessionStore {
    MemorySessionStore::with_entries([
        (TOKEN_KEY, token.to_string()),
        (USER_TYPE_KEY, "institution".to_string()),
        (INSTITUTION_CODE_KEY, "INST001".to_string()),
    ])
}

pub fn build(
    base_url: &str,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
    store: Arc<dyn SessionStore>,
) -> ApiClient {
    let session = SessionAccessor::new(store);
    let recovery = AuthRecovery::new(session.clone(), navigator, LOGIN_ENTRY);
    ApiClient::new(base_url, transport, session, recovery)
}

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::classify::{classify, NETWORK_MESSAGE};
use super::request::{FormPayload, RequestDescriptor};
use super::transport::{HttpRequest, Transport};
use super::NO_TOKEN_MESSAGE;
use crate::error::{ApiError, ApiResult};
use crate::recovery::{AuthRecovery, RecoveryTrigger, TOKEN_EXPIRED_MESSAGE};
use crate::session::SessionAccessor;

/// Authenticated client for the institution backend.
///
/// Cheap to clone; clones share the transport, session store and recovery state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: SessionAccessor,
    recovery: AuthRecovery,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        session: SessionAccessor,
        recovery: AuthRecovery,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            recovery,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionAccessor {
        &self.session
    }

    pub fn recovery(&self) -> &AuthRecovery {
        &self.recovery
    }

    pub fn url_for(&self, descriptor: &RequestDescriptor) -> String {
        format!("{}{}", self.base_url, descriptor.path())
    }

    pub async fn get(&self, path: &str, requires_auth: bool) -> ApiResult<Value> {
        self.execute(RequestDescriptor::get(path, requires_auth)).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B, requires_auth: bool) -> ApiResult<Value> {
        self.execute(RequestDescriptor::post(path, to_json(body)?, requires_auth))
            .await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B, requires_auth: bool) -> ApiResult<Value> {
        self.execute(RequestDescriptor::put(path, to_json(body)?, requires_auth))
            .await
    }

    pub async fn delete(&self, path: &str, requires_auth: bool) -> ApiResult<Value> {
        self.execute(RequestDescriptor::delete(path, requires_auth)).await
    }

    pub async fn post_form(&self, path: &str, form: FormPayload, requires_auth: bool) -> ApiResult<Value> {
        self.execute(RequestDescriptor::multipart(path, form, requires_auth))
            .await
    }

    /// The single dispatch pipeline behind every verb.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> ApiResult<Value> {
        let span = tracing::debug_span!(
            "api_request",
            request_id = %Uuid::new_v4(),
            method = %descriptor.method(),
            path = %descriptor.path(),
        );
        self.dispatch(descriptor).instrument(span).await
    }

    async fn dispatch(&self, descriptor: RequestDescriptor) -> ApiResult<Value> {
        let bearer_token = if descriptor.requires_auth() {
            Some(self.authorize()?)
        } else {
            None
        };

        let request = HttpRequest {
            method: descriptor.method(),
            url: self.url_for(&descriptor),
            bearer_token,
            body: descriptor.into_body(),
        };

        tracing::debug!(url = %request.url, "dispatching");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Transport failure: {}", e);
                return Err(ApiError::network(NETWORK_MESSAGE));
            }
        };

        let outcome = classify(response.status, &response.body);
        match &outcome {
            Ok(_) => tracing::debug!(status = response.status, "request succeeded"),
            Err(err) if err.is_auth() => {
                tracing::warn!(status = response.status, "authentication rejected by backend");
                self.recovery.recover(RecoveryTrigger::Rejected);
            }
            Err(err) => tracing::debug!(status = response.status, code = err.error_code(), "request failed"),
        }
        outcome
    }

    /// Token for an authenticated call, or the auth failure that stops it before any I/O.
    fn authorize(&self) -> ApiResult<String> {
        let Some(token) = self.session.token() else {
            tracing::warn!("No token in session; request not sent");
            self.recovery.recover(RecoveryTrigger::Rejected);
            return Err(ApiError::auth(None, NO_TOKEN_MESSAGE));
        };

        if self.session.is_expired(&token) {
            tracing::warn!("Stored token expired; request not sent");
            self.recovery.recover(RecoveryTrigger::Expired);
            return Err(ApiError::auth(None, TOKEN_EXPIRED_MESSAGE));
        }

        Ok(token)
    }
}

fn to_json<B: Serialize>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::domain(None, format!("Request body could not be encoded: {}", e)))
}

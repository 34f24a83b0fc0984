//! Authenticated access to the institution backend.
//!
//! Every feature call goes through [`ApiClient::execute`]: the session is
//! consulted, one HTTP call is made through a [`Transport`], and the response
//! is classified into success or an [`ApiError`](crate::error::ApiError).

pub mod classify;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod request;
pub mod transport;

pub use client::ApiClient;
pub use envelope::{data_list, ensure_success, Envelope};
pub use request::{normalize_path, FormPart, FormPayload, Method, RequestBody, RequestDescriptor};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

pub const NO_TOKEN_MESSAGE: &str = "No authentication token found";

use std::sync::Arc;

use crate::config::AppConfig;
use crate::recovery::{AuthRecovery, Navigator};
use crate::session::{SessionAccessor, SessionStore};

/// Wire up a client over the production transport from application config.
pub fn build_client(
    config: &AppConfig,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
) -> anyhow::Result<ApiClient> {
    let base_url = config.api.normalized_base_url()?;
    let transport = ReqwestTransport::new(config.api.timeout())?;
    let session = SessionAccessor::new(store);
    let recovery = AuthRecovery::new(session.clone(), navigator, config.session.login_entry.clone());

    Ok(ApiClient::new(base_url, Arc::new(transport), session, recovery))
}

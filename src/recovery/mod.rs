//! Cross-cutting reaction to authentication failures.
//!
//! Whatever operation hit the failure, recovery does the same three things:
//! clear the session, tell the user, and send them to the login entry point
//! after [`REDIRECT_DELAY`].

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::config::REDIRECT_DELAY;
use crate::session::SessionAccessor;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token expired. Please login again.";

/// Why recovery ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryTrigger {
    /// The backend rejected the credentials, or none were stored.
    Rejected,
    /// The stored token's expiry passed before the request was sent.
    Expired,
}

impl RecoveryTrigger {
    pub fn message(&self) -> &'static str {
        match self {
            RecoveryTrigger::Rejected => SESSION_EXPIRED_MESSAGE,
            RecoveryTrigger::Expired => TOKEN_EXPIRED_MESSAGE,
        }
    }
}

/// Presentation hooks for recovery: where the message goes and what "go to login" means.
pub trait Navigator: Send + Sync {
    fn notify(&self, message: &str);

    fn redirect(&self, target: &str);
}

/// Navigator that only logs. Used when the embedder supplies none.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn redirect(&self, target: &str) {
        tracing::info!(target = %target, "redirecting to login");
    }
}

#[derive(Clone)]
pub struct AuthRecovery {
    inner: Arc<RecoveryInner>,
}

struct RecoveryInner {
    session: SessionAccessor,
    navigator: Arc<dyn Navigator>,
    login_entry: String,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AuthRecovery {
    pub fn new(
        session: SessionAccessor,
        navigator: Arc<dyn Navigator>,
        login_entry: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(RecoveryInner {
                session,
                navigator,
                login_entry: login_entry.into(),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Run recovery and return the message shown to the user.
    ///
    /// Repeated calls clear the session again and re-notify, but never stack
    /// a second redirect on top of one that has not fired yet.
    pub fn recover(&self, trigger: RecoveryTrigger) -> &'static str {
        if let Err(e) = self.inner.session.clear_session() {
            tracing::warn!("Failed to clear session during recovery: {}", e);
        }

        let message = trigger.message();
        self.inner.navigator.notify(message);
        self.schedule_redirect();
        message
    }

    pub fn redirect_pending(&self) -> bool {
        match self.inner.pending.lock() {
            Ok(pending) => pending.as_ref().is_some_and(|h| !h.is_finished()),
            Err(_) => false,
        }
    }

    /// Wait for a scheduled redirect to fire. Used by short-lived callers such as the CLI.
    pub async fn settle(&self) {
        let handle = match self.inner.pending.lock() {
            Ok(mut pending) => pending.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!("Login redirect task failed: {}", e);
            }
        }
    }

    fn schedule_redirect(&self) {
        let Ok(mut pending) = self.inner.pending.lock() else {
            tracing::warn!("Recovery state poisoned; redirecting immediately");
            self.inner.navigator.redirect(&self.inner.login_entry);
            return;
        };

        if pending.as_ref().is_some_and(|h| !h.is_finished()) {
            return;
        }

        let navigator = self.inner.navigator.clone();
        let target = self.inner.login_entry.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                *pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    navigator.redirect(&target);
                }));
            }
            Err(_) => {
                tracing::debug!("No async runtime; redirecting without delay");
                navigator.redirect(&target);
            }
        }
    }
}

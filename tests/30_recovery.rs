mod common;

use std::time::Duration;

use common::{json_response, Harness};
use institution_admin::config::REDIRECT_DELAY;
use institution_admin::error::ErrorKind;
use institution_admin::recovery::SESSION_EXPIRED_MESSAGE;
use serde_json::json;

#[tokio::test(start_paused = true)]
async fn rejected_token_clears_session_and_redirects_after_delay() {
    let h = Harness::institution();
    h.transport
        .respond(json_response(401, json!({ "message": "Token invalid" })));

    let err = h.client.get("/classes", true).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.message(), "Token invalid");
    assert!(h.session_cleared());
    assert_eq!(h.navigator.notices(), vec![SESSION_EXPIRED_MESSAGE.to_string()]);
    assert!(h.client.recovery().redirect_pending());
    assert!(h.navigator.redirects().is_empty());

    tokio::time::sleep(REDIRECT_DELAY - Duration::from_millis(100)).await;
    assert!(h.navigator.redirects().is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.navigator.redirects(), vec![common::LOGIN_ENTRY.to_string()]);
    assert!(!h.client.recovery().redirect_pending());
}

#[tokio::test(start_paused = true)]
async fn concurrent_rejections_schedule_one_redirect() {
    let h = Harness::institution();
    for _ in 0..3 {
        h.transport.respond(json_response(401, json!({})));
    }

    let (a, b, c) = tokio::join!(
        h.client.get("/classes", true),
        h.client.get("/staff", true),
        h.client.get("/subjects", true),
    );
    assert!(a.unwrap_err().is_auth());
    assert!(b.is_err());
    assert!(c.is_err());

    h.client.recovery().settle().await;
    assert_eq!(h.navigator.redirects().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn requests_after_rejection_stop_locally() {
    let h = Harness::institution();
    h.transport.respond(json_response(401, json!({})));

    let _ = h.client.get("/classes", true).await;
    let err = h.client.get("/staff", true).await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(h.transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn settle_waits_for_the_pending_redirect() {
    let h = Harness::anonymous();

    let _ = h.client.get("/classes", true).await;
    assert!(h.navigator.redirects().is_empty());

    h.client.recovery().settle().await;
    assert_eq!(h.navigator.redirects(), vec![common::LOGIN_ENTRY.to_string()]);
}

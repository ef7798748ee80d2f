//! Scan flow driven end to end: flow -> HTTP client -> proxy -> fake backend.

mod common;

use common::*;
use pipeline_core::{
    HttpScanClient, ScanFlow, ScanState, CONNECT_FAILED_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
use test_context::test_context;
use tokio::task::JoinHandle;

/// Serve the app on an ephemeral port and return its origin.
async fn serve(app: axum::Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

#[test_context(ProxyHarness)]
#[tokio::test]
async fn successful_scan_closes_dialog_and_requests_refresh(ctx: &mut ProxyHarness) {
    ctx.backend.reply_json(
        200,
        serde_json::json!({"success": true, "count": 5, "is_fallback": false}),
    );
    let (origin, server) = serve(ctx.app()).await;
    let client = HttpScanClient::new(origin).with_cookie("session=abc");

    let mut flow = ScanFlow::new().with_location("Ho Chi Minh City").with_limit(5);
    flow.open();
    flow.set_keyword("dentists");
    let refresh = flow.submit(&client).await.expect("refresh requested");

    assert_eq!(refresh.count, Some(5));
    assert!(refresh.notice.is_none());
    assert_eq!(flow.state(), &ScanState::Succeeded);
    assert!(!flow.is_open());
    assert_eq!(flow.keyword(), "");

    let requests = ctx.backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/scan");
    assert_eq!(requests[0].cookie.as_deref(), Some("session=abc"));
    assert_eq!(
        requests[0].body,
        serde_json::json!({"keyword": "dentists", "location": "Ho Chi Minh City", "limit": 5})
    );

    server.abort();
}

#[test_context(ProxyHarness)]
#[tokio::test]
async fn fallback_scan_carries_notice(ctx: &mut ProxyHarness) {
    ctx.backend.reply_json(
        200,
        serde_json::json!({
            "success": true,
            "count": 3,
            "is_fallback": true,
            "fallback_keyword": "dental clinic"
        }),
    );
    let (origin, server) = serve(ctx.app()).await;
    let client = HttpScanClient::new(origin);

    let mut flow = ScanFlow::new();
    flow.set_keyword("orthodontists");
    let refresh = flow.submit(&client).await.unwrap();

    let notice = refresh.notice.unwrap();
    assert_eq!(notice.original_keyword, "orthodontists");
    assert_eq!(notice.fallback_keyword, "dental clinic");
    assert!(notice.to_string().contains("found 3 companies"));

    server.abort();
}

#[test_context(ProxyHarness)]
#[tokio::test]
async fn rejected_scan_offers_suggestion(ctx: &mut ProxyHarness) {
    ctx.backend.reply_json(
        400,
        serde_json::json!({
            "success": false,
            "message": "No results for \"restarants\".",
            "suggestion": "restaurants"
        }),
    );
    let (origin, server) = serve(ctx.app()).await;
    let client = HttpScanClient::new(origin);

    let mut flow = ScanFlow::new();
    flow.open();
    flow.set_keyword("restarants");
    assert!(flow.submit(&client).await.is_none());

    assert_eq!(flow.message(), Some("No results for \"restarants\"."));
    assert_eq!(flow.suggestion(), Some("restaurants"));
    assert!(flow.is_open());

    assert!(flow.apply_suggestion());
    assert_eq!(flow.keyword(), "restaurants");
    // Applying a suggestion never re-submits
    assert_eq!(ctx.backend.requests().len(), 1);

    server.abort();
}

#[test_context(ProxyHarness)]
#[tokio::test]
async fn unreachable_backend_reads_as_connection_failure(ctx: &mut ProxyHarness) {
    let target = server_core::kernel::BackendTarget::new(
        format!("http://127.0.0.1:{}", closed_port()),
        None,
    );
    let (origin, server) = serve(ctx.app_with(target, false)).await;
    let client = HttpScanClient::new(origin);

    let mut flow = ScanFlow::new();
    flow.set_keyword("spas");
    assert!(flow.submit(&client).await.is_none());

    assert_eq!(flow.message(), Some(CONNECT_FAILED_MESSAGE));
    assert_eq!(flow.suggestion(), None);

    server.abort();
}

#[test_context(ProxyHarness)]
#[tokio::test]
async fn crashing_backend_is_not_a_connection_failure(ctx: &mut ProxyHarness) {
    ctx.backend.reply_with(500, "Internal Server Error");
    let (origin, server) = serve(ctx.app()).await;
    let client = HttpScanClient::new(origin);

    let mut flow = ScanFlow::new();
    flow.set_keyword("spas");
    assert!(flow.submit(&client).await.is_none());

    assert_eq!(
        flow.state(),
        &ScanState::FailedWithMessage {
            message: GENERIC_FAILURE_MESSAGE.to_string()
        }
    );
    assert_eq!(ctx.backend.requests().len(), 1);

    server.abort();
}

#[tokio::test]
async fn unreachable_dashboard_reads_as_connection_failure() {
    let client = HttpScanClient::new(format!("http://127.0.0.1:{}", closed_port()));

    let mut flow = ScanFlow::new();
    flow.set_keyword("spas");
    assert!(flow.submit(&client).await.is_none());

    assert_eq!(flow.message(), Some(CONNECT_FAILED_MESSAGE));
}

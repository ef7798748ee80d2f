//! Test harnesses for integration testing.
//!
//! `ProxyHarness` runs a fake backend in-process and builds the app against
//! it. `PostgresHarness` starts a throwaway Postgres with testcontainers and
//! creates the two tables the backend normally owns.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use server_core::kernel::{BackendForwarder, BackendTarget, InMemoryRecordStore, ServerDeps};
use server_core::server::build_app;
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tower::ServiceExt;

use super::FakeBackend;

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test harness for the forwarding and dashboard routes.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(ProxyHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut ProxyHarness) {
///     let (status, body) = ctx.post_json(ctx.app(), "/api/scan", r#"{"keyword":"spas"}"#).await;
/// }
/// ```
pub struct ProxyHarness {
    pub backend: FakeBackend,
    pub store: InMemoryRecordStore,
}

impl AsyncTestContext for ProxyHarness {
    async fn setup() -> Self {
        init_tracing();
        Self {
            backend: FakeBackend::start().await,
            store: InMemoryRecordStore::new(),
        }
    }

    async fn teardown(self) {
        self.backend.stop();
    }
}

impl ProxyHarness {
    /// App forwarding to the fake backend by absolute URL.
    pub fn app(&self) -> Router {
        self.app_with(BackendTarget::new(self.backend.url(), None), false)
    }

    pub fn app_with(&self, target: BackendTarget, expose_proxy_errors: bool) -> Router {
        let deps = ServerDeps::new(
            Arc::new(self.store.clone()),
            Arc::new(BackendForwarder::new(target, expose_proxy_errors)),
        );
        build_app(deps, &[])
    }

    pub async fn post_json(
        &self,
        app: Router,
        path: &str,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    pub async fn get(&self, app: Router, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        send(app, request).await
    }
}

/// Drive one request through the router and decode the JSON reply.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

/// Closed local port: connections to it are refused.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Tables as the lead-generation backend creates them.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id UUID PRIMARY KEY,
    created_at TIMESTAMPTZ DEFAULT now(),
    name TEXT NOT NULL,
    website_url TEXT,
    google_maps_url TEXT,
    industry TEXT,
    search_keyword TEXT,
    has_ssl BOOLEAN DEFAULT false,
    pagespeed_score INTEGER,
    is_wordpress BOOLEAN DEFAULT false,
    crm_system TEXT,
    address TEXT,
    company_type TEXT,
    employee_count TEXT,
    revenue_range TEXT,
    emails TEXT[],
    socials JSONB,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'NEW',
    disqualify_reason TEXT
);
CREATE TABLE IF NOT EXISTS contacts (
    id UUID PRIMARY KEY,
    company_id UUID NOT NULL REFERENCES companies(id),
    full_name TEXT NOT NULL,
    position TEXT,
    linkedin_url TEXT,
    email TEXT,
    is_primary_decision_maker BOOLEAN DEFAULT false,
    status TEXT
);
"#;

/// Throwaway Postgres with the backend's tables. Requires Docker.
pub struct PostgresHarness {
    pub db_pool: PgPool,
    _postgres: ContainerAsync<Postgres>,
}

impl AsyncTestContext for PostgresHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create Postgres harness")
    }

    async fn teardown(self) {
        // Container is dropped with the harness
    }
}

impl PostgresHarness {
    pub async fn new() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let db_pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to test database")?;
        sqlx::raw_sql(SCHEMA)
            .execute(&db_pool)
            .await
            .context("Failed to create tables")?;

        Ok(Self {
            db_pool,
            _postgres: postgres,
        })
    }
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::kernel::target::BackendTarget;

/// Default backend location for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Lead-generation backend base URL, absolute or root-relative (`/api/python`).
    pub backend_api_url: String,
    /// Hosting-platform deployment host; when set it overrides `backend_api_url`.
    pub deployment_host: Option<String>,
    /// Include transport error text in proxy failure envelopes.
    pub expose_proxy_errors: bool,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            backend_api_url: non_empty_var("BACKEND_API_URL")
                .or_else(|| non_empty_var("NEXT_PUBLIC_API_URL"))
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            deployment_host: non_empty_var("DEPLOYMENT_HOST")
                .or_else(|| non_empty_var("VERCEL_URL")),
            expose_proxy_errors: env::var("EXPOSE_PROXY_ERRORS")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<bool>()
                .unwrap_or(false),
            allowed_origins: parse_list(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }

    /// Backend target handed to the resolver on every forwarded request.
    pub fn backend_target(&self) -> BackendTarget {
        BackendTarget::new(self.backend_api_url.clone(), self.deployment_host.clone())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

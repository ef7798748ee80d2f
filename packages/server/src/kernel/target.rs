//! Backend target resolution.
//!
//! The backend base URL may be configured as a root-relative path (the
//! backend is then served from the same origin as this service), so the
//! absolute URL for a server-to-server call depends on the incoming request.
//! Resolve once per request; hosts differ between requests.

/// Path the backend is mounted at on a deployment host.
pub const DEPLOYMENT_BACKEND_PATH: &str = "/api/python";

/// Host used when a relative base URL has no `Host` header to resolve against.
/// The `.invalid` TLD never resolves, so the call fails as unreachable.
pub const MISSING_HOST_PLACEHOLDER: &str = "missing-host.invalid";

/// Configured backend location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    /// Absolute URL or root-relative path.
    pub base_url: String,
    /// When set, wins over `base_url`.
    pub deployment_host: Option<String>,
}

/// Which rule produced a resolved URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    DeploymentOverride,
    Absolute,
    HostRelative,
    /// Relative base URL but no `Host` header; best-effort URL only.
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub base_url: String,
    pub source: TargetSource,
}

impl ResolvedTarget {
    /// Join a backend operation path onto the resolved base.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl BackendTarget {
    pub fn new(base_url: impl Into<String>, deployment_host: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            deployment_host,
        }
    }

    /// Resolve the absolute backend base URL for a request with the given `Host` header.
    pub fn resolve(&self, host: Option<&str>) -> ResolvedTarget {
        if let Some(deployment_host) = self.deployment_host.as_deref() {
            return ResolvedTarget {
                base_url: format!("https://{}{}", deployment_host, DEPLOYMENT_BACKEND_PATH),
                source: TargetSource::DeploymentOverride,
            };
        }

        if !self.base_url.starts_with('/') {
            return ResolvedTarget {
                base_url: self.base_url.clone(),
                source: TargetSource::Absolute,
            };
        }

        match host {
            Some(host) => {
                let protocol = if host.contains("localhost") {
                    "http"
                } else {
                    "https"
                };
                ResolvedTarget {
                    base_url: format!("{}://{}{}", protocol, host, self.base_url),
                    source: TargetSource::HostRelative,
                }
            }
            None => {
                let base_url = format!("https://{}{}", MISSING_HOST_PLACEHOLDER, self.base_url);
                tracing::warn!(
                    configured = %self.base_url,
                    resolved = %base_url,
                    "Relative backend URL but no Host header; using placeholder host"
                );
                ResolvedTarget {
                    base_url,
                    source: TargetSource::Ambiguous,
                }
            }
        }
    }
}

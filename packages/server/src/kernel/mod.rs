//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod forwarder;
pub mod target;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use forwarder::{
    BackendForwarder, BackendOperation, ForwardRequest, ForwardedResponse, ProxyError,
};
pub use target::{BackendTarget, ResolvedTarget, TargetSource, MISSING_HOST_PLACEHOLDER};
pub use test_dependencies::InMemoryRecordStore;
pub use traits::*;

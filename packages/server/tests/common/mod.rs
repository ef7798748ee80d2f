// Common test utilities

pub mod fake_backend;
pub mod fixtures;
pub mod harness;

pub use fake_backend::*;
pub use fixtures::*;
pub use harness::*;

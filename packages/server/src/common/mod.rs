// Common types shared across routes

pub mod envelope;

pub use envelope::FailureEnvelope;

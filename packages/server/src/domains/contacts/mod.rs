// Contacts domain - people found at companies by enrichment

pub mod models;

pub use models::ContactRecord;

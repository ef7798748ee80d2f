// Companies domain - read access to companies discovered by scans
//
// Rows are written by the lead-generation backend only.

pub mod models;

pub use models::CompanyRecord;

// Business domains
pub mod companies;
pub mod contacts;
pub mod pipeline;

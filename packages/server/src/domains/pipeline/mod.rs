// Pipeline domain - the dashboard's read side
//
// Responsibilities:
// - Reading companies and contacts fresh on every page load
// - Surfacing read failures instead of rendering an empty dashboard

pub mod gateway;
pub mod store;

pub use gateway::{load_pipeline, DataFetchError, PipelineSnapshot};
pub use store::PostgresRecordStore;

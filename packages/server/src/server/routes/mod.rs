// HTTP routes
pub mod dashboard;
pub mod health;
pub mod proxy;

pub use dashboard::*;
pub use health::*;
pub use proxy::*;

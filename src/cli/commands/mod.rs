//! CLI command implementations

pub mod config;
pub mod feeds;
pub mod installed;
pub mod stale;

pub use config::execute as config;
pub use feeds::execute as feeds;
pub use installed::execute as installed;
pub use stale::execute as stale;

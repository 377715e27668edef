pub mod command;
pub mod config;
pub mod current;
pub mod embedded;
pub mod prune;
pub mod schedule;
pub mod statistics;
pub mod utils;

pub use config::PruneConfig;
pub use prune::{prune_empty_dirs, prune_old_files};
pub use schedule::run;

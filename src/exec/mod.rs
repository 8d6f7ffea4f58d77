// mod.rs - Delegated process execution

pub mod command;
pub mod runner;

// Re-export main types for convenience
pub use command::CommandSpec;
pub use runner::{run_checked, ProcessOutcome, ProcessRunner, SystemRunner};

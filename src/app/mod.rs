//! Application orchestration module

pub mod execution;
pub mod initialization;

pub use execution::run_demo_command;
pub use initialization::{configure_logging, load_configuration, resolve_demo_config};

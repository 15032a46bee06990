pub mod cli;
pub mod commands;
pub mod sources;

pub use cli::{BuildArgs, Cli, Commands, GroupArgs};
pub use commands::{build_json, group_json, run};

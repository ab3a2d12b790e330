pub mod backlog;
pub mod board;
pub mod burndown;
pub mod commands;
pub mod confirm;
pub mod init;
pub mod project;
pub mod sprint;
pub mod task;

pub use commands::*;

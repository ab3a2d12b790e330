pub mod burndown_repo;
pub mod connection;
pub mod migrations;
pub mod project_repo;
pub mod sprint_repo;
pub mod task_repo;

pub use connection::*;

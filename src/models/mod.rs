pub mod burndown;
pub mod project;
pub mod sprint;
pub mod task;

pub use burndown::*;
pub use project::*;
pub use sprint::*;
pub use task::*;

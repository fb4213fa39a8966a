pub mod task;
pub mod user;

pub use task::{task_from_map, Task, TaskInput};
pub use user::{user_from_map, User};

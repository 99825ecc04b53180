//! Application services for task lifecycle orchestration.

mod lifecycle;
mod policy;

pub use lifecycle::{
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService, TransitionTaskRequest,
};
pub use policy::WorkflowPolicy;

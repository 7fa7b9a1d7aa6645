//! Workflow entry points shared by the binary and the tests

pub mod orchestration;

pub use orchestration::{run_workflow, WorkflowArgs, WorkflowResult};

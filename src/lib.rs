pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod outputs;
pub mod publisher;
pub mod resolver;
pub mod skip;
pub mod ui;

pub use error::{Result, TagOnMergeError};

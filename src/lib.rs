pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod pipeline;

pub use error::{Error, Result};

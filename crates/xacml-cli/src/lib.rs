//! Driver for the XACML function enum generator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod persist;
pub mod pipeline;
pub mod summary;

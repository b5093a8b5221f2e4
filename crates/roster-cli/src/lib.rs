//! Library side of the `roster` binary: argument types, commands and logging.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;

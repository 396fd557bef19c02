//! Library side of the `csvbind` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod sample;

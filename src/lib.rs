#![deny(clippy::print_stdout)]

pub mod command_line;
pub mod config;
pub mod input;
pub mod molecule;
pub mod output;
pub mod parallel;
pub mod selection;
pub mod threed;
pub mod toolkit;

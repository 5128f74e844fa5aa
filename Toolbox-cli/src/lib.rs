// Toolbox CLI
// Command line surface over the toolbox domain

// Argument definitions
pub mod cli;

// Command execution
pub mod commands;

// Text rendering of outcomes
pub mod output;

// Tracing setup
pub mod logging;

pub use cli::Cli;
pub use commands::{run, CommandError, Outcome};

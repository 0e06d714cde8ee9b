//! Command implementations for the refload CLI.
//!
//! Each command is implemented in its own module with an `execute` method
//! that takes the global options and returns a `Result`.

pub mod completions;
pub mod expand;
pub mod resolve;
pub mod solution;
pub mod validate;

pub use completions::CompletionsCommand;
pub use expand::ExpandCommand;
pub use resolve::ResolveCommand;
pub use solution::SolutionCommand;
pub use validate::ValidateCommand;

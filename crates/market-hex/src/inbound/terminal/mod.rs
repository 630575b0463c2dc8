//! Line-oriented presenter: one command in, one rendered screen out.

pub mod command;
pub mod render;
pub mod session;

pub use command::{Command, CommandLine};
pub use session::{Outcome, Session};

mod command;
mod outcome;

pub use command::{Command, Target};
pub use outcome::{Outcome, Summary};
